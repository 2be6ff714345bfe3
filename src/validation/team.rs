use super::validate_required_name;
use crate::error::AppError;

pub fn validate_team_name(name: &str) -> Result<(), AppError> {
    validate_required_name("name", name)
}

/// Rules for adding a single employee through the add-member form. The
/// membership and existence checks run against `lookup`, in that order.
pub fn validate_new_member<C: ?Sized>(
    lookup: &mut C,
    actor_id: i32,
    employee_id: Option<i32>,
    already_member: impl FnOnce(&mut C, i32) -> Result<bool, AppError>,
    exists: impl FnOnce(&mut C, i32) -> Result<bool, AppError>,
) -> Result<i32, AppError> {
    let employee_id = employee_id.ok_or_else(|| {
        AppError::field(
            "employee_id",
            "Employee ID cannot be empty. Please enter a valid ID.",
        )
    })?;

    if employee_id == actor_id {
        return Err(AppError::field("employee_id", "You are already on the team."));
    }
    if already_member(lookup, employee_id)? {
        return Err(AppError::field("employee_id", "Member already in the team"));
    }
    if !exists(lookup, employee_id)? {
        return Err(AppError::field(
            "employee_id",
            format!("Worker with ID '{}' does not exist.", employee_id),
        ));
    }
    Ok(employee_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation { message, .. } => message,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_name_rules() {
        assert!(validate_team_name("Alpha").is_ok());
        assert!(validate_team_name("  ").is_err());
        assert!(validate_team_name("").is_err());
    }

    #[test]
    fn add_member_rules() {
        let never = |_: &mut (), _: i32| Ok(false);
        let always = |_: &mut (), _: i32| Ok(true);

        assert_eq!(validate_new_member(&mut (), 1, Some(2), never, always).unwrap(), 2);
        assert_eq!(
            message(validate_new_member(&mut (), 1, None, never, always).unwrap_err()),
            "Employee ID cannot be empty. Please enter a valid ID."
        );
        assert_eq!(
            message(validate_new_member(&mut (), 1, Some(1), never, always).unwrap_err()),
            "You are already on the team."
        );
        assert_eq!(
            message(validate_new_member(&mut (), 1, Some(2), always, always).unwrap_err()),
            "Member already in the team"
        );
        assert_eq!(
            message(validate_new_member(&mut (), 1, Some(9), never, never).unwrap_err()),
            "Worker with ID '9' does not exist."
        );
    }
}
