use chrono::NaiveDate;

use super::{deadline::validate_deadline, validate_required_name};
use crate::db::models::project::ProjectRequest;
use crate::error::AppError;

/// Field rules for project create/update. Team eligibility is checked
/// against the database by the service.
pub fn validate_project_request(req: &ProjectRequest, today: NaiveDate) -> Result<(), AppError> {
    validate_required_name("name", &req.name)?;
    validate_deadline(req.deadline, today)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, deadline: NaiveDate) -> ProjectRequest {
        ProjectRequest {
            name: name.to_string(),
            description: String::new(),
            deadline,
            is_completed: false,
            team_id: 1,
        }
    }

    #[test]
    fn validate_project_rules() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let next_week = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();

        assert!(validate_project_request(&request("Apollo", next_week), today).is_ok());
        assert!(validate_project_request(&request("  ", next_week), today).is_err());

        let err = validate_project_request(&request("Apollo", today), today).unwrap_err();
        assert_eq!(err.field_name(), Some("deadline"));
    }
}
