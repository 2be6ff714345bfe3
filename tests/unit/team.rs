use projectflow::{
    error::AppError,
    validation::team::{validate_new_member, validate_team_name},
};

struct Roster {
    members: Vec<i32>,
    employees: Vec<i32>,
}

fn add(roster: &mut Roster, actor: i32, employee_id: Option<i32>) -> Result<i32, AppError> {
    validate_new_member(
        roster,
        actor,
        employee_id,
        |roster, id| Ok(roster.members.contains(&id)),
        |roster, id| Ok(roster.employees.contains(&id)),
    )
}

fn message(err: AppError) -> String {
    match err {
        AppError::Validation { message, .. } => message,
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn team_name_is_required() {
    assert!(validate_team_name("Platform").is_ok());
    assert!(validate_team_name("").is_err());
    assert!(validate_team_name(" \t").is_err());
}

#[test]
fn add_member_messages() {
    let mut roster = Roster {
        members: vec![1, 2],
        employees: vec![1, 2, 3],
    };

    assert_eq!(add(&mut roster, 1, Some(3)).unwrap(), 3);
    assert_eq!(message(add(&mut roster, 1, Some(1)).unwrap_err()), "You are already on the team.");
    assert_eq!(message(add(&mut roster, 1, Some(2)).unwrap_err()), "Member already in the team");
    assert_eq!(
        message(add(&mut roster, 1, Some(42)).unwrap_err()),
        "Worker with ID '42' does not exist."
    );
}
