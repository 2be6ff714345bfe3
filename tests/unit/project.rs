use chrono::{Duration, NaiveDate};
use projectflow::{
    db::models::project::{Project, ProjectRequest},
    validation::project::validate_project_request,
};

fn request(deadline: NaiveDate) -> ProjectRequest {
    ProjectRequest {
        name: "Website relaunch".to_string(),
        description: "New landing pages".to_string(),
        deadline,
        is_completed: false,
        team_id: 1,
    }
}

#[test]
fn project_deadline_must_be_after_today() {
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    assert!(validate_project_request(&request(today + Duration::days(1)), today).is_ok());

    for deadline in [today, today - Duration::days(30)] {
        let err = validate_project_request(&request(deadline), today).unwrap_err();
        assert_eq!(err.field_name(), Some("deadline"));
    }
}

#[test]
fn project_status_label() {
    let mut project = Project {
        id: 1,
        name: "Website relaunch".to_string(),
        description: String::new(),
        deadline: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        is_completed: false,
        team_id: 1,
        created_at: chrono::Utc::now(),
    };
    assert_eq!(project.status_display(), "In Progress");
    project.is_completed = true;
    assert_eq!(project.status_display(), "Completed");
}
