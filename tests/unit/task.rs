use chrono::{Duration, NaiveDate};
use projectflow::{
    db::{enums::TaskPriority, models::task::TaskRequest},
    validation::task::validate_task_request,
};

#[test]
fn task_request_rules() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let mut req = TaskRequest {
        name: "Fix login redirect".to_string(),
        description: String::new(),
        deadline: today + Duration::days(3),
        is_completed: false,
        priority: TaskPriority::High,
        task_type_id: 1,
        project_id: 1,
        assignee_ids: Some("1,2".to_string()),
    };
    assert!(validate_task_request(&req, today).is_ok());

    req.deadline = today;
    assert_eq!(
        validate_task_request(&req, today).unwrap_err().field_name(),
        Some("deadline")
    );

    req.deadline = today + Duration::days(3);
    req.name = "   ".to_string();
    assert_eq!(
        validate_task_request(&req, today).unwrap_err().field_name(),
        Some("name")
    );
}

#[test]
fn priority_accepts_only_known_values() {
    assert_eq!("urgent".parse::<TaskPriority>(), Ok(TaskPriority::Urgent));
    assert_eq!("low".parse::<TaskPriority>(), Ok(TaskPriority::Low));
    assert!("U".parse::<TaskPriority>().is_err());
    assert!(serde_json::from_str::<TaskPriority>("\"medium\"").is_ok());
    assert!(serde_json::from_str::<TaskPriority>("\"critical\"").is_err());
}
