use projectflow::{
    db::enums::TaskPriority,
    filters::{TaskFilter, TaskFilterQuery},
};

fn query(status: Option<&str>, priority: Option<&str>, team: Option<&str>) -> TaskFilterQuery {
    TaskFilterQuery {
        status: status.map(str::to_string),
        priority: priority.map(str::to_string),
        team: team.map(str::to_string),
        page: None,
    }
}

#[test]
fn missing_values_mean_all() {
    let filter = TaskFilter::from_query(&query(None, None, None), &[1, 2]).unwrap();
    assert_eq!(filter.status.is_completed(), None);
    assert_eq!(filter.priority.priority(), None);
    assert_eq!(filter.team.team_id(), None);
}

#[test]
fn narrows_by_every_dimension() {
    let filter =
        TaskFilter::from_query(&query(Some("completed"), Some("urgent"), Some("2")), &[1, 2]).unwrap();
    assert_eq!(filter.status.is_completed(), Some(true));
    assert_eq!(filter.priority.priority(), Some(TaskPriority::Urgent));
    assert_eq!(filter.team.team_id(), Some(2));
}

#[test]
fn foreign_team_is_rejected() {
    let err = TaskFilter::from_query(&query(None, None, Some("7")), &[1, 2]).unwrap_err();
    assert_eq!(err.field_name(), Some("team"));
}

#[test]
fn unknown_status_or_priority_is_rejected() {
    assert!(TaskFilter::from_query(&query(Some("archived"), None, None), &[1]).is_err());
    assert!(TaskFilter::from_query(&query(None, Some("U"), None), &[1]).is_err());
}
