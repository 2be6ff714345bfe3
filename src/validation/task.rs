use chrono::NaiveDate;

use super::{deadline::validate_deadline, validate_required_name};
use crate::db::models::task::TaskRequest;
use crate::error::AppError;

pub fn validate_task_request(req: &TaskRequest, today: NaiveDate) -> Result<(), AppError> {
    validate_required_name("name", &req.name)?;
    validate_deadline(req.deadline, today)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::TaskPriority;

    fn request(deadline: NaiveDate) -> TaskRequest {
        TaskRequest {
            name: "Write docs".to_string(),
            description: String::new(),
            deadline,
            is_completed: false,
            priority: TaskPriority::Medium,
            task_type_id: 1,
            project_id: 1,
            assignee_ids: None,
        }
    }

    #[test]
    fn deadline_must_be_in_the_future() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(validate_task_request(&request(today.succ_opt().unwrap()), today).is_ok());
        assert!(validate_task_request(&request(today), today).is_err());
        assert!(validate_task_request(&request(today.pred_opt().unwrap()), today).is_err());
    }
}
