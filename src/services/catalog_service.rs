use diesel::prelude::*;

use crate::{
    db::models::{
        api::error_codes,
        position::Position,
        task::{CreateTaskTypeRequest, TaskType},
    },
    db::repositories::{positions::PositionsRepo, task_types::TaskTypesRepo},
    error::{AppError, AppResult},
    validation::validate_required_name,
};

const NAME_TAKEN: &str = "Task type with this name already exists.";

/// Reference data used by the create and update forms.
pub struct CatalogService;

impl CatalogService {
    pub fn task_types(conn: &mut PgConnection) -> AppResult<Vec<TaskType>> {
        Ok(TaskTypesRepo::list(conn)?)
    }

    pub fn positions(conn: &mut PgConnection) -> AppResult<Vec<Position>> {
        Ok(PositionsRepo::list(conn)?)
    }

    pub fn create_task_type(conn: &mut PgConnection, req: &CreateTaskTypeRequest) -> AppResult<TaskType> {
        validate_required_name("name", &req.name)?;
        let name = req.name.trim();
        if TaskTypesRepo::exists_by_name(conn, name)? {
            return Err(AppError::conflict_with_code(
                NAME_TAKEN,
                Some("name".to_string()),
                error_codes::TASK_TYPE_NAME_EXISTS,
            ));
        }
        conn.transaction::<_, AppError, _>(|conn| {
            TaskTypesRepo::insert(conn, name)
                .map_err(|e| AppError::unique_or(e, "name", NAME_TAKEN, error_codes::TASK_TYPE_NAME_EXISTS))
        })
    }
}
