use diesel::prelude::*;

use crate::db::models::task::{NewTaskType, TaskType};

pub struct TaskTypesRepo;

impl TaskTypesRepo {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<TaskType>, diesel::result::Error> {
        use crate::schema::task_types::dsl::*;
        task_types.order(name.asc()).load::<TaskType>(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        type_id: i32,
    ) -> Result<Option<TaskType>, diesel::result::Error> {
        use crate::schema::task_types::dsl::*;
        task_types.find(type_id).first::<TaskType>(conn).optional()
    }

    pub fn exists_by_name(conn: &mut PgConnection, type_name: &str) -> Result<bool, diesel::result::Error> {
        use crate::schema::task_types::dsl::*;
        diesel::select(diesel::dsl::exists(task_types.filter(name.eq(type_name)))).get_result(conn)
    }

    pub fn insert(conn: &mut PgConnection, type_name: &str) -> Result<TaskType, diesel::result::Error> {
        diesel::insert_into(crate::schema::task_types::table)
            .values(&NewTaskType { name: type_name })
            .get_result(conn)
    }
}
