use crate::db::models::employee::AuthEmployee;

/// Caller identity handed to every scoped service call.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    pub employee_id: i32,
}

impl From<&AuthEmployee> for RequestContext {
    fn from(employee: &AuthEmployee) -> Self {
        Self {
            employee_id: employee.id,
        }
    }
}
