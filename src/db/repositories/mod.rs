pub mod comments;
pub mod employees;
pub mod membership;
pub mod positions;
pub mod projects;
pub mod task_types;
pub mod tasks;
pub mod teams;
