// Sub-modules organized by functional domain
pub mod api;
pub mod comment;
pub mod employee;
pub mod position;
pub mod project;
pub mod task;
pub mod team;

pub use api::*;
pub use comment::*;
pub use employee::*;
pub use position::*;
pub use project::*;
pub use task::*;
pub use team::*;
