pub mod auth_service;
pub mod catalog_service;
pub mod comments_service;
pub mod context;
pub mod projects_service;
pub mod tasks_service;
pub mod team_members_service;
pub mod teams_service;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use comments_service::CommentsService;
pub use projects_service::ProjectsService;
pub use tasks_service::TasksService;
pub use team_members_service::TeamMembersService;
pub use teams_service::TeamsService;
