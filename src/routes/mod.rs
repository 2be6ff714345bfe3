pub mod auth;
pub mod catalog;
pub mod projects;
pub mod tasks;
pub mod teams;

use crate::AppState;
use crate::middleware::auth::auth_middleware;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/register/", post(auth::register))
        .route("/login/", post(auth::login))
        .route("/password-reset/", post(auth::password_reset))
        .route("/password-reset/confirm/", post(auth::password_reset_confirm));

    let protected_routes = Router::new()
        .route("/password-change/", post(auth::password_change))
        .route("/positions/", get(catalog::list_positions))
        .route("/task-types/", get(catalog::list_task_types))
        .route("/profile/", get(auth::profile))
        .route("/profile/update/", post(auth::update_profile))
        .route("/profile/projects/", get(projects::list_projects))
        .route("/profile/teams/", get(teams::list_teams))
        .route("/profile/tasks/", get(tasks::list_tasks))
        .route("/profile/create-team/", post(teams::create_team))
        .route("/profile/create-project/", post(projects::create_project))
        .route("/profile/create-task/", post(tasks::create_task))
        .route("/profile/create-type/", post(catalog::create_task_type))
        .route("/profile/team/:team_id/", get(teams::team_detail))
        .route("/profile/team/:team_id/add-member/", post(teams::add_member))
        .route(
            "/profile/team/:team_id/delete/:member_id/",
            post(teams::remove_member),
        )
        .route("/profile/team/update/:team_id/", post(teams::update_team))
        .route("/profile/team/delete/:team_id/", post(teams::delete_team))
        .route("/profile/project/:project_id/", get(projects::project_detail))
        .route(
            "/profile/project/update/:project_id/",
            post(projects::update_project),
        )
        .route(
            "/profile/project/delete/:project_id/",
            post(projects::delete_project),
        )
        .route(
            "/profile/task/:task_id/",
            get(tasks::task_detail).post(tasks::add_comment),
        )
        .route("/profile/task/update/:task_id/", post(tasks::update_task))
        .route("/profile/task/delete/:task_id/", post(tasks::delete_task))
        .route("/profile/comment/:comment_id/", post(tasks::delete_comment))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
