use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn schedule_routes(state: Arc<AppConfig>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/doctors/{doctor_id}", get(handlers::list_schedules))
        .route("/doctors/{doctor_id}/slots", get(handlers::get_day_slots));

    // Protected routes: windows are managed by administrative staff
    let protected_routes = Router::new()
        .route("/doctors/{doctor_id}", post(handlers::create_schedule))
        .route("/{schedule_id}", put(handlers::update_schedule))
        .route("/{schedule_id}", delete(handlers::delete_schedule))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
