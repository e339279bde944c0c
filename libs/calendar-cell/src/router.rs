use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn calendar_routes(state: Arc<AppConfig>) -> Router {
    // Event rows carry patient details; the whole surface requires auth.
    Router::new()
        .route("/events", get(handlers::get_events))
        .route("/events", post(handlers::create_event))
        .route("/events/{event_id}", patch(handlers::update_event))
        .route("/events/{event_id}", delete(handlers::cancel_event))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
