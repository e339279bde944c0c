use std::sync::Arc;

use axum::{routing::get, Router};

use account_cell::router::account_routes;
use calendar_cell::router::calendar_routes;
use prescription_cell::router::prescription_routes;
use schedule_cell::router::schedule_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "CareLink Hospital API is running!" }))
        .nest("/auth", account_routes(state.clone()))
        .nest("/schedules", schedule_routes(state.clone()))
        .nest("/calendar", calendar_routes(state.clone()))
        .nest("/prescriptions", prescription_routes(state))
}
