use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/schedule", post(handlers::schedule::schedule))
        .route("/availability", get(handlers::availability::get_availability))
        .route(
            "/appointment-types",
            get(handlers::availability::get_appointment_types),
        );

    Router::new()
        .route("/", get(handlers::info::root))
        .route("/health", get(handlers::info::health))
        .nest("/api/v1", api)
        .with_state(state)
}
