use crate::interface_adapters::handlers::health::healthz;
use crate::interface_adapters::handlers::interactions::handle_interaction;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // The platform posts to whatever URL is registered; accept both forms.
    Router::new()
        .route("/", post(handle_interaction))
        .route("/interactions", post(handle_interaction))
        .route("/healthz", get(healthz))
        .with_state(state)
}
