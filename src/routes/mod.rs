//! Route configuration

pub mod api;
pub mod ws;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Shared between main.rs and the integration tests so both serve the
/// same surface.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api::create_public_router())
        .merge(ws::create_ws_router())
        .with_state(state)
}
