//! Interview WebSocket route configuration

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::interview::interview_handler;
use crate::state::AppState;
use std::sync::Arc;

/// Create the interview WebSocket router
///
/// # Endpoint
///
/// `GET /ws` - WebSocket upgrade for the interview session
///
/// # Protocol
///
/// Immediately after upgrade the server sends the greeting as a JSON
/// text frame followed by its audio rendering as a binary frame.
///
/// Clients then send either:
/// - Binary frames containing a complete audio answer
/// - Text frames containing a typed answer
///
/// Server responds per turn with:
/// - `{"textuser": "..."}` echoing the transcript of spoken answers
/// - `{"text": "..."}` interviewer output (one or two frames)
/// - Binary audio frames for the spoken portion
pub fn create_ws_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ws", get(interview_handler))
        .layer(TraceLayer::new_for_http())
}
