//! Interview WebSocket session handling

pub mod handler;
pub mod messages;

pub use handler::interview_handler;
pub use messages::{MessageRoute, OutgoingFrame, TypedFrame, parse_typed_answer};
