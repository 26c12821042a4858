//! HTTP and WebSocket request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Health check endpoint
//! - `interview` - Interview WebSocket session handling

pub mod api;
pub mod interview;

// Re-export commonly used handlers for convenient access
pub use interview::interview_handler;
