//! Interview WebSocket message types
//!
//! The wire protocol is deliberately small: the client sends raw binary
//! audio or plain text, and the server replies with JSON text frames and
//! binary audio. Server text frames carry exactly one of two keys:
//! `text` for interviewer output and `textuser` for the echoed transcript
//! of the client's spoken answer.

use bytes::Bytes;
use serde::Serialize;

/// Outgoing JSON text frames (server -> client)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum OutgoingFrame {
    /// Interviewer output, spoken or posted
    Text { text: String },
    /// Echo of the transcript produced from the client's audio
    UserTranscript { textuser: String },
}

impl OutgoingFrame {
    pub fn text(content: impl Into<String>) -> Self {
        OutgoingFrame::Text { text: content.into() }
    }

    pub fn user_transcript(content: impl Into<String>) -> Self {
        OutgoingFrame::UserTranscript { textuser: content.into() }
    }
}

/// Messages routed through the sender task to the WebSocket
#[derive(Debug)]
pub enum MessageRoute {
    /// JSON text frame
    Outgoing(OutgoingFrame),
    /// Binary audio frame
    Audio(Bytes),
    /// Close the connection
    Close,
}

/// Interpretation of a client text frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedFrame {
    /// A typed answer to feed to the interviewer
    Answer(String),
    /// A frame the protocol does not recognize; the session re-prompts
    /// without consulting the model
    Unrecognized,
}

/// Classify a client text frame.
///
/// Plain text is an answer. A JSON object is treated as a structured
/// frame: if it carries a string `text` field the answer is taken from
/// there, otherwise the frame is unrecognized. JSON values that are not
/// objects (numbers, arrays, quoted strings) are passed through verbatim
/// as typed answers.
pub fn parse_typed_answer(raw: &str) -> TypedFrame {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => match map.get("text").and_then(|v| v.as_str()) {
            Some(text) => TypedFrame::Answer(text.to_string()),
            None => TypedFrame::Unrecognized,
        },
        _ => TypedFrame::Answer(raw.to_string()),
    }
}
