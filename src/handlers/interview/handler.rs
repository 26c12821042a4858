//! Interview WebSocket handler
//!
//! Runs the interview session loop: one turn per client frame, strict
//! request/response alternation. Audio frames are transcribed, text
//! frames are taken verbatim, and every accepted answer produces a model
//! reply that is segmented into a spoken portion and, when the model
//! posts a coding question, a text-only problem statement.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use bytes::Bytes;
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::{select, time::Duration};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::TurnFailurePolicy;
use crate::core::chat::ConversationContext;
use crate::core::segmenter::{contains_problem_marker, segment_response};
use crate::prompt;
use crate::state::AppState;

use super::messages::{MessageRoute, OutgoingFrame, TypedFrame, parse_typed_answer};

/// Channel buffer size for outgoing messages
const CHANNEL_BUFFER_SIZE: usize = 64;

/// Maximum WebSocket frame size (10 MB), sized for complete audio blobs
const MAX_WS_FRAME_SIZE: usize = 10 * 1024 * 1024;

/// Maximum WebSocket message size (10 MB)
const MAX_WS_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// Stand-in wait when the idle cutoff is disabled; far enough out that
/// it never fires within a session's lifetime
const IDLE_CUTOFF_DISABLED: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Interview WebSocket handler
///
/// Upgrades the HTTP connection to a WebSocket and runs the session loop
/// until the client disconnects.
pub async fn interview_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    info!("Interview WebSocket connection upgrade requested");

    ws.max_frame_size(MAX_WS_FRAME_SIZE)
        .max_message_size(MAX_WS_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_interview_socket(socket, state))
}

/// Handle one interview WebSocket connection
async fn handle_interview_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4().to_string();
    info!(session_id = %session_id, "Interview session established");

    let (mut sender, receiver) = socket.split();
    let (message_tx, mut message_rx) = mpsc::channel::<MessageRoute>(CHANNEL_BUFFER_SIZE);

    // Sender task for outgoing messages
    let sender_task = tokio::spawn(async move {
        while let Some(route) = message_rx.recv().await {
            let should_close = matches!(route, MessageRoute::Close);

            let result = match route {
                MessageRoute::Outgoing(frame) => match serde_json::to_string(&frame) {
                    Ok(json_str) => sender.send(Message::Text(json_str.into())).await,
                    Err(e) => {
                        error!("Failed to serialize outgoing frame: {}", e);
                        continue;
                    }
                },
                MessageRoute::Audio(data) => sender.send(Message::Binary(data)).await,
                MessageRoute::Close => {
                    info!("Closing interview WebSocket connection");
                    sender.send(Message::Close(None)).await
                }
            };

            if let Err(e) = result {
                error!("Failed to send WebSocket message: {}", e);
                break;
            }

            if should_close {
                break;
            }
        }
    });

    if let Err(e) = run_session(receiver, &message_tx, &state, &session_id).await {
        warn!(session_id = %session_id, "Interview session ended with error: {e:#}");
    }

    let _ = message_tx.send(MessageRoute::Close).await;
    drop(message_tx);
    let _ = sender_task.await;

    info!(session_id = %session_id, "Interview session terminated");
}

/// Run the session loop until the client disconnects or a fatal error
/// ends the interview.
async fn run_session(
    mut receiver: SplitStream<WebSocket>,
    message_tx: &mpsc::Sender<MessageRoute>,
    state: &Arc<AppState>,
    session_id: &str,
) -> anyhow::Result<()> {
    let mut context = ConversationContext::new();

    // Opening greeting: text frame first, then its audio rendering
    speak(message_tx, state, &state.config.greeting).await?;

    // Sessions normally end on client disconnect. An idle cutoff only
    // applies when configured; the default leaves silently working
    // candidates connected indefinitely.
    let idle_timeout = match state.config.idle_timeout_secs {
        0 => IDLE_CUTOFF_DISABLED,
        secs => Duration::from_secs(secs),
    };

    loop {
        let message = select! {
            msg = receiver.next() => msg,
            _ = tokio::time::sleep(idle_timeout) => {
                warn!(session_id = %session_id, "Session idle too long, closing");
                return Ok(());
            }
        };

        let user_text = match message {
            Some(Ok(Message::Binary(audio))) => {
                match transcribe(state, session_id, audio).await {
                    Some(transcript) => {
                        send_frame(message_tx, OutgoingFrame::user_transcript(&transcript)).await?;
                        transcript
                    }
                    None => {
                        // Recognition failed; the apology becomes the turn
                        // input so the model can re-ask naturally
                        let apology = prompt::TRANSCRIPTION_APOLOGY.to_string();
                        send_frame(message_tx, OutgoingFrame::user_transcript(&apology)).await?;
                        apology
                    }
                }
            }
            Some(Ok(Message::Text(text))) => {
                debug!(session_id = %session_id, "Received typed answer: {} bytes", text.len());
                match parse_typed_answer(&text) {
                    TypedFrame::Answer(answer) => answer,
                    TypedFrame::Unrecognized => {
                        warn!(session_id = %session_id, "Unrecognized client frame");
                        send_frame(message_tx, OutgoingFrame::text(prompt::REPROMPT_TEXT)).await?;
                        continue;
                    }
                }
            }
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | None => {
                info!(session_id = %session_id, "Client closed the session");
                return Ok(());
            }
            Some(Err(e)) => {
                warn!(session_id = %session_id, "WebSocket error: {}", e);
                return Ok(());
            }
        };

        if state.config.confidence_analysis {
            analyze_confidence(state, session_id, &user_text).await;
        }

        let reply = match state
            .chat
            .reply(&state.config.interview_prompt, &context, &user_text)
            .await
        {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                error!(session_id = %session_id, "Chat completion failed: {}", e);
                match state.config.turn_failure {
                    TurnFailurePolicy::Apologize => {
                        // History is left untouched so the retried turn
                        // sees the same context
                        speak(message_tx, state, prompt::TURN_RECOVERY_TEXT).await?;
                        pace(state).await;
                        continue;
                    }
                    TurnFailurePolicy::Terminate => {
                        return Err(anyhow::anyhow!("chat completion failed: {e}"));
                    }
                }
            }
        };

        // The full reply goes into history, including any problem text
        // that is only ever posted, so the model keeps seeing it
        context.record_user(&user_text);
        context.record_assistant(&reply);

        let segmented = segment_response(&reply, state.config.extraction_fallback);

        if !segmented.spoken_text.is_empty() {
            speak(message_tx, state, &segmented.spoken_text).await?;
        }

        if let Some(problem) = segmented.posted_problem
            && contains_problem_marker(&problem)
        {
            send_frame(message_tx, OutgoingFrame::text(&problem)).await?;
        }

        pace(state).await;
    }
}

/// Send a JSON text frame through the sender task
async fn send_frame(
    message_tx: &mpsc::Sender<MessageRoute>,
    frame: OutgoingFrame,
) -> anyhow::Result<()> {
    message_tx
        .send(MessageRoute::Outgoing(frame))
        .await
        .map_err(|_| anyhow::anyhow!("sender task is gone"))
}

/// Send a text frame followed by its synthesized audio.
///
/// Synthesis failures degrade the turn to text-only; the session
/// continues.
async fn speak(
    message_tx: &mpsc::Sender<MessageRoute>,
    state: &Arc<AppState>,
    text: &str,
) -> anyhow::Result<()> {
    send_frame(message_tx, OutgoingFrame::text(text)).await?;

    match state.tts.synthesize(text).await {
        Ok(audio) => {
            message_tx
                .send(MessageRoute::Audio(audio))
                .await
                .map_err(|_| anyhow::anyhow!("sender task is gone"))?;
        }
        Err(e) => {
            warn!("Speech synthesis failed, sending text only: {}", e);
        }
    }

    Ok(())
}

/// Transcribe a client audio frame, returning None on failure
async fn transcribe(state: &Arc<AppState>, session_id: &str, audio: Bytes) -> Option<String> {
    match state.stt.transcribe(audio).await {
        Ok(transcript) => {
            info!(session_id = %session_id, "User (speech): {}", transcript);
            Some(transcript)
        }
        Err(e) => {
            error!(session_id = %session_id, "Transcription failed: {}", e);
            None
        }
    }
}

/// Run the side-channel confidence scoring call. Results are logged
/// only; failures never affect the turn.
async fn analyze_confidence(state: &Arc<AppState>, session_id: &str, user_text: &str) {
    match state.chat.complete(&prompt::confidence_prompt(user_text)).await {
        Ok(analysis) => {
            info!(session_id = %session_id, "Confidence analysis: {}", analysis);
        }
        Err(e) => {
            warn!(session_id = %session_id, "{} {}", prompt::CONFIDENCE_FALLBACK, e);
        }
    }
}

/// Fixed delay after each completed turn, keeping the conversational
/// rhythm of the interview
async fn pace(state: &Arc<AppState>) {
    let delay = state.config.turn_pacing_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}
