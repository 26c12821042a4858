//! Base trait and shared types for Text-to-Speech providers.

use bytes::Bytes;
use thiserror::Error;

/// Errors that can occur during TTS operations
#[derive(Error, Debug)]
pub enum TtsError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

pub type TtsResult<T> = Result<T, TtsError>;

/// Configuration for TTS providers
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Provider name (e.g., "openai")
    pub provider: String,
    /// API key for the provider
    pub api_key: String,
    /// Synthesis model (e.g., "tts-1")
    pub model: String,
    /// Voice name (e.g., "fable")
    pub voice: String,
    /// Output audio container (e.g., "mp3")
    pub audio_format: String,
    /// API base URL, overridable for testing
    pub api_base: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            model: "tts-1".to_string(),
            voice: "fable".to_string(),
            audio_format: "mp3".to_string(),
            api_base: crate::core::OPENAI_API_BASE.to_string(),
        }
    }
}

/// Unified interface for speech synthesis providers.
///
/// Synthesis is request/response shaped: one text in, one complete audio
/// blob out. The session loop sends the blob to the client as a single
/// binary WebSocket frame.
#[async_trait::async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Create a new provider instance from configuration
    fn new(config: TtsConfig) -> TtsResult<Self>
    where
        Self: Sized;

    /// Human-readable provider name for logging
    fn get_provider_info(&self) -> &'static str;

    /// Synthesize `text` into encoded audio bytes
    async fn synthesize(&self, text: &str) -> TtsResult<Bytes>;
}
