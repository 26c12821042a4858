//! Base trait and shared types for speech-to-text providers.

use bytes::Bytes;
use thiserror::Error;

use crate::core::OPENAI_API_BASE;

/// Errors that can occur during speech-to-text operations
#[derive(Debug, Error)]
pub enum SttError {
    #[error("STT authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("STT configuration error: {0}")]
    ConfigurationError(String),

    #[error("STT network error: {0}")]
    NetworkError(String),

    #[error("STT provider error: {0}")]
    ProviderError(String),
}

/// Result type for STT operations
pub type SttResult<T> = Result<T, SttError>;

/// Configuration shared by all STT providers
#[derive(Debug, Clone)]
pub struct SttConfig {
    /// Provider name (e.g. "openai")
    pub provider: String,
    /// Provider API key
    pub api_key: String,
    /// Transcription model identifier
    pub model: String,
    /// ISO language hint passed to the provider
    pub language: String,
    /// API base URL, overridable for self-hosted proxies and tests
    pub api_base: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            model: "whisper-1".to_string(),
            language: "en".to_string(),
            api_base: OPENAI_API_BASE.to_string(),
        }
    }
}

/// Unified interface for batch speech-to-text providers.
///
/// The session protocol is strict request/response alternation: one audio
/// blob in, one transcript out. Providers are constructed once and shared,
/// so implementations must be stateless across calls.
#[async_trait::async_trait]
pub trait SpeechToText: Send + Sync {
    /// Create a new provider instance from configuration
    fn new(config: SttConfig) -> SttResult<Self>
    where
        Self: Sized;

    /// Human-readable provider description
    fn get_provider_info(&self) -> &'static str;

    /// Transcribe one audio blob into text.
    ///
    /// Returns the trimmed best-effort transcript. Errors are recoverable
    /// at the call site; the session substitutes a fixed apology string.
    async fn transcribe(&self, audio: Bytes) -> SttResult<String>;
}
