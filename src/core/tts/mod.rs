pub mod base;
pub mod openai;

// Re-export public types and traits
pub use base::{TextToSpeech, TtsConfig, TtsError, TtsResult};
pub use openai::{OPENAI_TTS_PATH, OpenAiTts, OpenAiVoice};

/// Supported TTS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtsProvider {
    /// OpenAI TTS REST API
    OpenAI,
}

impl std::fmt::Display for TtsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsProvider::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for TtsProvider {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(TtsProvider::OpenAI),
            _ => Err(TtsError::InvalidConfiguration(format!(
                "Unsupported TTS provider: {s}. Supported providers: openai"
            ))),
        }
    }
}

/// Factory function to create TTS providers by name
///
/// # Arguments
/// * `provider` - The name of the TTS provider (e.g., "openai")
/// * `config` - Configuration for the TTS provider
pub fn create_tts_provider(
    provider: &str,
    config: TtsConfig,
) -> Result<Box<dyn TextToSpeech>, TtsError> {
    match provider.parse::<TtsProvider>()? {
        TtsProvider::OpenAI => Ok(Box::new(OpenAiTts::new(config)?)),
    }
}

/// Get a list of all supported TTS providers
pub fn get_supported_tts_providers() -> Vec<&'static str> {
    vec!["openai"]
}
