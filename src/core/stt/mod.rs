pub mod base;
pub mod openai;

// Re-export public types and traits
pub use base::{SpeechToText, SttConfig, SttError, SttResult};
pub use openai::{OPENAI_STT_PATH, OpenAiStt};

/// Supported STT providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SttProvider {
    /// OpenAI Whisper STT REST API
    OpenAI,
}

impl std::fmt::Display for SttProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SttProvider::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for SttProvider {
    type Err = SttError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "whisper" => Ok(SttProvider::OpenAI),
            _ => Err(SttError::ConfigurationError(format!(
                "Unsupported STT provider: {s}. Supported providers: openai"
            ))),
        }
    }
}

/// Factory function to create STT providers by name
///
/// # Arguments
/// * `provider` - The name of the STT provider (e.g., "openai")
/// * `config` - Configuration for the STT provider
pub fn create_stt_provider(
    provider: &str,
    config: SttConfig,
) -> Result<Box<dyn SpeechToText>, SttError> {
    match provider.parse::<SttProvider>()? {
        SttProvider::OpenAI => Ok(Box::new(OpenAiStt::new(config)?)),
    }
}

/// Get a list of all supported STT providers
pub fn get_supported_stt_providers() -> Vec<&'static str> {
    vec!["openai"]
}
