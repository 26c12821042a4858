use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Environment
/// variables provide the base; YAML values override them.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8000
///
/// providers:
///   openai_api_key: "sk-your-key"
///   openai_api_base: "https://api.openai.com"
///
/// models:
///   chat_model: "gpt-4-turbo"
///   stt_model: "whisper-1"
///   tts_model: "tts-1"
///   tts_voice: "fable"
///
/// session:
///   greeting: "Hello and welcome! How are you doing today?"
///   prompt_path: "/etc/interview-gateway/policy.md"
///   turn_pacing_ms: 1500
///   confidence_analysis: false
///   turn_failure: "apologize"
///   idle_timeout_secs: 0
///
/// segmenter:
///   extraction_fallback: "speak-full-response"
///
/// security:
///   cors_allowed_origins: "https://app.example.com"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub providers: Option<ProvidersYaml>,
    pub models: Option<ModelsYaml>,
    pub session: Option<SessionYaml>,
    pub segmenter: Option<SegmenterYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Provider credentials and endpoints from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    /// OpenAI API key for chat, STT (Whisper), and TTS
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL, overridable for proxies and tests
    pub openai_api_base: Option<String>,
}

/// Model selection from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ModelsYaml {
    pub chat_model: Option<String>,
    pub stt_model: Option<String>,
    pub tts_model: Option<String>,
    pub tts_voice: Option<String>,
}

/// Session behavior from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SessionYaml {
    /// Opening line spoken when a session connects
    pub greeting: Option<String>,
    /// Path to a file replacing the built-in interview policy
    pub prompt_path: Option<PathBuf>,
    /// Delay inserted after each completed turn, in milliseconds
    pub turn_pacing_ms: Option<u64>,
    /// Run the side-channel confidence scoring call on each user turn
    pub confidence_analysis: Option<bool>,
    /// What to do when a chat completion fails: "apologize" or "terminate"
    pub turn_failure: Option<String>,
    /// Close a session after this many seconds without a client frame.
    /// 0 disables the check.
    pub idle_timeout_secs: Option<u64>,
}

/// Response segmenter tuning from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SegmenterYaml {
    /// Behavior when the decision rule fires but extraction fails:
    /// "speak-full-response" or "post-full-response"
    pub extraction_fallback: Option<String>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))?;
        Ok(config)
    }
}
