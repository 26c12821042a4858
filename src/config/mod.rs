//! Configuration module for the interview gateway
//!
//! Handles server configuration from various sources: .env files, YAML
//! files, and environment variables. Priority: YAML > ENV vars > .env
//! values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//!
//! # Example
//! ```rust,no_run
//! use interview_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::str::FromStr;

mod env;
mod merge;
mod yaml;

use crate::core::segmenter::ExtractionFallback;

/// TLS configuration for HTTPS and WSS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// What the session loop does when a chat completion fails mid-turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnFailurePolicy {
    /// Speak a fixed recovery line and keep the session open
    #[default]
    Apologize,
    /// Close the session
    Terminate,
}

impl std::fmt::Display for TurnFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnFailurePolicy::Apologize => write!(f, "apologize"),
            TurnFailurePolicy::Terminate => write!(f, "terminate"),
        }
    }
}

impl FromStr for TurnFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apologize" => Ok(TurnFailurePolicy::Apologize),
            "terminate" => Ok(TurnFailurePolicy::Terminate),
            _ => Err(format!(
                "Unknown turn failure policy: {s}. Expected \"apologize\" or \"terminate\""
            )),
        }
    }
}

/// Intermediate configuration read from environment variables only.
/// Merged with YAML overrides to produce the final `ServerConfig`.
#[derive(Debug, Clone)]
pub(crate) struct EnvConfig {
    pub host: String,
    pub port: u16,
    pub tls: Option<TlsConfig>,
    pub openai_api_key: Option<String>,
    pub openai_api_base: Option<String>,
    pub chat_model: Option<String>,
    pub stt_model: Option<String>,
    pub tts_model: Option<String>,
    pub tts_voice: Option<String>,
    pub greeting: Option<String>,
    pub prompt_path: Option<PathBuf>,
    pub turn_pacing_ms: Option<u64>,
    pub confidence_analysis: Option<bool>,
    pub extraction_fallback: Option<String>,
    pub turn_failure: Option<String>,
    pub idle_timeout_secs: Option<u64>,
    pub cors_allowed_origins: Option<String>,
}

/// Server configuration
///
/// Contains everything needed to run the interview gateway:
/// - Server settings (host, port, TLS)
/// - OpenAI credentials and model selection
/// - Session behavior (greeting, policy prompt, pacing, failure handling)
/// - Segmenter tuning
/// - Security settings (CORS)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    /// OpenAI API key used for chat, STT (Whisper), and TTS
    pub openai_api_key: String,
    /// OpenAI API base URL, overridable for proxies and tests
    pub openai_api_base: String,

    // Model selection
    pub chat_model: String,
    pub stt_model: String,
    pub tts_model: String,
    pub tts_voice: String,

    // Session behavior
    /// Opening line spoken when a session connects
    pub greeting: String,
    /// System instruction for every chat completion, already resolved
    /// from the built-in policy or a configured prompt file
    pub interview_prompt: String,
    /// Delay after each completed turn, in milliseconds
    pub turn_pacing_ms: u64,
    /// Run the side-channel confidence scoring call on each user turn
    pub confidence_analysis: bool,
    /// Segmenter behavior when the decision rule fires but extraction fails
    pub extraction_fallback: ExtractionFallback,
    /// What to do when a chat completion fails mid-turn
    pub turn_failure: TurnFailurePolicy,
    /// Close a session after this many seconds without a client frame.
    /// 0 disables the check (the default); candidates go quiet for long
    /// stretches while they work
    pub idle_timeout_secs: u64,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,
}

/// Zeroize the API key when ServerConfig is dropped so the secret does
/// not linger in freed memory.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.openai_api_key.zeroize();
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// Note: the .env file is loaded in main.rs at application startup.
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        merge::merge_config(Some(yaml_config))
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        merge::merge_config(None)
    }

    /// Get the server address as a string in "host:port" form
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_failure_policy_from_str() {
        assert_eq!(
            "apologize".parse::<TurnFailurePolicy>().unwrap(),
            TurnFailurePolicy::Apologize
        );
        assert_eq!(
            "Terminate".parse::<TurnFailurePolicy>().unwrap(),
            TurnFailurePolicy::Terminate
        );
        assert!("retry".parse::<TurnFailurePolicy>().is_err());
    }

    #[test]
    fn test_turn_failure_policy_display_round_trips() {
        for policy in [TurnFailurePolicy::Apologize, TurnFailurePolicy::Terminate] {
            assert_eq!(policy.to_string().parse::<TurnFailurePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_address_formatting() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            tls: None,
            openai_api_key: "sk-test".to_string(),
            openai_api_base: crate::core::OPENAI_API_BASE.to_string(),
            chat_model: "gpt-4-turbo".to_string(),
            stt_model: "whisper-1".to_string(),
            tts_model: "tts-1".to_string(),
            tts_voice: "fable".to_string(),
            greeting: "Hello".to_string(),
            interview_prompt: "policy".to_string(),
            turn_pacing_ms: 1500,
            confidence_analysis: false,
            extraction_fallback: ExtractionFallback::default(),
            turn_failure: TurnFailurePolicy::default(),
            idle_timeout_secs: 0,
            cors_allowed_origins: None,
        };

        assert_eq!(config.address(), "127.0.0.1:8000");
        assert!(!config.is_tls_enabled());
    }
}
