//! Environment variable loading.
//!
//! Every configuration field has an environment variable form. Values set
//! here are the base layer; a YAML file, when given, overrides them.

use std::path::PathBuf;

use super::{EnvConfig, TlsConfig};

/// Read a boolean environment variable, treating "1", "true", "yes", and
/// "on" (case-insensitive) as true
fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// Load configuration from environment variables
pub fn load_env_config() -> Result<EnvConfig, Box<dyn std::error::Error>> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("PORT") {
        Ok(value) => value
            .parse::<u16>()
            .map_err(|_| format!("Invalid PORT value: {value}"))?,
        Err(_) => 8000,
    };

    // TLS requires both paths; one without the other is a misconfiguration
    let cert_path = std::env::var("TLS_CERT_PATH").ok();
    let key_path = std::env::var("TLS_KEY_PATH").ok();
    let tls = match (cert_path, key_path) {
        (Some(cert), Some(key)) => Some(TlsConfig {
            cert_path: PathBuf::from(cert),
            key_path: PathBuf::from(key),
        }),
        (None, None) => None,
        _ => {
            return Err(
                "TLS_CERT_PATH and TLS_KEY_PATH must both be set to enable TLS".into(),
            );
        }
    };

    let turn_pacing_ms = match std::env::var("TURN_PACING_MS") {
        Ok(value) => Some(
            value
                .parse::<u64>()
                .map_err(|_| format!("Invalid TURN_PACING_MS value: {value}"))?,
        ),
        Err(_) => None,
    };

    let idle_timeout_secs = match std::env::var("IDLE_TIMEOUT_SECS") {
        Ok(value) => Some(
            value
                .parse::<u64>()
                .map_err(|_| format!("Invalid IDLE_TIMEOUT_SECS value: {value}"))?,
        ),
        Err(_) => None,
    };

    Ok(EnvConfig {
        host,
        port,
        tls,
        openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
        openai_api_base: std::env::var("OPENAI_API_BASE").ok(),
        chat_model: std::env::var("CHAT_MODEL").ok(),
        stt_model: std::env::var("STT_MODEL").ok(),
        tts_model: std::env::var("TTS_MODEL").ok(),
        tts_voice: std::env::var("TTS_VOICE").ok(),
        greeting: std::env::var("GREETING_TEXT").ok(),
        prompt_path: std::env::var("INTERVIEW_PROMPT_PATH").ok().map(PathBuf::from),
        turn_pacing_ms,
        confidence_analysis: env_bool("CONFIDENCE_ANALYSIS"),
        extraction_fallback: std::env::var("EXTRACTION_FALLBACK").ok(),
        turn_failure: std::env::var("TURN_FAILURE").ok(),
        idle_timeout_secs,
        cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS").ok(),
    })
}
