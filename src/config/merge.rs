//! Merging of environment and YAML configuration layers.
//!
//! Environment variables form the base; YAML values, when present,
//! override them. Hard defaults fill anything neither layer sets.

use tracing::warn;

use super::env::load_env_config;
use super::yaml::YamlConfig;
use super::{ServerConfig, TlsConfig, TurnFailurePolicy};
use crate::core::segmenter::ExtractionFallback;
use crate::prompt;
use std::path::PathBuf;

/// Merge environment variables with optional YAML overrides into the
/// final `ServerConfig`
pub fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let env = load_env_config()?;
    let yaml = yaml.unwrap_or_default();

    let server = yaml.server.unwrap_or_default();
    let providers = yaml.providers.unwrap_or_default();
    let models = yaml.models.unwrap_or_default();
    let session = yaml.session.unwrap_or_default();
    let segmenter = yaml.segmenter.unwrap_or_default();
    let security = yaml.security.unwrap_or_default();

    let host = server.host.unwrap_or(env.host);
    let port = server.port.unwrap_or(env.port);

    let tls = match server.tls {
        Some(tls_yaml) if tls_yaml.enabled.unwrap_or(false) => {
            match (tls_yaml.cert_path, tls_yaml.key_path) {
                (Some(cert), Some(key)) => Some(TlsConfig {
                    cert_path: PathBuf::from(cert),
                    key_path: PathBuf::from(key),
                }),
                _ => {
                    return Err(
                        "TLS enabled in YAML but cert_path or key_path is missing".into()
                    );
                }
            }
        }
        Some(_) => None,
        None => env.tls,
    };

    let openai_api_key = providers
        .openai_api_key
        .or(env.openai_api_key)
        .filter(|key| !key.is_empty())
        .ok_or("OPENAI_API_KEY is required. Set it in the environment or config file.")?;

    let openai_api_base = providers
        .openai_api_base
        .or(env.openai_api_base)
        .unwrap_or_else(|| crate::core::OPENAI_API_BASE.to_string());

    let extraction_fallback = match segmenter.extraction_fallback.or(env.extraction_fallback) {
        Some(value) => value.parse::<ExtractionFallback>().map_err(|e| e.to_string())?,
        None => ExtractionFallback::default(),
    };

    let turn_failure = match session.turn_failure.or(env.turn_failure) {
        Some(value) => value.parse::<TurnFailurePolicy>()?,
        None => TurnFailurePolicy::default(),
    };

    // The prompt file, when configured, replaces the built-in policy wholesale
    let prompt_path = session.prompt_path.or(env.prompt_path);
    let interview_prompt = match prompt_path {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read interview prompt {}: {e}", path.display()))?,
        None => prompt::INTERVIEW_POLICY.to_string(),
    };

    let turn_pacing_ms = session.turn_pacing_ms.or(env.turn_pacing_ms).unwrap_or(1500);
    if turn_pacing_ms > 30_000 {
        warn!("turn_pacing_ms is unusually high ({turn_pacing_ms}ms); clients will see long gaps");
    }

    Ok(ServerConfig {
        host,
        port,
        tls,
        openai_api_key,
        openai_api_base,
        chat_model: models
            .chat_model
            .or(env.chat_model)
            .unwrap_or_else(|| "gpt-4-turbo".to_string()),
        stt_model: models
            .stt_model
            .or(env.stt_model)
            .unwrap_or_else(|| "whisper-1".to_string()),
        tts_model: models
            .tts_model
            .or(env.tts_model)
            .unwrap_or_else(|| "tts-1".to_string()),
        tts_voice: models
            .tts_voice
            .or(env.tts_voice)
            .unwrap_or_else(|| "fable".to_string()),
        greeting: session
            .greeting
            .or(env.greeting)
            .unwrap_or_else(|| prompt::DEFAULT_GREETING.to_string()),
        interview_prompt,
        turn_pacing_ms,
        confidence_analysis: session
            .confidence_analysis
            .or(env.confidence_analysis)
            .unwrap_or(false),
        extraction_fallback,
        turn_failure,
        idle_timeout_secs: session
            .idle_timeout_secs
            .or(env.idle_timeout_secs)
            .unwrap_or(0),
        cors_allowed_origins: security.cors_allowed_origins.or(env.cors_allowed_origins),
    })
}
