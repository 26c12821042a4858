//! OpenAI TTS provider.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.openai.com/v1/audio/speech`
//! - Models: tts-1, tts-1-hd
//! - Voices: alloy, ash, coral, echo, fable, onyx, nova, sage, shimmer
//! - Output: mp3, opus, aac, flac, wav, pcm

use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::base::{TextToSpeech, TtsConfig, TtsError, TtsResult};

/// Speech synthesis endpoint path, appended to the configured API base
pub const OPENAI_TTS_PATH: &str = "/v1/audio/speech";

/// OpenAI TTS voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenAiVoice {
    #[default]
    Alloy,
    Ash,
    Coral,
    Echo,
    Fable,
    Onyx,
    Nova,
    Sage,
    Shimmer,
}

impl OpenAiVoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAiVoice::Alloy => "alloy",
            OpenAiVoice::Ash => "ash",
            OpenAiVoice::Coral => "coral",
            OpenAiVoice::Echo => "echo",
            OpenAiVoice::Fable => "fable",
            OpenAiVoice::Onyx => "onyx",
            OpenAiVoice::Nova => "nova",
            OpenAiVoice::Sage => "sage",
            OpenAiVoice::Shimmer => "shimmer",
        }
    }

    /// Parse a voice name, falling back to the default when unrecognized
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alloy" => OpenAiVoice::Alloy,
            "ash" => OpenAiVoice::Ash,
            "coral" => OpenAiVoice::Coral,
            "echo" => OpenAiVoice::Echo,
            "fable" => OpenAiVoice::Fable,
            "onyx" => OpenAiVoice::Onyx,
            "nova" => OpenAiVoice::Nova,
            "sage" => OpenAiVoice::Sage,
            "shimmer" => OpenAiVoice::Shimmer,
            other => {
                warn!("Unknown OpenAI voice '{other}', falling back to alloy");
                OpenAiVoice::default()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    error_type: String,
}

/// OpenAI TTS client implementing the `TextToSpeech` trait.
#[derive(Debug)]
pub struct OpenAiTts {
    config: TtsConfig,
    voice: OpenAiVoice,
    http_client: Client,
}

impl OpenAiTts {
    fn endpoint(&self) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), OPENAI_TTS_PATH)
    }

    fn map_error_response(status: reqwest::StatusCode, body: &str) -> TtsError {
        let message = match serde_json::from_str::<OpenAiErrorResponse>(body) {
            Ok(parsed) => format!(
                "OpenAI API error: {} ({})",
                parsed.error.message, parsed.error.error_type
            ),
            Err(_) => format!("OpenAI API error ({status}): {body}"),
        };

        if status.as_u16() == 401 {
            TtsError::AuthenticationFailed(message)
        } else {
            TtsError::ProviderError(message)
        }
    }
}

#[async_trait::async_trait]
impl TextToSpeech for OpenAiTts {
    fn new(config: TtsConfig) -> TtsResult<Self> {
        if config.api_key.is_empty() {
            return Err(TtsError::AuthenticationFailed(
                "API key is required for OpenAI TTS".to_string(),
            ));
        }
        if config.model.is_empty() {
            return Err(TtsError::InvalidConfiguration(
                "Synthesis model must not be empty".to_string(),
            ));
        }

        let voice = OpenAiVoice::from_str_or_default(&config.voice);

        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                TtsError::InvalidConfiguration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, voice, http_client })
    }

    fn get_provider_info(&self) -> &'static str {
        "OpenAI TTS"
    }

    async fn synthesize(&self, text: &str) -> TtsResult<Bytes> {
        debug!("Synthesizing {} characters with OpenAI TTS", text.len());

        let body = json!({
            "model": self.config.model,
            "input": text,
            "voice": self.voice.as_str(),
            "response_format": self.config.audio_format,
        });

        let response = self
            .http_client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TtsError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| TtsError::NetworkError(format!("Failed to read response: {e}")))?;
            return Err(Self::map_error_response(status, &body));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TtsError::NetworkError(format!("Failed to read audio body: {e}")))?;

        info!("Synthesis complete: {} bytes of audio", audio.len());
        Ok(audio)
    }
}
