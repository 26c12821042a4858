//! OpenAI STT (Whisper) client.
//!
//! Whisper is a REST API, not a streaming one: each call uploads one
//! complete audio blob as a multipart form and returns the transcript.
//! That matches the session protocol exactly (one utterance per turn), so
//! no buffering layer sits between the WebSocket frame and the request.

use bytes::Bytes;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::base::{SpeechToText, SttConfig, SttError, SttResult};

/// Transcription endpoint path, appended to the configured API base
pub const OPENAI_STT_PATH: &str = "/v1/audio/transcriptions";

/// Successful transcription response (JSON format)
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// OpenAI API error envelope
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

/// OpenAI Whisper STT client implementing the `SpeechToText` trait.
#[derive(Debug)]
pub struct OpenAiStt {
    config: SttConfig,
    /// HTTP client reused across requests (connection pooling)
    http_client: Client,
}

impl OpenAiStt {
    fn endpoint(&self) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), OPENAI_STT_PATH)
    }

    fn map_error_response(status: reqwest::StatusCode, body: &str) -> SttError {
        let message = match serde_json::from_str::<OpenAiErrorResponse>(body) {
            Ok(parsed) => format!(
                "OpenAI API error: {} ({})",
                parsed.error.message, parsed.error.error_type
            ),
            Err(_) => format!("OpenAI API error ({status}): {body}"),
        };

        if status.as_u16() == 401 {
            SttError::AuthenticationFailed(message)
        } else {
            SttError::ProviderError(message)
        }
    }
}

#[async_trait::async_trait]
impl SpeechToText for OpenAiStt {
    fn new(config: SttConfig) -> SttResult<Self> {
        if config.api_key.is_empty() {
            return Err(SttError::AuthenticationFailed(
                "API key is required for OpenAI STT".to_string(),
            ));
        }
        if config.model.is_empty() {
            return Err(SttError::ConfigurationError(
                "Transcription model must not be empty".to_string(),
            ));
        }

        // Whisper can take a while on longer utterances
        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| SttError::ConfigurationError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, http_client })
    }

    fn get_provider_info(&self) -> &'static str {
        "OpenAI Whisper STT"
    }

    async fn transcribe(&self, audio: Bytes) -> SttResult<String> {
        debug!("Sending {} bytes of audio to OpenAI Whisper API", audio.len());

        let file_part = Part::bytes(audio.to_vec())
            .file_name("audio.mp3")
            .mime_str("audio/mpeg")
            .map_err(|e| SttError::ConfigurationError(format!("Invalid MIME type: {e}")))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone())
            .text("response_format", "json");

        if !self.config.language.is_empty() {
            form = form.text("language", self.config.language.clone());
        }

        let response = self
            .http_client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| SttError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SttError::NetworkError(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_error_response(status, &body));
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&body)
            .map_err(|e| SttError::ProviderError(format!("Failed to parse response: {e}")))?;

        let transcript = parsed.text.trim().to_string();
        info!("Transcription complete: {} characters", transcript.len());
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stt::SpeechToText;

    #[test]
    fn test_requires_api_key() {
        let config = SttConfig {
            api_key: String::new(),
            ..Default::default()
        };

        let result = OpenAiStt::new(config);
        assert!(result.is_err());
        match result {
            Err(SttError::AuthenticationFailed(msg)) => assert!(msg.contains("API key")),
            other => panic!("Expected AuthenticationFailed, got: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty_model() {
        let config = SttConfig {
            api_key: "test-key".to_string(),
            model: String::new(),
            ..Default::default()
        };

        assert!(matches!(
            OpenAiStt::new(config),
            Err(SttError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_base_without_double_slash() {
        let config = SttConfig {
            api_key: "test-key".to_string(),
            api_base: "http://localhost:9000/".to_string(),
            ..Default::default()
        };

        let stt = OpenAiStt::new(config).unwrap();
        assert_eq!(stt.endpoint(), "http://localhost:9000/v1/audio/transcriptions");
    }

    #[test]
    fn test_error_mapping_prefers_structured_body() {
        let body = r#"{"error":{"message":"Invalid file format","type":"invalid_request_error"}}"#;
        let err = OpenAiStt::map_error_response(reqwest::StatusCode::BAD_REQUEST, body);
        match err {
            SttError::ProviderError(msg) => {
                assert!(msg.contains("Invalid file format"));
                assert!(msg.contains("invalid_request_error"));
            }
            other => panic!("Expected ProviderError, got: {other:?}"),
        }
    }

    #[test]
    fn test_error_mapping_401_is_authentication_failure() {
        let err = OpenAiStt::map_error_response(reqwest::StatusCode::UNAUTHORIZED, "nope");
        assert!(matches!(err, SttError::AuthenticationFailed(_)));
    }
}
