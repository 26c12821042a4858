//! OpenAI chat completions client.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use super::base::{ChatConfig, ChatError, ChatModel, ChatResult, ConversationContext, Role};

/// Chat completions endpoint path, appended to the configured API base
pub const OPENAI_CHAT_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
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

/// OpenAI chat client implementing the `ChatModel` trait.
#[derive(Debug)]
pub struct OpenAiChat {
    config: ChatConfig,
    http_client: Client,
}

impl OpenAiChat {
    fn endpoint(&self) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), OPENAI_CHAT_PATH)
    }

    fn map_error_response(status: reqwest::StatusCode, body: &str) -> ChatError {
        let message = match serde_json::from_str::<OpenAiErrorResponse>(body) {
            Ok(parsed) => format!(
                "OpenAI API error: {} ({})",
                parsed.error.message, parsed.error.error_type
            ),
            Err(_) => format!("OpenAI API error ({status}): {body}"),
        };

        if status.as_u16() == 401 {
            ChatError::AuthenticationFailed(message)
        } else {
            ChatError::ProviderError(message)
        }
    }

    async fn request_completion(&self, messages: Vec<Value>) -> ChatResult<String> {
        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
        });
        if let Some(temperature) = self.config.temperature {
            body["temperature"] = json!(temperature);
        }

        let response = self
            .http_client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::NetworkError(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_error_response(status, &body));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::ProviderError(format!("Failed to parse response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ChatError::ProviderError("Completion response contained no content".to_string())
            })?;

        info!("Chat completion returned {} characters", content.len());
        Ok(content)
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiChat {
    fn new(config: ChatConfig) -> ChatResult<Self> {
        if config.api_key.is_empty() {
            return Err(ChatError::AuthenticationFailed(
                "API key is required for OpenAI chat".to_string(),
            ));
        }
        if config.model.is_empty() {
            return Err(ChatError::ConfigurationError(
                "Chat model must not be empty".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| ChatError::ConfigurationError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, http_client })
    }

    fn get_provider_info(&self) -> &'static str {
        "OpenAI Chat Completions"
    }

    async fn reply(
        &self,
        system_instruction: &str,
        context: &ConversationContext,
        user_text: &str,
    ) -> ChatResult<String> {
        debug!(
            "Requesting chat completion with {} history messages",
            context.len()
        );

        let mut messages = Vec::with_capacity(context.len() + 2);
        messages.push(json!({
            "role": Role::System.as_str(),
            "content": system_instruction,
        }));
        for message in context.messages() {
            messages.push(json!({
                "role": message.role.as_str(),
                "content": message.content,
            }));
        }
        messages.push(json!({
            "role": Role::User.as_str(),
            "content": user_text,
        }));

        self.request_completion(messages).await
    }

    async fn complete(&self, prompt: &str) -> ChatResult<String> {
        let messages = vec![json!({
            "role": Role::User.as_str(),
            "content": prompt,
        })];
        self.request_completion(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let config = ChatConfig {
            api_key: String::new(),
            ..Default::default()
        };

        match OpenAiChat::new(config) {
            Err(ChatError::AuthenticationFailed(msg)) => assert!(msg.contains("API key")),
            other => panic!("Expected AuthenticationFailed, got: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty_model() {
        let config = ChatConfig {
            api_key: "test-key".to_string(),
            model: String::new(),
            ..Default::default()
        };

        assert!(matches!(
            OpenAiChat::new(config),
            Err(ChatError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_base_without_double_slash() {
        let config = ChatConfig {
            api_key: "test-key".to_string(),
            api_base: "http://localhost:9000/".to_string(),
            ..Default::default()
        };

        let chat = OpenAiChat::new(config).unwrap();
        assert_eq!(chat.endpoint(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_error_mapping_401_is_authentication_failure() {
        let err = OpenAiChat::map_error_response(reqwest::StatusCode::UNAUTHORIZED, "nope");
        assert!(matches!(err, ChatError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_completion_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Hello!")
        );
    }
}
