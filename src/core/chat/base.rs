//! Base trait and shared types for chat model providers.

use thiserror::Error;

/// Errors that can occur during chat completion operations
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Message author role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message in a conversation transcript
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Hard cap on retained turns so a long-lived session cannot grow
/// the request payload without bound
pub const MAX_CONTEXT_MESSAGES: usize = 256;

/// Per-session conversation history.
///
/// Each WebSocket session owns exactly one context. The full model reply
/// is recorded here, not just the portion spoken to the client, so the
/// model keeps seeing the problem statements it already posted.
#[derive(Debug, Default)]
pub struct ConversationContext {
    messages: Vec<ChatMessage>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn, evicting the oldest message if at capacity
    pub fn record_user(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::user(content));
    }

    /// Append an assistant turn, evicting the oldest message if at capacity
    pub fn record_assistant(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::assistant(content));
    }

    fn push(&mut self, message: ChatMessage) {
        if self.messages.len() >= MAX_CONTEXT_MESSAGES {
            self.messages.remove(0);
        }
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Configuration for chat model providers
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Provider name (e.g., "openai")
    pub provider: String,
    /// API key for the provider
    pub api_key: String,
    /// Completion model (e.g., "gpt-4-turbo")
    pub model: String,
    /// API base URL, overridable for testing
    pub api_base: String,
    /// Sampling temperature, provider default when unset
    pub temperature: Option<f32>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            model: "gpt-4-turbo".to_string(),
            api_base: crate::core::OPENAI_API_BASE.to_string(),
            temperature: None,
        }
    }
}

/// Unified interface for hosted chat completion models.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    /// Create a new provider instance from configuration
    fn new(config: ChatConfig) -> ChatResult<Self>
    where
        Self: Sized;

    /// Human-readable provider name for logging
    fn get_provider_info(&self) -> &'static str;

    /// Produce the next assistant reply given the session's system
    /// instruction, accumulated history, and the latest user turn.
    ///
    /// The caller records the turn into `context` only after a successful
    /// reply, so a failed turn leaves the history untouched.
    async fn reply(
        &self,
        system_instruction: &str,
        context: &ConversationContext,
        user_text: &str,
    ) -> ChatResult<String>;

    /// One-off completion with no conversation history attached
    async fn complete(&self, prompt: &str) -> ChatResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_records_in_order() {
        let mut ctx = ConversationContext::new();
        ctx.record_user("hello");
        ctx.record_assistant("hi there");

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.messages()[0].role, Role::User);
        assert_eq!(ctx.messages()[0].content, "hello");
        assert_eq!(ctx.messages()[1].role, Role::Assistant);
    }

    #[test]
    fn test_context_caps_at_max_messages() {
        let mut ctx = ConversationContext::new();
        for i in 0..MAX_CONTEXT_MESSAGES + 10 {
            ctx.record_user(format!("turn {i}"));
        }

        assert_eq!(ctx.len(), MAX_CONTEXT_MESSAGES);
        // Oldest messages were evicted
        assert_eq!(ctx.messages()[0].content, "turn 10");
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
