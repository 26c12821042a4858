pub mod base;
pub mod openai;

// Re-export public types and traits
pub use base::{
    ChatConfig, ChatError, ChatMessage, ChatModel, ChatResult, ConversationContext,
    MAX_CONTEXT_MESSAGES, Role,
};
pub use openai::{OPENAI_CHAT_PATH, OpenAiChat};

/// Supported chat model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatProvider {
    /// OpenAI chat completions REST API
    OpenAI,
}

impl std::fmt::Display for ChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatProvider::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for ChatProvider {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ChatProvider::OpenAI),
            _ => Err(ChatError::ConfigurationError(format!(
                "Unsupported chat provider: {s}. Supported providers: openai"
            ))),
        }
    }
}

/// Factory function to create chat providers by name
///
/// # Arguments
/// * `provider` - The name of the chat provider (e.g., "openai")
/// * `config` - Configuration for the chat provider
pub fn create_chat_provider(
    provider: &str,
    config: ChatConfig,
) -> Result<Box<dyn ChatModel>, ChatError> {
    match provider.parse::<ChatProvider>()? {
        ChatProvider::OpenAI => Ok(Box::new(OpenAiChat::new(config)?)),
    }
}

/// Get a list of all supported chat providers
pub fn get_supported_chat_providers() -> Vec<&'static str> {
    vec!["openai"]
}

#[cfg(test)]
mod factory_tests {
    use super::*;

    #[test]
    fn test_chat_provider_enum_from_string() {
        assert_eq!("openai".parse::<ChatProvider>().unwrap(), ChatProvider::OpenAI);
        assert_eq!("OpenAI".parse::<ChatProvider>().unwrap(), ChatProvider::OpenAI);
        assert!("invalid".parse::<ChatProvider>().is_err());
    }

    #[test]
    fn test_create_chat_provider_valid() {
        let config = ChatConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        };

        let chat = create_chat_provider("openai", config).unwrap();
        assert_eq!(chat.get_provider_info(), "OpenAI Chat Completions");
    }

    #[test]
    fn test_create_chat_provider_empty_api_key() {
        let result = create_chat_provider("openai", ChatConfig::default());
        assert!(matches!(result, Err(ChatError::AuthenticationFailed(_))));
    }

    #[test]
    fn test_get_supported_chat_providers() {
        assert_eq!(get_supported_chat_providers(), vec!["openai"]);
    }
}
