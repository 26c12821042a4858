pub mod chat;
pub mod segmenter;
pub mod stt;
pub mod tts;

/// Default OpenAI API base URL, overridable via config for testing
pub const OPENAI_API_BASE: &str = "https://api.openai.com";

// Re-export commonly used types for convenience
pub use stt::{
    SpeechToText, SttConfig, SttError, SttProvider, SttResult, create_stt_provider,
    get_supported_stt_providers,
};

pub use tts::{
    TextToSpeech, TtsConfig, TtsError, TtsProvider, TtsResult, create_tts_provider,
    get_supported_tts_providers,
};

pub use chat::{
    ChatConfig, ChatError, ChatMessage, ChatModel, ChatProvider, ChatResult, ConversationContext,
    Role, create_chat_provider, get_supported_chat_providers,
};

pub use segmenter::{ExtractionFallback, SegmentedResponse, contains_problem_marker, segment_response};
