//! Shared application state

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::ServerConfig;
use crate::core::chat::{ChatConfig, ChatModel, create_chat_provider};
use crate::core::stt::{SpeechToText, SttConfig, create_stt_provider};
use crate::core::tts::{TextToSpeech, TtsConfig, create_tts_provider};

/// Application state shared across all sessions.
///
/// Provider clients hold pooled HTTP connections, so one instance of
/// each serves every concurrent session. Per-session state (the
/// conversation history) lives in the session loop, not here.
pub struct AppState {
    pub config: ServerConfig,
    pub stt: Box<dyn SpeechToText>,
    pub tts: Box<dyn TextToSpeech>,
    pub chat: Box<dyn ChatModel>,
}

impl AppState {
    /// Build the application state, constructing all provider clients
    /// from the server configuration.
    pub fn new(config: ServerConfig) -> anyhow::Result<Arc<Self>> {
        let stt = create_stt_provider(
            "openai",
            SttConfig {
                api_key: config.openai_api_key.clone(),
                model: config.stt_model.clone(),
                api_base: config.openai_api_base.clone(),
                ..Default::default()
            },
        )
        .context("failed to create STT provider")?;

        let tts = create_tts_provider(
            "openai",
            TtsConfig {
                api_key: config.openai_api_key.clone(),
                model: config.tts_model.clone(),
                voice: config.tts_voice.clone(),
                api_base: config.openai_api_base.clone(),
                ..Default::default()
            },
        )
        .context("failed to create TTS provider")?;

        let chat = create_chat_provider(
            "openai",
            ChatConfig {
                api_key: config.openai_api_key.clone(),
                model: config.chat_model.clone(),
                api_base: config.openai_api_base.clone(),
                ..Default::default()
            },
        )
        .context("failed to create chat provider")?;

        info!(
            stt = stt.get_provider_info(),
            tts = tts.get_provider_info(),
            chat = chat.get_provider_info(),
            "Providers initialized"
        );

        Ok(Arc::new(Self { config, stt, tts, chat }))
    }
}
