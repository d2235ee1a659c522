//! Collaborator configuration, environment-variable driven.

use std::time::Duration;

use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub transcription_model: String,
    /// Per-call cap; a call that exceeds it fails with `AiError::Timeout`.
    pub request_timeout: Duration,
    /// Bounded retry count for transient failures (429 / 5xx / transport).
    pub max_retries: u32,
}

impl AiConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::config("OPENAI_API_KEY must be set"))?;

        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let chat_model =
            std::env::var("COURT_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let transcription_model = std::env::var("COURT_TRANSCRIPTION_MODEL")
            .unwrap_or_else(|_| DEFAULT_TRANSCRIPTION_MODEL.to_string());

        let timeout_secs = match std::env::var("COURT_AI_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::config(format!("COURT_AI_TIMEOUT_SECS must be a number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let max_retries = match std::env::var("COURT_AI_MAX_RETRIES") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                AppError::config(format!("COURT_AI_MAX_RETRIES must be a number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_MAX_RETRIES,
        };

        Ok(Self {
            api_key,
            base_url,
            chat_model,
            transcription_model,
            request_timeout: Duration::from_secs(timeout_secs),
            max_retries,
        })
    }
}
