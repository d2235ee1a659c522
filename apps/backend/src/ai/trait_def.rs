//! Collaborator trait definitions.

use std::fmt;

use async_trait::async_trait;

use crate::domain::transcript::{ArgumentContext, StageBundle};
use crate::domain::verdict::AdjudicationOutcome;
use crate::domain::{Side, Stage};
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Errors that can occur during collaborator calls.
#[derive(Debug)]
pub enum AiError {
    /// Call did not complete within the configured timeout
    Timeout,
    /// The collaborator rejected or failed the call
    Upstream {
        status: Option<u16>,
        message: String,
    },
    /// The collaborator answered with something we could not interpret
    InvalidResponse(String),
    /// Local failure before/after the call
    Internal(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Timeout => write!(f, "collaborator call timed out"),
            AiError::Upstream { status, message } => match status {
                Some(code) => write!(f, "collaborator error ({code}): {message}"),
                None => write!(f, "collaborator error: {message}"),
            },
            AiError::InvalidResponse(msg) => write!(f, "invalid collaborator response: {msg}"),
            AiError::Internal(msg) => write!(f, "collaborator client error: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        match &err {
            AiError::Internal(_) => AppError::internal(err.to_string()),
            _ => AppError::upstream(ErrorCode::UpstreamFailure, err.to_string()),
        }
    }
}

/// Case metadata handed to prompt rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseBrief {
    pub title: String,
    pub summary: String,
    pub category: String,
}

/// Produces the automated opponent's next contribution.
#[async_trait]
pub trait ArgumentGenerator: Send + Sync {
    async fn generate_argument(
        &self,
        brief: &CaseBrief,
        ctx: &ArgumentContext,
        stage: Stage,
        side: Side,
    ) -> Result<String, AiError>;
}

/// Turns the five-stage transcript bundle into a structured verdict.
#[async_trait]
pub trait Adjudicator: Send + Sync {
    async fn adjudicate(
        &self,
        brief: &CaseBrief,
        bundle: &[StageBundle; 5],
    ) -> Result<AdjudicationOutcome, AiError>;
}

/// Turns an uploaded audio reference into transcript text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_url: &str) -> Result<String, AiError>;
}
