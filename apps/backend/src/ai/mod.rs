//! External collaborator clients: argument generation, adjudication, and
//! audio transcription.
//!
//! The engine only ever talks to these through the traits in `trait_def`;
//! the OpenAI-compatible client is the production implementation and the
//! scripted one serves tests and offline development.

pub mod config;
pub mod openai;
pub mod prompts;
pub mod scripted;
pub mod trait_def;

use std::sync::Arc;

pub use config::AiConfig;
pub use openai::OpenAiClient;
pub use scripted::{ScriptedAdjudicator, ScriptedGenerator, ScriptedTranscriber};
pub use trait_def::{Adjudicator, AiError, ArgumentGenerator, CaseBrief, Transcriber};

/// Shared handles to the three collaborators, carried in AppState.
#[derive(Clone)]
pub struct AiHandles {
    pub generator: Arc<dyn ArgumentGenerator>,
    pub adjudicator: Arc<dyn Adjudicator>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl AiHandles {
    /// One OpenAI-compatible client backing all three collaborators.
    pub fn openai(config: AiConfig) -> Self {
        let client = Arc::new(OpenAiClient::new(config));
        Self {
            generator: client.clone(),
            adjudicator: client.clone(),
            transcriber: client,
        }
    }

    /// Deterministic in-process collaborators for tests and offline runs.
    pub fn scripted() -> Self {
        Self {
            generator: Arc::new(ScriptedGenerator::new()),
            adjudicator: Arc::new(ScriptedAdjudicator::favoring(
                crate::domain::Side::Plaintiff,
            )),
            transcriber: Arc::new(ScriptedTranscriber::new()),
        }
    }
}
