//! Deterministic in-process collaborators.
//!
//! Used by integration tests and offline development: no network, no
//! randomness, output derived entirely from the inputs so assertions stay
//! stable.

use async_trait::async_trait;

use crate::ai::trait_def::{
    Adjudicator, AiError, ArgumentGenerator, CaseBrief, Transcriber,
};
use crate::domain::transcript::{ArgumentContext, StageBundle};
use crate::domain::verdict::{
    AdjudicationOutcome, CategoryScores, SideScores, StageAnalysis,
};
use crate::domain::{Side, Stage};

/// Deterministic argument generator.
#[derive(Clone, Default)]
pub struct ScriptedGenerator;

impl ScriptedGenerator {
    pub const NAME: &'static str = "ScriptedGenerator";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArgumentGenerator for ScriptedGenerator {
    async fn generate_argument(
        &self,
        brief: &CaseBrief,
        ctx: &ArgumentContext,
        stage: Stage,
        side: Side,
    ) -> Result<String, AiError> {
        Ok(format!(
            "[{side} | {stage}] In the matter of \"{title}\", counsel for the {side_label} \
             responds to {n} opposing submission(s) for this stage and rests on the record \
             of {prior} prior stage(s).",
            side = side,
            stage = stage,
            title = brief.title,
            side_label = side.label(),
            n = ctx.current_opponent.len(),
            prior = ctx.prior.len(),
        ))
    }
}

/// Deterministic adjudicator with a configurable scripted outcome.
#[derive(Clone)]
pub struct ScriptedAdjudicator {
    winner: Option<Side>,
}

impl ScriptedAdjudicator {
    pub fn favoring(side: Side) -> Self {
        Self { winner: Some(side) }
    }

    pub fn draw() -> Self {
        Self { winner: None }
    }
}

#[async_trait]
impl Adjudicator for ScriptedAdjudicator {
    async fn adjudicate(
        &self,
        brief: &CaseBrief,
        bundle: &[StageBundle; 5],
    ) -> Result<AdjudicationOutcome, AiError> {
        let (plaintiff, defendant) = match self.winner {
            Some(Side::Plaintiff) => (
                CategoryScores::new(85, 80, 82),
                CategoryScores::new(60, 62, 58),
            ),
            Some(Side::Defendant) => (
                CategoryScores::new(60, 62, 58),
                CategoryScores::new(85, 80, 82),
            ),
            None => (
                CategoryScores::new(70, 70, 70),
                CategoryScores::new(70, 70, 70),
            ),
        };

        let submissions_seen: usize = bundle
            .iter()
            .map(|s| s.plaintiff.len() + s.defendant.len())
            .sum();

        Ok(AdjudicationOutcome {
            winner: self.winner,
            reasoning: format!(
                "Scripted verdict for \"{}\" over {submissions_seen} submissions.",
                brief.title
            ),
            stage_analysis: StageAnalysis {
                opening_statements: "Scripted analysis.".to_string(),
                plaintiff_case: "Scripted analysis.".to_string(),
                cross_examination: "Scripted analysis.".to_string(),
                defendant_case: "Scripted analysis.".to_string(),
                closing_submissions: "Scripted analysis.".to_string(),
            },
            citations: vec!["Scripted Authority §1".to_string()],
            scores: SideScores {
                plaintiff,
                defendant,
            },
        }
        .normalized())
    }
}

/// Deterministic transcriber.
#[derive(Clone, Default)]
pub struct ScriptedTranscriber;

impl ScriptedTranscriber {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, audio_url: &str) -> Result<String, AiError> {
        Ok(format!("Transcribed argument from {audio_url}."))
    }
}
