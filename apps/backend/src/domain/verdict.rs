//! Structured adjudication outcome.

use serde::{Deserialize, Serialize};

use crate::domain::side::Side;

/// Free-text analysis for each argued stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAnalysis {
    pub opening_statements: String,
    pub plaintiff_case: String,
    pub cross_examination: String,
    pub defendant_case: String,
    pub closing_submissions: String,
}

/// Numeric scores for one side, each in 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub legal_accuracy: u8,
    pub evidence_strength: u8,
    pub persuasion: u8,
}

impl CategoryScores {
    pub fn new(legal_accuracy: u8, evidence_strength: u8, persuasion: u8) -> Self {
        Self {
            legal_accuracy,
            evidence_strength,
            persuasion,
        }
    }

    /// Clamp each category into 0..=100 (collaborator output is untrusted).
    pub fn clamped(self) -> Self {
        Self {
            legal_accuracy: self.legal_accuracy.min(100),
            evidence_strength: self.evidence_strength.min(100),
            persuasion: self.persuasion.min(100),
        }
    }

    /// Headline score: rounded mean of the three categories.
    pub fn headline(self) -> i16 {
        let sum =
            self.legal_accuracy as i16 + self.evidence_strength as i16 + self.persuasion as i16;
        (sum + 1) / 3
    }
}

/// Scores for both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideScores {
    pub plaintiff: CategoryScores,
    pub defendant: CategoryScores,
}

/// The full structured verdict produced by the adjudicator.
///
/// `winner: None` means a draw or an indeterminate outcome; settlement treats
/// both the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjudicationOutcome {
    pub winner: Option<Side>,
    pub reasoning: String,
    pub stage_analysis: StageAnalysis,
    pub citations: Vec<String>,
    pub scores: SideScores,
}

impl AdjudicationOutcome {
    /// Normalize untrusted collaborator output: clamp all scores.
    pub fn normalized(mut self) -> Self {
        self.scores.plaintiff = self.scores.plaintiff.clamped();
        self.scores.defendant = self.scores.defendant.clamped();
        self
    }
}
