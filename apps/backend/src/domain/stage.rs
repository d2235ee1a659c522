//! The fixed stage sequence of a case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One step of the case workflow. Five argued stages in fixed order, then the
/// terminal adjudication stage. No other transitions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    OpeningStatement,
    PlaintiffArgument,
    CrossExamination,
    DefendantArgument,
    ClosingSubmission,
    /// Terminal: no further submissions are accepted; adjudication runs here.
    Verdict,
}

/// The argued sequence, in order. `Verdict` is deliberately not part of it.
pub const ARGUED_STAGES: [Stage; 5] = [
    Stage::OpeningStatement,
    Stage::PlaintiffArgument,
    Stage::CrossExamination,
    Stage::DefendantArgument,
    Stage::ClosingSubmission,
];

impl Stage {
    /// The following stage. The last argued stage advances to `Verdict`, and
    /// `Verdict` stays put; `next` is total and idempotent on the terminal.
    pub fn next(self) -> Stage {
        match self {
            Stage::OpeningStatement => Stage::PlaintiffArgument,
            Stage::PlaintiffArgument => Stage::CrossExamination,
            Stage::CrossExamination => Stage::DefendantArgument,
            Stage::DefendantArgument => Stage::ClosingSubmission,
            Stage::ClosingSubmission => Stage::Verdict,
            Stage::Verdict => Stage::Verdict,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Verdict
    }

    /// Position in the full sequence (0-based; `Verdict` is 5).
    pub fn index(self) -> usize {
        match self {
            Stage::OpeningStatement => 0,
            Stage::PlaintiffArgument => 1,
            Stage::CrossExamination => 2,
            Stage::DefendantArgument => 3,
            Stage::ClosingSubmission => 4,
            Stage::Verdict => 5,
        }
    }

    /// Human-readable label, used in prompts and case views.
    pub fn label(self) -> &'static str {
        match self {
            Stage::OpeningStatement => "Opening Statements",
            Stage::PlaintiffArgument => "Plaintiff Case Presentation",
            Stage::CrossExamination => "Cross-examination",
            Stage::DefendantArgument => "Defendant Case Presentation",
            Stage::ClosingSubmission => "Closing Submissions",
            Stage::Verdict => "Verdict",
        }
    }

    /// Storage string, shared with the entity layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::OpeningStatement => "OPENING_STATEMENT",
            Stage::PlaintiffArgument => "PLAINTIFF_ARGUMENT",
            Stage::CrossExamination => "CROSS_EXAMINATION",
            Stage::DefendantArgument => "DEFENDANT_ARGUMENT",
            Stage::ClosingSubmission => "CLOSING_SUBMISSION",
            Stage::Verdict => "VERDICT",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPENING_STATEMENT" => Ok(Stage::OpeningStatement),
            "PLAINTIFF_ARGUMENT" => Ok(Stage::PlaintiffArgument),
            "CROSS_EXAMINATION" => Ok(Stage::CrossExamination),
            "DEFENDANT_ARGUMENT" => Ok(Stage::DefendantArgument),
            "CLOSING_SUBMISSION" => Ok(Stage::ClosingSubmission),
            "VERDICT" => Ok(Stage::Verdict),
            other => Err(format!("unknown stage: {other}")),
        }
    }
}
