//! The two fixed sides of a case, and the typed submitter sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two fixed positions in a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Plaintiff,
    Defendant,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Plaintiff => Side::Defendant,
            Side::Defendant => Side::Plaintiff,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Plaintiff => "Plaintiff",
            Side::Defendant => "Defendant",
        }
    }

    /// Storage string, shared with the entity layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Plaintiff => "PLAINTIFF",
            Side::Defendant => "DEFENDANT",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who authored a submission: a real participant identity, or the automated
/// opponent. The automated opponent is a typed variant rather than a reserved
/// identifier so partitioning and ranking-exclusion logic are type-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitter {
    Human(i64),
    AutomatedOpponent,
}

impl Submitter {
    pub fn user_id(self) -> Option<i64> {
        match self {
            Submitter::Human(id) => Some(id),
            Submitter::AutomatedOpponent => None,
        }
    }

    pub fn is_automated(self) -> bool {
        matches!(self, Submitter::AutomatedOpponent)
    }
}
