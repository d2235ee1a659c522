//! Transcript assembly: ordered, side-partitioned argument history.
//!
//! Pure functions over already-loaded, already-side-resolved entries. The
//! service layer resolves each submission's side from participant bindings
//! (and the case's recorded automated side), never from submission order, so
//! assembly here stays order-preserving within a side and order-independent
//! across sides.

use crate::domain::side::Side;
use crate::domain::stage::{Stage, ARGUED_STAGES};

/// Separator between multiple texts of the same side within one stage.
pub const SUBMISSION_SEPARATOR: &str = "\n---\n";

/// Placeholder rendered where a side has no text for a stage. Sections are
/// always present so the prompt structure stays stable.
pub const NO_SUBMISSION: &str = "No submission.";

/// One side-resolved submission, ordered by creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub stage: Stage,
    pub side: Side,
    pub text: String,
}

/// Per-stage history split into "own" and "other" relative to a side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTranscripts {
    pub stage: Stage,
    pub own: Vec<String>,
    pub other: Vec<String>,
}

/// Everything needed to generate one side's next contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentContext {
    /// All stages strictly before the one being argued, in stage order.
    /// Empty stages are present with empty vectors, never omitted.
    pub prior: Vec<StageTranscripts>,
    /// The opposing side's texts for the stage being argued, if any.
    pub current_opponent: Vec<String>,
}

/// Per-stage plaintiff/defendant texts for the adjudication bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBundle {
    pub stage: Stage,
    pub plaintiff: Vec<String>,
    pub defendant: Vec<String>,
}

/// Build the generation context for `for_side` arguing `upto_stage`.
///
/// Deterministic given the same entries: texts keep their input order within
/// each (stage, side) bucket, and every prior stage appears exactly once.
pub fn assemble_context(
    entries: &[TranscriptEntry],
    upto_stage: Stage,
    for_side: Side,
) -> ArgumentContext {
    let mut prior: Vec<StageTranscripts> = ARGUED_STAGES
        .iter()
        .filter(|s| s.index() < upto_stage.index())
        .map(|s| StageTranscripts {
            stage: *s,
            own: Vec::new(),
            other: Vec::new(),
        })
        .collect();

    let mut current_opponent = Vec::new();

    for entry in entries {
        if entry.stage.index() < upto_stage.index() {
            let bucket = &mut prior[entry.stage.index()];
            if entry.side == for_side {
                bucket.own.push(entry.text.clone());
            } else {
                bucket.other.push(entry.text.clone());
            }
        } else if entry.stage == upto_stage && entry.side != for_side {
            current_opponent.push(entry.text.clone());
        }
    }

    ArgumentContext {
        prior,
        current_opponent,
    }
}

/// Build the adjudication bundle: all five argued stages, each with both
/// sides' texts. Stages and sides with no submissions stay present and empty.
pub fn assemble_bundle(entries: &[TranscriptEntry]) -> [StageBundle; 5] {
    let mut bundle = ARGUED_STAGES.map(|stage| StageBundle {
        stage,
        plaintiff: Vec::new(),
        defendant: Vec::new(),
    });

    for entry in entries {
        if entry.stage.is_terminal() {
            continue;
        }
        let slot = &mut bundle[entry.stage.index()];
        match entry.side {
            Side::Plaintiff => slot.plaintiff.push(entry.text.clone()),
            Side::Defendant => slot.defendant.push(entry.text.clone()),
        }
    }

    bundle
}

/// Join one side's texts for rendering; empty becomes the stable placeholder.
pub fn join_texts(texts: &[String]) -> String {
    if texts.is_empty() {
        NO_SUBMISSION.to_string()
    } else {
        texts.join(SUBMISSION_SEPARATOR)
    }
}
