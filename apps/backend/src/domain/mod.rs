//! Domain layer: pure courtroom workflow types and helpers.

pub mod scoring;
pub mod side;
pub mod stage;
pub mod transcript;
pub mod turns;
pub mod verdict;

#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_stage;
#[cfg(test)]
mod tests_transcript;
#[cfg(test)]
mod tests_turns;

// Re-exports for ergonomics
pub use side::{Side, Submitter};
pub use stage::{Stage, ARGUED_STAGES};
pub use transcript::{ArgumentContext, StageBundle, StageTranscripts, TranscriptEntry};
pub use turns::whose_turn;
pub use verdict::{AdjudicationOutcome, CategoryScores, SideScores, StageAnalysis};
