//! Case flow orchestration: the progression state machine and its satellites.
//!
//! `submit_and_progress` is the single "submission occurred" entry point,
//! used by human HTTP submissions and the automated opponent's background
//! task alike. `adjudicate` is the "terminal stage and no result" entry
//! point. `handle_submission` composes them with fire-and-forget background
//! tasks; tests call the inner entry points directly.

mod adjudication;
mod opponent;
mod orchestration;
mod settlement;
mod submissions;

use crate::domain::{Stage, Submitter};

/// Case flow service.
#[derive(Default)]
pub struct CaseFlowService;

impl CaseFlowService {
    pub fn new() -> Self {
        Self
    }
}

/// One submission event.
#[derive(Debug, Clone)]
pub struct SubmitArgument {
    pub case_id: i64,
    pub submitter: Submitter,
    pub stage: Stage,
    /// Transcript text; when absent, `audio_url` is transcribed first.
    pub transcript: Option<String>,
    pub audio_url: Option<String>,
}

/// Background work owed after a submission was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// The automated opponent still owes the current stage.
    OpponentReply,
    /// The case just entered the terminal stage.
    Adjudicate,
}

/// What a submission event did to the case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub case_id: i64,
    pub submission_id: i64,
    pub stage: Stage,
    pub side: crate::domain::Side,
    pub transcript: String,
    /// `Some(stage)` when this event performed the stage transition.
    pub advanced_to: Option<Stage>,
    pub follow_up: Option<FollowUp>,
}
