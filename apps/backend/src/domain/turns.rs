//! Turn indication: which side is expected to act next in a stage.
//!
//! This is an indication for participants (and the trigger condition for the
//! automated opponent), not an admission gate; both sides must submit in
//! every argued stage before the case advances.

use crate::domain::side::Side;
use crate::domain::stage::Stage;

/// Which side is expected to act next, given per-side submission completeness
/// for the current stage. `None` means nobody owes an indicated turn.
///
/// Stage policy:
/// - Opening and closing: plaintiff speaks first, then defendant.
/// - Plaintiff case presentation: only the plaintiff is ever indicated.
/// - Cross-examination: whichever side has not yet submitted, opening with
///   the defendant when neither has (the responding side opens).
/// - Defendant case presentation: only the defendant is ever indicated.
pub fn whose_turn(
    stage: Stage,
    plaintiff_submitted: bool,
    defendant_submitted: bool,
) -> Option<Side> {
    match stage {
        Stage::OpeningStatement | Stage::ClosingSubmission => {
            if !plaintiff_submitted {
                Some(Side::Plaintiff)
            } else if !defendant_submitted {
                Some(Side::Defendant)
            } else {
                None
            }
        }
        Stage::PlaintiffArgument => {
            if !plaintiff_submitted {
                Some(Side::Plaintiff)
            } else {
                None
            }
        }
        Stage::CrossExamination => {
            if !defendant_submitted {
                Some(Side::Defendant)
            } else if !plaintiff_submitted {
                Some(Side::Plaintiff)
            } else {
                None
            }
        }
        Stage::DefendantArgument => {
            if !defendant_submitted {
                Some(Side::Defendant)
            } else {
                None
            }
        }
        Stage::Verdict => None,
    }
}
