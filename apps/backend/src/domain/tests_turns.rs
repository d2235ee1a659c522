use crate::domain::side::Side;
use crate::domain::stage::Stage;
use crate::domain::turns::whose_turn;

// The full stage × (plaintiff_submitted, defendant_submitted) table.
// Every combination is pinned; the cross-examination asymmetry (defendant
// opens) is intentional and must not be "fixed".

#[test]
fn opening_statement_turn_table() {
    let s = Stage::OpeningStatement;
    assert_eq!(whose_turn(s, false, false), Some(Side::Plaintiff));
    assert_eq!(whose_turn(s, false, true), Some(Side::Plaintiff));
    assert_eq!(whose_turn(s, true, false), Some(Side::Defendant));
    assert_eq!(whose_turn(s, true, true), None);
}

#[test]
fn plaintiff_argument_turn_table() {
    let s = Stage::PlaintiffArgument;
    assert_eq!(whose_turn(s, false, false), Some(Side::Plaintiff));
    assert_eq!(whose_turn(s, false, true), Some(Side::Plaintiff));
    assert_eq!(whose_turn(s, true, false), None);
    assert_eq!(whose_turn(s, true, true), None);
}

#[test]
fn cross_examination_turn_table() {
    let s = Stage::CrossExamination;
    assert_eq!(whose_turn(s, false, false), Some(Side::Defendant));
    assert_eq!(whose_turn(s, false, true), Some(Side::Plaintiff));
    assert_eq!(whose_turn(s, true, false), Some(Side::Defendant));
    assert_eq!(whose_turn(s, true, true), None);
}

#[test]
fn defendant_argument_turn_table() {
    let s = Stage::DefendantArgument;
    assert_eq!(whose_turn(s, false, false), Some(Side::Defendant));
    assert_eq!(whose_turn(s, false, true), None);
    assert_eq!(whose_turn(s, true, false), Some(Side::Defendant));
    assert_eq!(whose_turn(s, true, true), None);
}

#[test]
fn closing_submission_turn_table() {
    let s = Stage::ClosingSubmission;
    assert_eq!(whose_turn(s, false, false), Some(Side::Plaintiff));
    assert_eq!(whose_turn(s, false, true), Some(Side::Plaintiff));
    assert_eq!(whose_turn(s, true, false), Some(Side::Defendant));
    assert_eq!(whose_turn(s, true, true), None);
}

#[test]
fn terminal_stage_never_indicates_a_turn() {
    for p in [false, true] {
        for d in [false, true] {
            assert_eq!(whose_turn(Stage::Verdict, p, d), None);
        }
    }
}

#[test]
fn both_submitted_is_always_none() {
    for stage in crate::domain::stage::ARGUED_STAGES {
        assert_eq!(whose_turn(stage, true, true), None);
    }
}
