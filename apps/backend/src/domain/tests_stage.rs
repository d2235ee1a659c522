use proptest::prelude::*;

use crate::domain::stage::{Stage, ARGUED_STAGES};

#[test]
fn next_walks_the_fixed_sequence() {
    assert_eq!(Stage::OpeningStatement.next(), Stage::PlaintiffArgument);
    assert_eq!(Stage::PlaintiffArgument.next(), Stage::CrossExamination);
    assert_eq!(Stage::CrossExamination.next(), Stage::DefendantArgument);
    assert_eq!(Stage::DefendantArgument.next(), Stage::ClosingSubmission);
    assert_eq!(Stage::ClosingSubmission.next(), Stage::Verdict);
}

#[test]
fn next_is_idempotent_on_terminal() {
    assert_eq!(Stage::Verdict.next(), Stage::Verdict);
    assert_eq!(Stage::Verdict.next().next(), Stage::Verdict);
}

#[test]
fn five_nexts_from_opening_reach_terminal() {
    let mut stage = Stage::OpeningStatement;
    for _ in 0..5 {
        stage = stage.next();
    }
    assert_eq!(stage, Stage::Verdict);
    assert!(stage.is_terminal());
}

#[test]
fn storage_strings_round_trip() {
    for stage in ARGUED_STAGES.into_iter().chain([Stage::Verdict]) {
        assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
    }
}

fn any_stage() -> impl Strategy<Value = Stage> {
    prop_oneof![
        Just(Stage::OpeningStatement),
        Just(Stage::PlaintiffArgument),
        Just(Stage::CrossExamination),
        Just(Stage::DefendantArgument),
        Just(Stage::ClosingSubmission),
        Just(Stage::Verdict),
    ]
}

proptest! {
    // Monotonic: stepping never moves backwards in the sequence.
    #[test]
    fn next_never_regresses(stage in any_stage()) {
        prop_assert!(stage.next().index() >= stage.index());
    }

    // Bounded: at most five steps from anywhere reaches the terminal and
    // stays there.
    #[test]
    fn next_reaches_a_fixpoint(stage in any_stage()) {
        let mut s = stage;
        for _ in 0..5 {
            s = s.next();
        }
        prop_assert_eq!(s, Stage::Verdict);
        prop_assert_eq!(s.next(), Stage::Verdict);
    }
}
