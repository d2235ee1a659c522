use crate::domain::side::Side;
use crate::domain::stage::Stage;
use crate::domain::transcript::{
    assemble_bundle, assemble_context, join_texts, TranscriptEntry, NO_SUBMISSION,
};

fn entry(stage: Stage, side: Side, text: &str) -> TranscriptEntry {
    TranscriptEntry {
        stage,
        side,
        text: text.to_string(),
    }
}

#[test]
fn context_includes_every_prior_stage_even_when_empty() {
    // Only the opening was argued; cross-examination context must still list
    // both prior stages.
    let entries = vec![
        entry(Stage::OpeningStatement, Side::Plaintiff, "p-open"),
        entry(Stage::OpeningStatement, Side::Defendant, "d-open"),
    ];

    let ctx = assemble_context(&entries, Stage::CrossExamination, Side::Defendant);

    assert_eq!(ctx.prior.len(), 2);
    assert_eq!(ctx.prior[0].stage, Stage::OpeningStatement);
    assert_eq!(ctx.prior[0].own, vec!["d-open".to_string()]);
    assert_eq!(ctx.prior[0].other, vec!["p-open".to_string()]);
    assert_eq!(ctx.prior[1].stage, Stage::PlaintiffArgument);
    assert!(ctx.prior[1].own.is_empty());
    assert!(ctx.prior[1].other.is_empty());
    assert!(ctx.current_opponent.is_empty());
}

#[test]
fn context_surfaces_current_stage_opponent_text() {
    let entries = vec![
        entry(Stage::OpeningStatement, Side::Plaintiff, "p-open"),
        entry(Stage::OpeningStatement, Side::Defendant, "d-open"),
        entry(Stage::CrossExamination, Side::Defendant, "d-cross"),
    ];

    let ctx = assemble_context(&entries, Stage::CrossExamination, Side::Plaintiff);
    assert_eq!(ctx.current_opponent, vec!["d-cross".to_string()]);
}

#[test]
fn context_ignores_stages_past_the_target() {
    let entries = vec![
        entry(Stage::OpeningStatement, Side::Plaintiff, "p-open"),
        entry(Stage::ClosingSubmission, Side::Defendant, "late"),
    ];

    let ctx = assemble_context(&entries, Stage::PlaintiffArgument, Side::Plaintiff);
    assert_eq!(ctx.prior.len(), 1);
    assert!(ctx.current_opponent.is_empty());
}

#[test]
fn partitioning_is_by_side_not_by_order() {
    // The defendant (e.g. an automated opponent) posted before the plaintiff
    // within the same stage; partitioning must not care.
    let entries = vec![
        entry(Stage::OpeningStatement, Side::Defendant, "d-first"),
        entry(Stage::OpeningStatement, Side::Plaintiff, "p-second"),
    ];

    let bundle = assemble_bundle(&entries);
    assert_eq!(bundle[0].plaintiff, vec!["p-second".to_string()]);
    assert_eq!(bundle[0].defendant, vec!["d-first".to_string()]);

    let reversed: Vec<_> = entries.iter().rev().cloned().collect();
    let bundle_rev = assemble_bundle(&reversed);
    assert_eq!(bundle_rev[0].plaintiff, bundle[0].plaintiff);
    assert_eq!(bundle_rev[0].defendant, bundle[0].defendant);
}

#[test]
fn bundle_always_has_five_sections() {
    let bundle = assemble_bundle(&[]);
    assert_eq!(bundle.len(), 5);
    for section in &bundle {
        assert!(section.plaintiff.is_empty());
        assert!(section.defendant.is_empty());
    }
}

#[test]
fn multiple_texts_per_side_keep_submission_order() {
    let entries = vec![
        entry(Stage::OpeningStatement, Side::Plaintiff, "first"),
        entry(Stage::OpeningStatement, Side::Plaintiff, "second"),
    ];

    let bundle = assemble_bundle(&entries);
    assert_eq!(
        bundle[0].plaintiff,
        vec!["first".to_string(), "second".to_string()]
    );
    assert_eq!(join_texts(&bundle[0].plaintiff), "first\n---\nsecond");
}

#[test]
fn empty_side_renders_as_no_submission() {
    assert_eq!(join_texts(&[]), NO_SUBMISSION);
}
