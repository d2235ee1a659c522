//! Deterministic prompt rendering for the chat-based collaborators.
//!
//! Section structure is stable regardless of how much was argued: every prior
//! stage appears, and sides without text render as "No submission." so the
//! collaborator always sees the same shape.

use std::fmt::Write as _;

use crate::ai::trait_def::CaseBrief;
use crate::domain::transcript::{join_texts, ArgumentContext, StageBundle};
use crate::domain::{Side, Stage};

/// System prompt for the automated opponent.
pub fn argument_system_prompt(brief: &CaseBrief, side: Side) -> String {
    format!(
        "You are an experienced trial lawyer arguing a {category} case. You are counsel for \
         the {side} and must follow courtroom procedure, cite relevant authority where \
         appropriate, and be strategic and persuasive. CRITICAL QUOTING RULE: you may ONLY \
         use quotation marks when quoting the EXACT words from your opponent's submission. \
         NEVER fabricate quotes or put paraphrased content inside quotation marks; if you \
         do not have the exact words, paraphrase WITHOUT quotation marks.",
        category = brief.category,
        side = side.label(),
    )
}

/// User prompt for the automated opponent's next contribution.
pub fn render_argument_prompt(
    brief: &CaseBrief,
    ctx: &ArgumentContext,
    stage: Stage,
    side: Side,
) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "You are counsel for the {} in a {} case.\n",
        side.label(),
        brief.category
    );
    let _ = writeln!(out, "Case Title: {}", brief.title);
    let _ = writeln!(out, "Case Summary: {}\n", brief.summary);

    for prior in &ctx.prior {
        let _ = writeln!(out, "{}:", prior.stage.label());
        let _ = writeln!(
            out,
            "Opponent ({}):\n{}\n",
            side.opponent().label(),
            join_texts(&prior.other)
        );
        let _ = writeln!(out, "Your previous response:\n{}\n", join_texts(&prior.own));
    }

    if !ctx.current_opponent.is_empty() {
        let _ = writeln!(out, "Current Stage ({}):", stage.label());
        let _ = writeln!(
            out,
            "Opponent's argument:\n{}\n",
            join_texts(&ctx.current_opponent)
        );
        out.push_str(
            "When you reference the opponent's argument above, quote only its exact words; \
             paraphrase everything else without quotation marks.\n\n",
        );
    }

    let _ = write!(
        out,
        "Now provide your {} as counsel for the {}. Directly address your opponent's \
         statements, reference earlier stages where useful, and keep it concise \
         (2-4 paragraphs) but persuasive.",
        stage.label(),
        side.label()
    );

    out
}

/// System prompt for the adjudicator.
pub const ADJUDICATION_SYSTEM_PROMPT: &str =
    "You are an impartial presiding judge generating strictly valid JSON.";

/// User prompt for adjudication: five labeled stage sections, then the exact
/// JSON shape the engine parses.
pub fn render_adjudication_prompt(brief: &CaseBrief, bundle: &[StageBundle; 5]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "You preside over a simulated {} case titled \"{}\".\n",
        brief.category, brief.title
    );
    out.push_str(
        "You will receive transcripts for the five stages of argument. Analyze each stage, \
         decide which side prevailed overall, and deliver your verdict strictly as valid \
         JSON with keys: winner, reasoning, stage_analysis, citations, scores. Winner must \
         be \"plaintiff\", \"defendant\", or \"draw\". Provide separate scores for BOTH \
         sides in three categories: legal_accuracy, evidence_strength and persuasion \
         (each 0-100).\n\nTranscripts:\n",
    );

    for section in bundle {
        let _ = writeln!(out, "{}:", section.stage.label());
        let _ = writeln!(out, "Plaintiff:\n{}", join_texts(&section.plaintiff));
        let _ = writeln!(out, "Defendant:\n{}\n", join_texts(&section.defendant));
    }

    out.push_str(
        r#"JSON format:
{
  "winner": "plaintiff" | "defendant" | "draw",
  "reasoning": "Detailed explanation of the outcome.",
  "stage_analysis": {
    "opening_statements": "...",
    "plaintiff_case": "...",
    "cross_examination": "...",
    "defendant_case": "...",
    "closing_submissions": "..."
  },
  "citations": ["..."],
  "scores": {
    "plaintiff": { "legal_accuracy": 0, "evidence_strength": 0, "persuasion": 0 },
    "defendant": { "legal_accuracy": 0, "evidence_strength": 0, "persuasion": 0 }
  }
}"#,
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transcript::{assemble_bundle, assemble_context, TranscriptEntry};

    fn brief() -> CaseBrief {
        CaseBrief {
            title: "Doe v. Roe".to_string(),
            summary: "A dispute over a broken fence.".to_string(),
            category: "Civil".to_string(),
        }
    }

    #[test]
    fn argument_prompt_is_stable_for_empty_history() {
        let ctx = assemble_context(&[], Stage::OpeningStatement, Side::Defendant);
        let prompt = render_argument_prompt(&brief(), &ctx, Stage::OpeningStatement, Side::Defendant);
        assert!(prompt.contains("Opening Statements"));
        assert!(prompt.contains("Defendant"));
        // No prior stages, no current-opponent section.
        assert!(!prompt.contains("Current Stage"));
    }

    #[test]
    fn adjudication_prompt_lists_all_five_stages() {
        let entries = vec![TranscriptEntry {
            stage: Stage::OpeningStatement,
            side: Side::Plaintiff,
            text: "we open".to_string(),
        }];
        let bundle = assemble_bundle(&entries);
        let prompt = render_adjudication_prompt(&brief(), &bundle);

        for stage in crate::domain::ARGUED_STAGES {
            assert!(prompt.contains(stage.label()), "missing {}", stage.label());
        }
        assert!(prompt.contains("we open"));
        // Empty sides render as the stable placeholder, never disappear.
        assert!(prompt.contains("No submission."));
    }
}
