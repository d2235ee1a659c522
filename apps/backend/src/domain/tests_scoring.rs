use crate::domain::scoring::{settlement_deltas, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
use crate::domain::side::Side;
use crate::domain::verdict::CategoryScores;

#[test]
fn winner_takes_ten_loser_takes_three() {
    let [(w_side, w), (l_side, l)] = settlement_deltas(Some(Side::Plaintiff));
    assert_eq!(w_side, Side::Plaintiff);
    assert_eq!(w.score, WIN_SCORE);
    assert_eq!(w.won, Some(true));
    assert_eq!(l_side, Side::Defendant);
    assert_eq!(l.score, LOSS_SCORE);
    assert_eq!(l.won, Some(false));
}

#[test]
fn defendant_win_mirrors_the_policy() {
    let [(w_side, w), (l_side, l)] = settlement_deltas(Some(Side::Defendant));
    assert_eq!(w_side, Side::Defendant);
    assert_eq!(w.won, Some(true));
    assert_eq!(l_side, Side::Plaintiff);
    assert_eq!(l.won, Some(false));
}

#[test]
fn draw_awards_five_each_with_no_counts() {
    for (_, delta) in settlement_deltas(None) {
        assert_eq!(delta.score, DRAW_SCORE);
        assert_eq!(delta.won, None);
    }
}

#[test]
fn category_scores_clamp_to_one_hundred() {
    let scores = CategoryScores::new(250, 99, 101).clamped();
    assert_eq!(scores.legal_accuracy, 100);
    assert_eq!(scores.evidence_strength, 99);
    assert_eq!(scores.persuasion, 100);
}

#[test]
fn headline_is_the_rounded_category_mean() {
    assert_eq!(CategoryScores::new(80, 70, 60).headline(), 70);
    assert_eq!(CategoryScores::new(100, 100, 100).headline(), 100);
    assert_eq!(CategoryScores::new(0, 0, 0).headline(), 0);
    // 66.67 rounds up
    assert_eq!(CategoryScores::new(66, 67, 67).headline(), 67);
}
