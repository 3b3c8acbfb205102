// Ergonomic scoring: weighted evaluation of how hard a voicing is to play.
//
// Converts a finished voicing plus the intended bass pitch class into a
// cost breakdown. The total is a weighted sum of several factors:
//
// - fret span: wide grips are harder
// - finger count: barre-aware (a barre run collapses to one finger)
// - stretch evenness: uneven successive fret jumps are harder than even ones
// - string contiguity: muted strings inside the shape need picking-hand care
// - open strings: a reward (negative contribution) per open string
// - bass correctness: penalty when the lowest sounded note misses the bass
//   target (absent an explicit inversion the stated bass should anchor)
// - position: small penalty per fret of neck position, biasing low, all
//   else equal
//
// The weights are tunable parameters; only their relative orderings are
// contractual (open rewards, wrong-bass penalties dominating position bias,
// and so on). Scoring is pure and deterministic.

use crate::voicing::Voicing;
use serde::{Deserialize, Serialize};

/// Weights for the ergonomic cost factors. Tunable parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Per fret of span between lowest and highest fretted note.
    pub fret_span: f64,
    /// Per finger needed.
    pub finger_count: f64,
    /// Times the variance of successive fret gaps outside barres.
    pub stretch_evenness: f64,
    /// Per muted string strictly inside the sounded shape.
    pub string_contiguity: f64,
    /// Per open string, subtracted (a reward).
    pub open_string_bonus: f64,
    /// Flat penalty when the lowest sounded pitch class misses the bass
    /// target.
    pub bass_penalty: f64,
    /// Per fret of neck position (the lowest fretted fret).
    pub position: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            fret_span: 2.0,
            finger_count: 1.0,
            stretch_evenness: 1.5,
            string_contiguity: 2.5,
            open_string_bonus: 0.75,
            bass_penalty: 6.0,
            position: 0.1,
        }
    }
}

/// The weighted contribution of every factor, plus the total. Each field
/// already includes its weight, so the total is the plain sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ErgonomicBreakdown {
    pub fret_span: f64,
    pub finger_count: f64,
    pub stretch_evenness: f64,
    pub string_contiguity: f64,
    /// Zero or negative.
    pub open_string_bonus: f64,
    /// Zero when the bass target anchors the voicing.
    pub bass_correctness: f64,
    pub position_weight: f64,
    pub total_cost: f64,
}

impl std::fmt::Display for ErgonomicBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "span {:.1} + fingers {:.1} + stretch {:.2} + gaps {:.1} \
             + open {:.2} + bass {:.1} + pos {:.2} = {:.2}",
            self.fret_span,
            self.finger_count,
            self.stretch_evenness,
            self.string_contiguity,
            self.open_string_bonus,
            self.bass_correctness,
            self.position_weight,
            self.total_cost,
        )
    }
}

/// A voicing paired with its cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVoicing {
    pub voicing: Voicing,
    pub breakdown: ErgonomicBreakdown,
}

/// Score a voicing against the intended bass pitch class.
pub fn score_voicing(
    voicing: &Voicing,
    bass_target: u8,
    weights: &ScoringWeights,
) -> ErgonomicBreakdown {
    let barres = voicing.barres();
    let barred = |string: usize| {
        barres
            .iter()
            .any(|b| (b.from_string..=b.to_string).contains(&string))
    };

    let fret_span = weights.fret_span * f64::from(voicing.fret_span());
    let finger_count = weights.finger_count * voicing.finger_count() as f64;

    // Variance of successive fret gaps among fretted notes outside barres.
    let loose_frets: Vec<f64> = voicing
        .notes()
        .iter()
        .filter(|n| n.fret > 0 && !barred(n.string))
        .map(|n| f64::from(n.fret))
        .collect();
    let gaps: Vec<f64> = loose_frets.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let stretch_evenness = if gaps.len() < 2 {
        0.0
    } else {
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
        weights.stretch_evenness * variance
    };

    // Muted strings strictly inside the sounded shape.
    let interior_mutes = match (
        voicing.notes().first().map(|n| n.string),
        voicing.notes().last().map(|n| n.string),
    ) {
        (Some(first), Some(last)) => ((first + 1)..last)
            .filter(|&s| voicing.fret_of(s).is_none())
            .count(),
        _ => 0,
    };
    let string_contiguity = weights.string_contiguity * interior_mutes as f64;

    let open_string_bonus = -weights.open_string_bonus * voicing.open_count() as f64;

    let bass_correctness = match voicing.bass_note() {
        Some(bass) if bass.pitch % 12 == bass_target % 12 => 0.0,
        Some(_) => weights.bass_penalty,
        None => 0.0,
    };

    let position_weight =
        weights.position * f64::from(voicing.min_fret().unwrap_or(0));

    let total_cost = fret_span
        + finger_count
        + stretch_evenness
        + string_contiguity
        + open_string_bonus
        + bass_correctness
        + position_weight;

    ErgonomicBreakdown {
        fret_span,
        finger_count,
        stretch_evenness,
        string_contiguity,
        open_string_bonus,
        bass_correctness,
        position_weight,
        total_cost,
    }
}
