// Greedy voice-leading optimization across a chord progression.
//
// Each chord arrives already reduced to a family of ranked voicings per
// inversion. The first chord keeps its default (best-ranked, root-position)
// selection; every later chord picks, across all of its inversions, the
// voicing closest to the previously *committed* voicing, then commits it
// before moving on.
//
// This is deliberately local and greedy, not globally optimal: an early
// commitment is never revisited in light of later chords. The engine trades
// whole-progression optimality for bounded, interactive-latency work, and
// that tradeoff is contractual.
//
// Family precomputation runs the full candidate -> search -> score -> rank
// pipeline per chord and inversion. Chords are independent of one another,
// so the precomputation fans out with rayon while an order-preserving
// collect keeps the output deterministic.

use crate::scoring::{ScoredVoicing, ScoringWeights};
use crate::search::SearchLimits;
use crate::voice_leading::compute_voice_leading;
use crate::voicing::Voicing;
use fretwork_theory::{ChordSpec, Tuning};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The ranked voicings of one inversion of one chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InversionFamily {
    /// Inversion number (0 = root position).
    pub inversion: usize,
    /// Bass pitch class this inversion targets.
    pub bass: u8,
    /// Ranked voicings, best first.
    pub voicings: Vec<ScoredVoicing>,
}

/// All inversion families of one chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordFamilies {
    pub inversions: Vec<InversionFamily>,
}

impl ChordFamilies {
    fn voicing(&self, selection: ChordSelection) -> &Voicing {
        &self.inversions[selection.inversion].voicings[selection.voicing].voicing
    }

    fn default_selection(&self) -> Option<ChordSelection> {
        self.inversions
            .iter()
            .position(|family| !family.voicings.is_empty())
            .map(|inversion| ChordSelection {
                inversion,
                voicing: 0,
            })
    }
}

/// The committed (inversion, voicing index) choice for one chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSelection {
    pub inversion: usize,
    /// Index into the inversion's ranked voicing list.
    pub voicing: usize,
}

/// Precompute the ranked voicing families of every chord and inversion.
pub fn progression_families(
    chords: &[ChordSpec],
    tuning: &Tuning,
    fret_count: u8,
    limits: &SearchLimits,
    weights: &ScoringWeights,
) -> Vec<ChordFamilies> {
    chords
        .par_iter()
        .map(|chord| ChordFamilies {
            inversions: (0..chord.inversion_count())
                .map(|n| {
                    let inverted = chord.inversion(n);
                    InversionFamily {
                        inversion: n,
                        bass: inverted.bass,
                        voicings: crate::generate_voicings_weighted(
                            &inverted.pitch_class_set(),
                            inverted.bass,
                            tuning,
                            fret_count,
                            limits,
                            weights,
                        ),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Select one voicing per chord, minimizing movement from each previously
/// committed voicing. Chords whose every inversion family is empty yield
/// `None`; the last committed voicing stays the anchor for what follows.
pub fn optimize_progression(chords: &[ChordFamilies]) -> Vec<Option<ChordSelection>> {
    let mut selections = Vec::with_capacity(chords.len());
    let mut committed: Option<(usize, ChordSelection)> = None;

    for (index, chord) in chords.iter().enumerate() {
        let selection = match &committed {
            None => chord.default_selection(),
            Some((prev_index, prev_selection)) => {
                let previous = chords[*prev_index].voicing(*prev_selection);
                best_against(chord, previous)
            }
        };
        if let Some(s) = selection {
            committed = Some((index, s));
        }
        selections.push(selection);
    }

    selections
}

/// The (inversion, voicing) of `chord` closest to `previous`. Strictly
/// better distance wins; ties keep the earlier inversion, then the better
/// rank.
fn best_against(chord: &ChordFamilies, previous: &Voicing) -> Option<ChordSelection> {
    let string_count = previous.string_count();
    let mut best: Option<(u32, ChordSelection)> = None;

    for (inversion, family) in chord.inversions.iter().enumerate() {
        for (index, scored) in family.voicings.iter().enumerate() {
            let distance =
                compute_voice_leading(previous, &scored.voicing, string_count).total_distance;
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((
                    distance,
                    ChordSelection {
                        inversion,
                        voicing: index,
                    },
                ));
            }
        }
    }

    best.map(|(_, selection)| selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn families(progression: &[&[u8]]) -> Vec<ChordFamilies> {
        let chords: Vec<ChordSpec> = progression
            .iter()
            .map(|classes| ChordSpec::new(classes.to_vec()))
            .collect();
        progression_families(
            &chords,
            &Tuning::standard_guitar(),
            5,
            &SearchLimits::default(),
            &ScoringWeights::default(),
        )
    }

    #[test]
    fn test_families_cover_every_inversion() {
        let fams = families(&[&[0, 4, 7]]);
        assert_eq!(fams.len(), 1);
        assert_eq!(fams[0].inversions.len(), 3);
        assert_eq!(fams[0].inversions[0].bass, 0);
        assert_eq!(fams[0].inversions[1].bass, 4);
        assert_eq!(fams[0].inversions[2].bass, 7);
        for family in &fams[0].inversions {
            assert!(!family.voicings.is_empty());
        }
    }

    #[test]
    fn test_first_chord_keeps_default_selection() {
        let fams = families(&[&[0, 4, 7], &[5, 9, 0]]);
        let selections = optimize_progression(&fams);
        assert_eq!(
            selections[0],
            Some(ChordSelection {
                inversion: 0,
                voicing: 0
            })
        );
        assert!(selections[1].is_some());
    }

    #[test]
    fn test_repeated_chord_moves_nowhere() {
        let fams = families(&[&[0, 4, 7], &[0, 4, 7]]);
        let selections = optimize_progression(&fams);
        let first = selections[0].unwrap();
        let second = selections[1].unwrap();
        let a = fams[0].voicing(first);
        let b = fams[1].voicing(second);
        assert_eq!(a, b);
        assert_eq!(compute_voice_leading(a, b, 6).total_distance, 0);
    }

    #[test]
    fn test_smoothing_never_moves_farther_than_default() {
        // Against the committed C voicing, the smoothed F choice must be at
        // least as close as F's own default selection would be.
        let fams = families(&[&[0, 4, 7], &[5, 9, 0]]);
        let selections = optimize_progression(&fams);
        let c = fams[0].voicing(selections[0].unwrap());
        let chosen = fams[1].voicing(selections[1].unwrap());
        let default = fams[1].voicing(fams[1].default_selection().unwrap());
        let chosen_distance = compute_voice_leading(c, chosen, 6).total_distance;
        let default_distance = compute_voice_leading(c, default, 6).total_distance;
        assert!(chosen_distance <= default_distance);
    }

    #[test]
    fn test_unvoicable_chord_is_skipped_and_anchor_carries() {
        let mut fams = families(&[&[0, 4, 7], &[0, 4, 7], &[0, 4, 7]]);
        // Make the middle chord unvoicable
        for family in &mut fams[1].inversions {
            family.voicings.clear();
        }
        let selections = optimize_progression(&fams);
        assert!(selections[0].is_some());
        assert_eq!(selections[1], None);
        // Third chord still smooths against the first chord's commitment
        let a = fams[0].voicing(selections[0].unwrap());
        let c = fams[2].voicing(selections[2].unwrap());
        assert_eq!(compute_voice_leading(a, c, 6).total_distance, 0);
    }

    #[test]
    fn test_empty_progression() {
        assert!(optimize_progression(&[]).is_empty());
    }

    #[test]
    fn test_precomputation_is_deterministic() {
        let a = families(&[&[0, 4, 7], &[5, 9, 0], &[7, 11, 2]]);
        let b = families(&[&[0, 4, 7], &[5, 9, 0], &[7, 11, 2]]);
        assert_eq!(a, b);
    }
}
