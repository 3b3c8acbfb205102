// Fretwork voicing engine
//
// Given a chord's required pitch classes and an instrument tuning, the
// engine enumerates physically playable fingerings, scores them by
// ergonomic cost, ranks them, and — across a chord sequence — picks the
// fingerings that minimize finger movement between consecutive chords.
//
// Architecture (data flows strictly left to right):
// - candidates.rs: per-string playable (fret, pitch) options + muted sentinel
// - search.rs: pruned depth-first search over the per-string candidates
// - voicing.rs: the playable result with its derived shape properties
// - scoring.rs: weighted multi-factor ergonomic cost breakdown
// - rank.rs: dedupe, sort, cap
// - voice_leading.rs: per-string movement distance between two voicings
// - progression.rs: greedy per-chord smoothing against the committed choice
//
// Every function is pure, synchronous and deterministic; the engine holds
// no state between calls, so independent invocations can run in parallel
// freely. Invalid or unsatisfiable inputs yield empty results, never
// errors: "no playable voicing found" is a normal, displayable outcome.

pub mod candidates;
pub mod progression;
pub mod rank;
pub mod scoring;
pub mod search;
pub mod voice_leading;
pub mod voicing;

pub use progression::{
    optimize_progression, progression_families, ChordFamilies, ChordSelection, InversionFamily,
};
pub use scoring::{score_voicing, ErgonomicBreakdown, ScoredVoicing, ScoringWeights};
pub use search::SearchLimits;
pub use voice_leading::{compute_voice_leading, VoiceLeadingResult};
pub use voicing::{Barre, PlayedNote, Voicing};

use candidates::build_candidate_map;
use fretwork_theory::{PitchClassSet, Tuning};
use rank::rank_voicings;
use search::enumerate_voicings;

/// Generate the ranked playable voicings of a chord, best first, with
/// custom scoring weights.
///
/// An empty pitch-class set, an empty tuning or a zero fret count yields an
/// empty list.
pub fn generate_voicings_weighted(
    pitch_classes: &PitchClassSet,
    bass: u8,
    tuning: &Tuning,
    fret_count: u8,
    limits: &SearchLimits,
    weights: &ScoringWeights,
) -> Vec<ScoredVoicing> {
    if pitch_classes.is_empty() || tuning.is_empty() || fret_count == 0 {
        return Vec::new();
    }
    let map = build_candidate_map(
        pitch_classes,
        tuning,
        fret_count,
        limits.min_fret,
        limits.allow_open,
    );
    let found = enumerate_voicings(&map, pitch_classes, limits);
    let scored = found
        .into_iter()
        .map(|voicing| {
            let breakdown = score_voicing(&voicing, bass, weights);
            ScoredVoicing { voicing, breakdown }
        })
        .collect();
    rank_voicings(scored, limits.max_results)
}

/// [`generate_voicings_weighted`] with the default weight calibration.
pub fn generate_voicings(
    pitch_classes: &PitchClassSet,
    bass: u8,
    tuning: &Tuning,
    fret_count: u8,
    limits: &SearchLimits,
) -> Vec<ScoredVoicing> {
    generate_voicings_weighted(
        pitch_classes,
        bass,
        tuning,
        fret_count,
        limits,
        &ScoringWeights::default(),
    )
}
