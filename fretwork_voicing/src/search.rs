// Backtracking search over per-string candidates.
//
// Explores one candidate per string depth-first, treble string first, each
// string's fretted options in ascending fret order with the muted sentinel
// last. The enumeration order is part of the engine's contract: it decides
// which voicings exist at all once the generation cap kicks in, and it is
// the tie-break for equally-scored results. Treble-first exploration
// reaches the dense canonical grips (open C, F barre) within the default
// cap of 15, where bass-first or muted-first orders exhaust the cap on
// sparse fragments.
//
// Carried forward per branch: the pitch classes covered so far, the running
// min/max fretted fret, and a barre-aware finger count. The finger count
// only ever grows as strings are added (extending a barre run is free, a
// new fret costs one finger), so both it and the running span are sound
// pruning bounds.
//
// A complete assignment is accepted only if it sounds every target pitch
// class. Enumeration stops after `max_results` valid voicings: the
// unconstrained product of candidate lists is combinatorially explosive and
// the engine must stay within interactive latency.

use crate::candidates::{Candidate, CandidateMap};
use crate::voicing::{PlayedNote, Voicing};
use fretwork_theory::PitchClassSet;
use serde::{Deserialize, Serialize};

/// Search constraints and caps, with documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum fingers a voicing may need. `None` = unconstrained.
    pub max_fingers: Option<u8>,
    /// Maximum fret span (max fretted - min fretted). `None` = unconstrained.
    pub max_span: Option<u8>,
    /// Stop enumerating after this many valid voicings.
    pub max_results: usize,
    /// Offer open strings as candidates.
    pub allow_open: bool,
    /// Lowest fret considered for fretted candidates (the fret window
    /// start). Fret 0 is governed solely by `allow_open`.
    pub min_fret: u8,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_fingers: None,
            max_span: None,
            max_results: 15,
            allow_open: true,
            min_fret: 1,
        }
    }
}

/// Branch state carried through the descent. Cheap to copy; every field is
/// a few bytes.
#[derive(Clone, Copy)]
struct BranchState {
    covered: PitchClassSet,
    min_fret: Option<u8>,
    max_fret: Option<u8>,
    fingers: u8,
    /// Non-zero fret of the string just above, if it is fretted. Tracks
    /// whether the next same-fret choice extends a barre run.
    fret_above: Option<u8>,
}

struct Searcher<'a> {
    map: &'a CandidateMap,
    target: &'a PitchClassSet,
    limits: &'a SearchLimits,
    chosen: Vec<Candidate>,
    results: Vec<Voicing>,
}

impl Searcher<'_> {
    /// Assign string `next - 1`; `next == 0` means the assignment is
    /// complete. Returns true once the generation cap is reached.
    fn descend(&mut self, next: usize, state: BranchState) -> bool {
        if next == 0 {
            return self.accept(state);
        }
        let string = next - 1;
        for candidate in self.map[string].clone() {
            let mut st = state;
            match candidate {
                Candidate::Muted => {
                    st.fret_above = None;
                }
                Candidate::Fretted { fret: 0, pitch } => {
                    st.covered.insert(pitch % 12);
                    st.fret_above = None;
                }
                Candidate::Fretted { fret, pitch } => {
                    st.covered.insert(pitch % 12);
                    st.min_fret = Some(st.min_fret.map_or(fret, |f| f.min(fret)));
                    st.max_fret = Some(st.max_fret.map_or(fret, |f| f.max(fret)));
                    let span_exceeded = match (self.limits.max_span, st.min_fret, st.max_fret) {
                        (Some(max_span), Some(lo), Some(hi)) => hi - lo > max_span,
                        _ => false,
                    };
                    if span_exceeded {
                        continue;
                    }
                    if st.fret_above != Some(fret) {
                        st.fingers += 1;
                    }
                    if self.limits.max_fingers.is_some_and(|m| st.fingers > m) {
                        continue;
                    }
                    st.fret_above = Some(fret);
                }
            }
            self.chosen[string] = candidate;
            if self.descend(string, st) {
                return true;
            }
        }
        false
    }

    fn accept(&mut self, state: BranchState) -> bool {
        if !state.covered.is_superset_of(self.target) {
            return false;
        }
        let notes = self
            .chosen
            .iter()
            .enumerate()
            .filter_map(|(string, candidate)| match candidate {
                Candidate::Fretted { fret, pitch } => Some(PlayedNote {
                    string,
                    fret: *fret,
                    pitch: *pitch,
                }),
                Candidate::Muted => None,
            })
            .collect();
        self.results.push(Voicing::new(self.map.len(), notes));
        self.results.len() >= self.limits.max_results
    }
}

/// Enumerate every coverage-satisfying assignment, in deterministic
/// depth-first order, up to `max_results`.
///
/// An empty target set or an empty candidate map yields an empty result,
/// never an error: "no playable voicing" is a normal outcome.
pub fn enumerate_voicings(
    map: &CandidateMap,
    target: &PitchClassSet,
    limits: &SearchLimits,
) -> Vec<Voicing> {
    if target.is_empty() || map.is_empty() || limits.max_results == 0 {
        return Vec::new();
    }
    let mut searcher = Searcher {
        map,
        target,
        limits,
        chosen: vec![Candidate::Muted; map.len()],
        results: Vec::new(),
    };
    searcher.descend(
        map.len(),
        BranchState {
            covered: PitchClassSet::empty(),
            min_fret: None,
            max_fret: None,
            fingers: 0,
            fret_above: None,
        },
    );
    searcher.results
}
