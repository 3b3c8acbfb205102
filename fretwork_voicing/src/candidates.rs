// Per-string candidate enumeration.
//
// For every string of the tuning, list the playable options that sound one
// of the target pitch classes: fretted notes in ascending fret order, plus
// a trailing muted sentinel. The muted sentinel is last so that the
// depth-first search tries dense shapes before sparse fragments and the
// canonical grips land inside the generation cap.
//
// An empty target set is not an error: every list degenerates to just the
// muted sentinel and the search finds nothing downstream.

use fretwork_theory::{PitchClassSet, Tuning};
use smallvec::SmallVec;

/// One option for a single string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Fretted (or open, fret 0) note sounding `pitch`.
    Fretted { fret: u8, pitch: u8 },
    /// String not played.
    Muted,
}

/// Candidate options per string, indexed like the tuning.
pub type CandidateMap = Vec<SmallVec<[Candidate; 8]>>;

/// Enumerate the playable candidates of every string.
///
/// Fretted candidates range over `min_fret..=fret_count`; fret 0 is offered
/// only when `allow_open` is set. Every list ends with [`Candidate::Muted`],
/// so no list is ever empty.
pub fn build_candidate_map(
    target: &PitchClassSet,
    tuning: &Tuning,
    fret_count: u8,
    min_fret: u8,
    allow_open: bool,
) -> CandidateMap {
    let mut map = CandidateMap::with_capacity(tuning.string_count());
    for &open_pitch in tuning.open_pitches() {
        let mut options = SmallVec::new();
        if allow_open && target.contains(open_pitch % 12) {
            options.push(Candidate::Fretted {
                fret: 0,
                pitch: open_pitch,
            });
        }
        for fret in min_fret.max(1)..=fret_count {
            // Frets past the top of the MIDI pitch range have no sounding
            // pitch; higher frets only get higher, so stop scanning.
            let Some(pitch) = open_pitch.checked_add(fret) else {
                break;
            };
            if target.contains(pitch % 12) {
                options.push(Candidate::Fretted { fret, pitch });
            }
        }
        options.push(Candidate::Muted);
        map.push(options);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frets(options: &[Candidate]) -> Vec<Option<u8>> {
        options
            .iter()
            .map(|c| match c {
                Candidate::Fretted { fret, .. } => Some(*fret),
                Candidate::Muted => None,
            })
            .collect()
    }

    #[test]
    fn test_c_major_on_standard_guitar() {
        let target = PitchClassSet::from_classes(&[0, 4, 7]);
        let map = build_candidate_map(&target, &Tuning::standard_guitar(), 5, 1, true);
        assert_eq!(map.len(), 6);

        // Low E string: open E (pc 4) and G at fret 3 (pc 7)
        assert_eq!(frets(&map[0]), vec![Some(0), Some(3), None]);
        // A string: C at fret 3 only
        assert_eq!(frets(&map[1]), vec![Some(3), None]);
        // D string: E at 2, G at 5
        assert_eq!(frets(&map[2]), vec![Some(2), Some(5), None]);
        // G string: open G, C at 5
        assert_eq!(frets(&map[3]), vec![Some(0), Some(5), None]);
    }

    #[test]
    fn test_pitches_match_frets() {
        let target = PitchClassSet::from_classes(&[0, 4, 7]);
        let map = build_candidate_map(&target, &Tuning::standard_guitar(), 5, 1, true);
        for (string, options) in map.iter().enumerate() {
            let open = Tuning::standard_guitar().open_pitch(string);
            for option in options {
                if let Candidate::Fretted { fret, pitch } = option {
                    assert_eq!(*pitch, open + fret);
                    assert!(target.contains(pitch % 12));
                }
            }
        }
    }

    #[test]
    fn test_disallow_open_drops_fret_zero() {
        let target = PitchClassSet::from_classes(&[0, 4, 7]);
        let map = build_candidate_map(&target, &Tuning::standard_guitar(), 5, 1, false);
        // Low E string loses its open E
        assert_eq!(frets(&map[0]), vec![Some(3), None]);
    }

    #[test]
    fn test_min_fret_window() {
        let target = PitchClassSet::from_classes(&[0, 4, 7]);
        let map = build_candidate_map(&target, &Tuning::standard_guitar(), 8, 3, true);
        // D string: window 3..=8 keeps G at 5, drops E at 2; open pc (2) not
        // in the target anyway
        assert_eq!(frets(&map[2]), vec![Some(5), None]);
    }

    #[test]
    fn test_fret_count_past_midi_range_is_clipped() {
        // Mandolin's top string is E5 (76); frets beyond 255 - 76 would
        // overflow the pitch. The scan must stop, not panic.
        let target = PitchClassSet::from_classes(&[0, 4, 7]);
        let map = build_candidate_map(&target, &Tuning::mandolin(), 200, 1, true);
        for (string, options) in map.iter().enumerate() {
            let open = Tuning::mandolin().open_pitch(string);
            for option in options {
                if let Candidate::Fretted { fret, pitch } = option {
                    assert!(u32::from(open) + u32::from(*fret) <= u32::from(u8::MAX));
                    assert_eq!(*pitch, open + fret);
                }
            }
        }
    }

    #[test]
    fn test_empty_target_yields_muted_only() {
        let target = PitchClassSet::empty();
        let map = build_candidate_map(&target, &Tuning::standard_guitar(), 5, 1, true);
        for options in &map {
            assert_eq!(options.as_slice(), &[Candidate::Muted]);
        }
    }
}
