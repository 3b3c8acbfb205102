// Voice-leading distance between two voicings.
//
// For every string index, compare the sounding pitches of the two voicings.
// Distance is measured in pitch space (semitones), not fret space, so it
// generalizes across differing tunings of the same string count. Strings
// sounded in only one of the two voicings (newly engaged or silenced) carry
// no distance and are excluded from the aggregate.

use crate::voicing::Voicing;
use serde::{Deserialize, Serialize};

/// Per-string and aggregate movement between two voicings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceLeadingResult {
    /// Semitone distance per string; `None` where fewer than both voicings
    /// sound the string.
    pub per_string: Vec<Option<u8>>,
    /// Sum of all defined per-string distances.
    pub total_distance: u32,
    /// Number of strings sounded in both voicings.
    pub common_strings: usize,
}

/// Compute the movement distance between two voicings over `string_count`
/// strings.
pub fn compute_voice_leading(a: &Voicing, b: &Voicing, string_count: usize) -> VoiceLeadingResult {
    let mut per_string = Vec::with_capacity(string_count);
    let mut total_distance = 0u32;
    let mut common_strings = 0usize;

    for string in 0..string_count {
        let distance = match (a.sounding_pitch(string), b.sounding_pitch(string)) {
            (Some(pa), Some(pb)) => {
                common_strings += 1;
                Some(pa.abs_diff(pb))
            }
            _ => None,
        };
        if let Some(d) = distance {
            total_distance += u32::from(d);
        }
        per_string.push(distance);
    }

    VoiceLeadingResult {
        per_string,
        total_distance,
        common_strings,
    }
}
