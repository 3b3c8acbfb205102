// The finalized playable result of a voicing search.
//
// A Voicing is the set of sounded (string, fret, pitch) notes of one
// fingering, muted strings excluded, plus the derived shape properties the
// scorer and the ranker need: min/max fretted fret, fret span, barre runs,
// and the conventional dash-separated fret pattern ("x-3-2-0-1-0", string 0
// first).
//
// Voicings are immutable once built; every derived property is recomputed
// from the note list, which keeps the type trivially serializable.

use fretwork_theory::Tuning;
use serde::{Deserialize, Serialize};

/// One sounded note of a voicing. Fret 0 is an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedNote {
    /// String index, 0 = lowest-pitched string.
    pub string: usize,
    /// Fret number, 0 = open.
    pub fret: u8,
    /// Sounding MIDI pitch.
    pub pitch: u8,
}

/// A maximal run of two or more consecutive strings fretted at the same
/// non-zero fret. Collapses to a single finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barre {
    pub fret: u8,
    /// First (lowest-index) string of the run.
    pub from_string: usize,
    /// Last string of the run, inclusive.
    pub to_string: usize,
}

impl Barre {
    pub fn string_count(&self) -> usize {
        self.to_string - self.from_string + 1
    }
}

/// A specific fretted realization of a chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voicing {
    string_count: usize,
    /// Sounded notes in ascending string order. Strings absent here are
    /// muted.
    notes: Vec<PlayedNote>,
}

impl Voicing {
    /// Build a voicing from sounded notes. Notes are kept in ascending
    /// string order.
    pub fn new(string_count: usize, mut notes: Vec<PlayedNote>) -> Self {
        notes.sort_by_key(|n| n.string);
        Voicing {
            string_count,
            notes,
        }
    }

    pub fn string_count(&self) -> usize {
        self.string_count
    }

    pub fn notes(&self) -> &[PlayedNote] {
        &self.notes
    }

    pub fn sounded_count(&self) -> usize {
        self.notes.len()
    }

    /// Fret of a string: `None` for muted, `Some(0)` for open.
    pub fn fret_of(&self, string: usize) -> Option<u8> {
        self.notes
            .iter()
            .find(|n| n.string == string)
            .map(|n| n.fret)
    }

    /// Sounding pitch of a string, or `None` if muted.
    pub fn sounding_pitch(&self, string: usize) -> Option<u8> {
        self.notes
            .iter()
            .find(|n| n.string == string)
            .map(|n| n.pitch)
    }

    /// The lowest sounded note (on the lowest-index sounded string).
    pub fn bass_note(&self) -> Option<PlayedNote> {
        self.notes.first().copied()
    }

    /// Lowest fretted (non-open) fret, if any string is fretted.
    pub fn min_fret(&self) -> Option<u8> {
        self.notes.iter().filter(|n| n.fret > 0).map(|n| n.fret).min()
    }

    /// Highest fretted (non-open) fret, if any string is fretted.
    pub fn max_fret(&self) -> Option<u8> {
        self.notes.iter().filter(|n| n.fret > 0).map(|n| n.fret).max()
    }

    /// Distance in frets between the lowest and highest fretted note.
    /// 0 when fewer than two notes are fretted.
    pub fn fret_span(&self) -> u8 {
        match (self.min_fret(), self.max_fret()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0,
        }
    }

    /// Number of open strings used.
    pub fn open_count(&self) -> usize {
        self.notes.iter().filter(|n| n.fret == 0).count()
    }

    /// Detect barres: maximal runs of >= 2 consecutive strings sharing one
    /// non-zero fret. Muted and open strings break a run.
    pub fn barres(&self) -> Vec<Barre> {
        let mut barres = Vec::new();
        let mut run_start = 0usize;
        while run_start < self.notes.len() {
            let start = self.notes[run_start];
            let mut run_end = run_start;
            if start.fret > 0 {
                while run_end + 1 < self.notes.len() {
                    let next = self.notes[run_end + 1];
                    if next.fret == start.fret
                        && next.string == self.notes[run_end].string + 1
                    {
                        run_end += 1;
                    } else {
                        break;
                    }
                }
            }
            if run_end > run_start {
                barres.push(Barre {
                    fret: start.fret,
                    from_string: start.string,
                    to_string: self.notes[run_end].string,
                });
            }
            run_start = run_end + 1;
        }
        barres
    }

    /// Fingers needed: one per barre plus one per fretted string outside a
    /// barre. Open and muted strings cost nothing.
    pub fn finger_count(&self) -> usize {
        let barres = self.barres();
        let barred = |string: usize| {
            barres
                .iter()
                .any(|b| (b.from_string..=b.to_string).contains(&string))
        };
        let single_fingers = self
            .notes
            .iter()
            .filter(|n| n.fret > 0 && !barred(n.string))
            .count();
        barres.len() + single_fingers
    }

    /// The conventional dash-separated fret pattern, string 0 first, `x`
    /// for muted strings: `"x-3-2-0-1-0"`.
    pub fn pattern(&self) -> String {
        (0..self.string_count)
            .map(|s| match self.fret_of(s) {
                Some(fret) => fret.to_string(),
                None => "x".to_string(),
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Parse a dash-separated fret pattern against a tuning. Returns `None`
    /// if the token count does not match the string count, a token is
    /// neither `x` nor a fret number, or a fret has no sounding pitch in
    /// MIDI range.
    pub fn from_pattern(pattern: &str, tuning: &Tuning) -> Option<Voicing> {
        let tokens: Vec<&str> = pattern.split('-').collect();
        if tokens.len() != tuning.string_count() {
            return None;
        }
        let mut notes = Vec::new();
        for (string, token) in tokens.iter().enumerate() {
            if token.eq_ignore_ascii_case("x") {
                continue;
            }
            let fret: u8 = token.parse().ok()?;
            let pitch = tuning.open_pitch(string).checked_add(fret)?;
            notes.push(PlayedNote {
                string,
                fret,
                pitch,
            });
        }
        Some(Voicing::new(tuning.string_count(), notes))
    }
}
