// Shared music-theory types for the Fretwork voicing engine.
//
// The voicing engine never parses chord names or scale spellings — it only
// ever receives pre-validated pitch classes (0-11), an instrument tuning,
// and a bass target. This crate holds exactly that boundary vocabulary:
//
// - Pitch-class helpers: mod-12 arithmetic on plain MIDI pitch numbers
// - PitchClassSet: a [bool; 12] membership set for "which notes must sound"
// - Tuning: the ordered open-string pitches of a fretted instrument
// - ChordSpec: an ordered pitch-class sequence plus bass, with inversions
//
// Everything here is plain data: Copy/Clone, serde-derived, no state.

use serde::{Deserialize, Serialize};

/// The pitch class (0-11, 0 = C) of a MIDI pitch number.
pub fn pitch_class(pitch: u8) -> u8 {
    pitch % 12
}

/// Compact pitch-class name (sharp spelling where ambiguous).
pub fn pitch_class_name(pc: u8) -> &'static str {
    match pc % 12 {
        0 => "C",
        1 => "C#",
        2 => "D",
        3 => "Eb",
        4 => "E",
        5 => "F",
        6 => "F#",
        7 => "G",
        8 => "Ab",
        9 => "A",
        10 => "Bb",
        11 => "B",
        _ => unreachable!(),
    }
}

/// Compact note name with octave for a MIDI pitch (e.g. 40 -> "E2").
pub fn note_name(pitch: u8) -> String {
    format!("{}{}", pitch_class_name(pitch % 12), (pitch / 12) as i8 - 1)
}

/// A set of pitch classes, stored as a membership array indexed by pitch
/// class 0-11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchClassSet {
    classes: [bool; 12],
}

impl PitchClassSet {
    pub fn empty() -> Self {
        PitchClassSet {
            classes: [false; 12],
        }
    }

    /// Build a set from pitch classes. Values are taken mod 12.
    pub fn from_classes(classes: &[u8]) -> Self {
        let mut set = Self::empty();
        for &pc in classes {
            set.classes[(pc % 12) as usize] = true;
        }
        set
    }

    pub fn contains(&self, pc: u8) -> bool {
        self.classes[(pc % 12) as usize]
    }

    pub fn insert(&mut self, pc: u8) {
        self.classes[(pc % 12) as usize] = true;
    }

    pub fn is_empty(&self) -> bool {
        !self.classes.iter().any(|&c| c)
    }

    /// Number of distinct pitch classes in the set.
    pub fn len(&self) -> usize {
        self.classes.iter().filter(|&&c| c).count()
    }

    /// True if `self` contains every class in `other`.
    pub fn is_superset_of(&self, other: &PitchClassSet) -> bool {
        (0..12).all(|pc| !other.classes[pc] || self.classes[pc])
    }

    /// The member pitch classes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..12).filter(|&pc| self.classes[pc as usize])
    }
}

/// An instrument tuning: the open-string MIDI pitches, index 0 being the
/// lowest-pitched string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    open_strings: Vec<u8>,
}

impl Tuning {
    pub fn new(open_strings: Vec<u8>) -> Self {
        Tuning { open_strings }
    }

    /// Standard guitar: E2 A2 D3 G3 B3 E4.
    pub fn standard_guitar() -> Self {
        Tuning::new(vec![40, 45, 50, 55, 59, 64])
    }

    /// Drop-D guitar: D2 A2 D3 G3 B3 E4.
    pub fn drop_d() -> Self {
        Tuning::new(vec![38, 45, 50, 55, 59, 64])
    }

    /// DADGAD guitar: D2 A2 D3 G3 A3 D4.
    pub fn dadgad() -> Self {
        Tuning::new(vec![38, 45, 50, 55, 57, 62])
    }

    /// Open-G guitar: D2 G2 D3 G3 B3 D4.
    pub fn open_g() -> Self {
        Tuning::new(vec![38, 43, 50, 55, 59, 62])
    }

    /// Four-string bass: E1 A1 D2 G2.
    pub fn bass() -> Self {
        Tuning::new(vec![28, 33, 38, 43])
    }

    /// Mandolin: G3 D4 A4 E5.
    pub fn mandolin() -> Self {
        Tuning::new(vec![55, 62, 69, 76])
    }

    /// Look up a preset by name (as accepted by the CLI).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "standard" | "guitar" => Some(Self::standard_guitar()),
            "drop-d" | "dropd" => Some(Self::drop_d()),
            "dadgad" => Some(Self::dadgad()),
            "open-g" | "openg" => Some(Self::open_g()),
            "bass" => Some(Self::bass()),
            "mandolin" => Some(Self::mandolin()),
            _ => None,
        }
    }

    pub fn string_count(&self) -> usize {
        self.open_strings.len()
    }

    /// Open pitch of a string (0 = lowest-pitched).
    pub fn open_pitch(&self, string: usize) -> u8 {
        self.open_strings[string]
    }

    pub fn open_pitches(&self) -> &[u8] {
        &self.open_strings
    }

    pub fn is_empty(&self) -> bool {
        self.open_strings.is_empty()
    }
}

/// A chord reduced to engine inputs: its pitch classes in chord-tone order
/// (root first) and the intended bass pitch class.
///
/// `inversion(n)` models the upstream chord abstraction's `invert`
/// operation: rotate the tone ordering so the n-th tone becomes the bass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSpec {
    /// Chord tones as pitch classes, root first. Order matters for
    /// inversions; duplicates are meaningless and ignored by the engine.
    pub pitch_classes: Vec<u8>,
    /// Pitch class intended to sound lowest.
    pub bass: u8,
}

impl ChordSpec {
    /// Root-position chord: bass is the first listed tone.
    pub fn new(pitch_classes: Vec<u8>) -> Self {
        let bass = pitch_classes.first().copied().unwrap_or(0);
        ChordSpec { pitch_classes, bass }
    }

    pub fn with_bass(pitch_classes: Vec<u8>, bass: u8) -> Self {
        ChordSpec { pitch_classes, bass }
    }

    /// Number of distinct inversions (one per chord tone).
    pub fn inversion_count(&self) -> usize {
        self.pitch_classes.len().max(1)
    }

    /// The chord re-rooted so tone `n` (mod tone count) sounds lowest.
    /// Inversion 0 is the chord itself.
    pub fn inversion(&self, n: usize) -> ChordSpec {
        if self.pitch_classes.is_empty() {
            return self.clone();
        }
        let len = self.pitch_classes.len();
        let n = n % len;
        let mut rotated = Vec::with_capacity(len);
        rotated.extend_from_slice(&self.pitch_classes[n..]);
        rotated.extend_from_slice(&self.pitch_classes[..n]);
        let bass = rotated[0];
        ChordSpec {
            pitch_classes: rotated,
            bass,
        }
    }

    /// The chord's tones as a membership set (identical for all inversions).
    pub fn pitch_class_set(&self) -> PitchClassSet {
        PitchClassSet::from_classes(&self.pitch_classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_basics() {
        assert_eq!(pitch_class(40), 4); // E2
        assert_eq!(pitch_class(45), 9); // A2
        assert_eq!(pitch_class_name(0), "C");
        assert_eq!(pitch_class_name(7), "G");
        assert_eq!(note_name(40), "E2");
        assert_eq!(note_name(60), "C4");
    }

    #[test]
    fn test_pitch_class_set() {
        let c_major = PitchClassSet::from_classes(&[0, 4, 7]);
        assert!(c_major.contains(0));
        assert!(c_major.contains(4));
        assert!(c_major.contains(7));
        assert!(!c_major.contains(2));
        assert_eq!(c_major.len(), 3);
        assert!(!c_major.is_empty());
        assert!(PitchClassSet::empty().is_empty());

        let covered = PitchClassSet::from_classes(&[0, 4, 7, 11]);
        assert!(covered.is_superset_of(&c_major));
        assert!(!c_major.is_superset_of(&covered));

        assert_eq!(c_major.iter().collect::<Vec<_>>(), vec![0, 4, 7]);
    }

    #[test]
    fn test_set_wraps_mod_12() {
        let set = PitchClassSet::from_classes(&[12, 19]);
        assert!(set.contains(0));
        assert!(set.contains(7));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_standard_tuning() {
        let tuning = Tuning::standard_guitar();
        assert_eq!(tuning.string_count(), 6);
        assert_eq!(tuning.open_pitch(0), 40); // E2, lowest string
        assert_eq!(tuning.open_pitch(5), 64); // E4, highest string
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(Tuning::preset("standard"), Some(Tuning::standard_guitar()));
        assert_eq!(Tuning::preset("DADGAD"), Some(Tuning::dadgad()));
        assert_eq!(Tuning::preset("banjo"), None);
    }

    #[test]
    fn test_chord_inversions() {
        let c_major = ChordSpec::new(vec![0, 4, 7]);
        assert_eq!(c_major.bass, 0);
        assert_eq!(c_major.inversion_count(), 3);

        let first = c_major.inversion(1);
        assert_eq!(first.pitch_classes, vec![4, 7, 0]);
        assert_eq!(first.bass, 4);

        let second = c_major.inversion(2);
        assert_eq!(second.bass, 7);

        // Inversions wrap and share the same pitch-class set
        assert_eq!(c_major.inversion(3), c_major.inversion(0));
        assert_eq!(first.pitch_class_set(), c_major.pitch_class_set());
    }

    #[test]
    fn test_serde_round_trip() {
        let chord = ChordSpec::with_bass(vec![5, 9, 0], 5);
        let json = serde_json::to_string(&chord).unwrap();
        let back: ChordSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chord);
    }
}
