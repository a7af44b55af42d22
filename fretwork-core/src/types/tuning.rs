use crate::types::note::Note;
use std::fmt;

/// Number of strings on the modeled instrument
pub const STRING_COUNT: usize = 6;

/// Per-string detune offsets are clamped to this range (in semitones)
pub const OFFSET_MIN: i8 = -8;
/// See [`OFFSET_MIN`]
pub const OFFSET_MAX: i8 = 8;

/// Open pitch classes of standard tuning, low string first: E A D G B E
pub const STANDARD_OPEN_PITCHES: [u8; STRING_COUNT] = [4, 9, 2, 7, 11, 4];

/// Conventional string labels, low string first (guitarists count from the top)
pub const STRING_NAMES: [&str; STRING_COUNT] = [
    "6 (Low E)",
    "5 (A)",
    "4 (D)",
    "3 (G)",
    "2 (B)",
    "1 (High E)",
];

/// Named detune presets relative to standard tuning
pub const TUNING_PRESETS: [(&str, [i8; STRING_COUNT]); 5] = [
    ("E Standard", [0, 0, 0, 0, 0, 0]),
    ("Drop D", [-2, 0, 0, 0, 0, 0]),
    ("D Standard", [-2, -2, -2, -2, -2, -2]),
    ("Open G", [-2, -2, 0, 0, 0, -2]),
    ("Half Step Down", [-1, -1, -1, -1, -1, -1]),
];

/// An instrument tuning: base open pitches, per-string semitone offsets,
/// and per-string enable flags. Index 0 is the lowest-pitched string.
///
/// Offsets are clamped to [`OFFSET_MIN`]..=[`OFFSET_MAX`] at every mutation,
/// so the search never observes an out-of-range tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tuning {
    base: [u8; STRING_COUNT],
    offsets: [i8; STRING_COUNT],
    active: [bool; STRING_COUNT],
}

impl Tuning {
    /// Standard six-string tuning, all strings active
    pub fn standard() -> Self {
        Tuning {
            base: STANDARD_OPEN_PITCHES,
            offsets: [0; STRING_COUNT],
            active: [true; STRING_COUNT],
        }
    }

    /// Standard tuning with the given detune offsets (clamped)
    pub fn with_offsets(offsets: [i8; STRING_COUNT]) -> Self {
        let mut tuning = Self::standard();
        tuning.set_offsets(offsets);
        tuning
    }

    /// Look up a named preset, case-insensitive
    pub fn preset(name: &str) -> Option<Self> {
        TUNING_PRESETS
            .iter()
            .find(|(preset_name, _)| preset_name.eq_ignore_ascii_case(name))
            .map(|(_, offsets)| Self::with_offsets(*offsets))
    }

    /// Clamp an offset into the allowed detune range
    pub fn clamp_offset(offset: i8) -> i8 {
        offset.clamp(OFFSET_MIN, OFFSET_MAX)
    }

    /// Set a single string's offset (clamped)
    pub fn set_offset(&mut self, string: usize, offset: i8) {
        self.offsets[string] = Self::clamp_offset(offset);
    }

    /// Replace all offsets at once (each clamped)
    pub fn set_offsets(&mut self, offsets: [i8; STRING_COUNT]) {
        for (slot, offset) in self.offsets.iter_mut().zip(offsets) {
            *slot = Self::clamp_offset(offset);
        }
    }

    /// Current offsets
    pub fn offsets(&self) -> [i8; STRING_COUNT] {
        self.offsets
    }

    /// Enable or disable a string
    pub fn set_active(&mut self, string: usize, active: bool) {
        self.active[string] = active;
    }

    /// Whether a string is enabled
    pub fn is_active(&self, string: usize) -> bool {
        self.active[string]
    }

    /// Per-string enable flags
    pub fn active(&self) -> [bool; STRING_COUNT] {
        self.active
    }

    /// Open pitch class of one string after detuning
    pub fn pitch(&self, string: usize) -> u8 {
        // +120 guards against negative offsets before the modulus
        ((self.base[string] as i16 + self.offsets[string] as i16 + 120) % 12) as u8
    }

    /// Open pitch classes of all strings after detuning
    pub fn pitches(&self) -> [u8; STRING_COUNT] {
        let mut pitches = [0u8; STRING_COUNT];
        for (string, slot) in pitches.iter_mut().enumerate() {
            *slot = self.pitch(string);
        }
        pitches
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .pitches()
            .iter()
            .map(|&pc| Note::from_semitones(pc as i32).to_string())
            .collect();
        write!(f, "{}", names.join(" - "))
    }
}
