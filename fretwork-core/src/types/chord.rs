use crate::types::note::Note;
use anyhow::{anyhow, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Named chord families: fixed interval patterns independent of root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordFamily {
    Major,
    Minor,
    Seventh,
    MinorSeventh,
    MajorSeventh,
    Sus2,
    Sus4,
    Add9,
}

impl ChordFamily {
    /// Every family, in display order
    pub const ALL: [ChordFamily; 8] = [
        ChordFamily::Major,
        ChordFamily::Minor,
        ChordFamily::Seventh,
        ChordFamily::MinorSeventh,
        ChordFamily::MajorSeventh,
        ChordFamily::Sus2,
        ChordFamily::Sus4,
        ChordFamily::Add9,
    ];

    /// Semitone intervals of the family (interval 0 is always first)
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ChordFamily::Major => &[0, 4, 7],
            ChordFamily::Minor => &[0, 3, 7],
            ChordFamily::Seventh => &[0, 4, 7, 10],
            ChordFamily::MinorSeventh => &[0, 3, 7, 10],
            ChordFamily::MajorSeventh => &[0, 4, 7, 11],
            ChordFamily::Sus2 => &[0, 2, 7],
            ChordFamily::Sus4 => &[0, 5, 7],
            // The added 9th sits an octave above the 2nd
            ChordFamily::Add9 => &[0, 4, 7, 14],
        }
    }

    /// Human-readable family name
    pub fn name(&self) -> &'static str {
        match self {
            ChordFamily::Major => "Major",
            ChordFamily::Minor => "Minor",
            ChordFamily::Seventh => "Seventh",
            ChordFamily::MinorSeventh => "Minor Seventh",
            ChordFamily::MajorSeventh => "Major Seventh",
            ChordFamily::Sus2 => "Suspended 2nd",
            ChordFamily::Sus4 => "Suspended 4th",
            ChordFamily::Add9 => "Added 9th",
        }
    }

    /// Chord-symbol suffix appended to the root name (e.g. "m7" in "Am7")
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordFamily::Major => "",
            ChordFamily::Minor => "m",
            ChordFamily::Seventh => "7",
            ChordFamily::MinorSeventh => "m7",
            ChordFamily::MajorSeventh => "maj7",
            ChordFamily::Sus2 => "sus2",
            ChordFamily::Sus4 => "sus4",
            ChordFamily::Add9 => "add9",
        }
    }

    /// Parse a family from its name or chord-symbol suffix, case-insensitive
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "major" | "maj" | "" => Ok(ChordFamily::Major),
            "minor" | "min" | "m" => Ok(ChordFamily::Minor),
            "seventh" | "7" | "dom7" => Ok(ChordFamily::Seventh),
            "m7" | "min7" | "minor7" => Ok(ChordFamily::MinorSeventh),
            "maj7" | "major7" => Ok(ChordFamily::MajorSeventh),
            "sus2" => Ok(ChordFamily::Sus2),
            "sus4" | "sus" => Ok(ChordFamily::Sus4),
            "add9" => Ok(ChordFamily::Add9),
            _ => Err(anyhow!(
                "Unknown chord family: {} (try major, m, 7, m7, maj7, sus2, sus4, add9)",
                s
            )),
        }
    }
}

impl fmt::Display for ChordFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Triad quality of a scale-degree chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "Augmented",
        };
        write!(f, "{}", name)
    }
}

/// Canonical target harmony: a root pitch class plus an ordered interval list.
///
/// Intervals may exceed 11 (an added 9th is +14) and are reduced mod 12
/// whenever they are compared against sounded pitches. Interval 0 is always
/// present; it defines the root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordSpec {
    root: Note,
    intervals: Vec<u8>,
}

impl ChordSpec {
    /// Build a chord spec from a root and explicit intervals.
    /// The interval list must be non-empty and contain 0.
    pub fn new(root: Note, intervals: Vec<u8>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(anyhow!("Chord intervals must not be empty"));
        }
        if !intervals.contains(&0) {
            return Err(anyhow!("Chord intervals must include 0 (the root)"));
        }
        Ok(ChordSpec { root, intervals })
    }

    /// Build a chord spec from a named family
    pub fn from_family(root: Note, family: ChordFamily) -> Self {
        ChordSpec {
            root,
            intervals: family.intervals().to_vec(),
        }
    }

    /// The root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// The ordered interval list
    pub fn intervals(&self) -> &[u8] {
        &self.intervals
    }

    /// Chord tones as pitch classes in interval order: root, third, fifth, ...
    pub fn chord_tones(&self) -> Vec<u8> {
        self.intervals
            .iter()
            .map(|&interval| (self.root.pitch_class() + interval) % 12)
            .collect()
    }

    /// The set of pitch classes a voicing of this chord is allowed to sound
    pub fn allowed_pitch_classes(&self) -> BTreeSet<u8> {
        self.chord_tones().into_iter().collect()
    }
}

impl fmt::Display for ChordSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tones: Vec<String> = self
            .chord_tones()
            .iter()
            .map(|&pc| Note::from_semitones(pc as i32).to_string())
            .collect();
        write!(f, "{} [{}]", self.root, tones.join(", "))
    }
}
