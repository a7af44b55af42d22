use anyhow::{anyhow, Result};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A pitch class in chromatic representation (0-11), octave-agnostic.
/// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    pitch_class: u8,
    accidental_preference: AccidentalPreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum AccidentalPreference {
    Sharp,
    Flat,
    Natural,
}

impl Note {
    /// Create a new note from a chromatic pitch class (0-11)
    pub fn new(pitch_class: u8) -> Result<Self> {
        if pitch_class > 11 {
            return Err(anyhow!("Pitch class must be 0-11, got {}", pitch_class));
        }

        Ok(Note {
            pitch_class,
            accidental_preference: AccidentalPreference::Natural,
        })
    }

    /// Create a note from any integer, reduced mod 12 (handles negative offsets)
    pub fn from_semitones(semitones: i32) -> Self {
        Note {
            pitch_class: semitones.rem_euclid(12) as u8,
            accidental_preference: AccidentalPreference::Natural,
        }
    }

    /// Create a note with a specific accidental preference for display
    pub fn with_accidental_preference(pitch_class: u8, sharp: bool) -> Result<Self> {
        if pitch_class > 11 {
            return Err(anyhow!("Pitch class must be 0-11, got {}", pitch_class));
        }

        let preference = if Self::is_natural_note(pitch_class) {
            AccidentalPreference::Natural
        } else if sharp {
            AccidentalPreference::Sharp
        } else {
            AccidentalPreference::Flat
        };

        Ok(Note {
            pitch_class,
            accidental_preference: preference,
        })
    }

    /// Get the chromatic pitch class (0-11)
    pub fn pitch_class(&self) -> u8 {
        self.pitch_class
    }

    /// Check if a pitch class corresponds to a natural note (white key)
    fn is_natural_note(pitch_class: u8) -> bool {
        matches!(pitch_class, 0 | 2 | 4 | 5 | 7 | 9 | 11) // C, D, E, F, G, A, B
    }

    fn base_note_name(pitch_class: u8) -> &'static str {
        match pitch_class {
            0 => "C",
            2 => "D",
            4 => "E",
            5 => "F",
            7 => "G",
            9 => "A",
            11 => "B",
            _ => "",
        }
    }

    fn sharp_name(pitch_class: u8) -> &'static str {
        match pitch_class {
            1 => "C#",
            3 => "D#",
            6 => "F#",
            8 => "G#",
            10 => "A#",
            _ => "",
        }
    }

    fn flat_name(pitch_class: u8) -> &'static str {
        match pitch_class {
            1 => "Db",
            3 => "Eb",
            6 => "Gb",
            8 => "Ab",
            10 => "Bb",
            _ => "",
        }
    }

    /// Transpose the note by a number of semitones, wrapping within the octave
    pub fn transpose(self, semitones: i8) -> Note {
        let new_pitch_class =
            (self.pitch_class as i32 + semitones as i32).rem_euclid(12) as u8;

        let new_preference = if Self::is_natural_note(new_pitch_class) {
            AccidentalPreference::Natural
        } else {
            AccidentalPreference::Sharp
        };

        Note {
            pitch_class: new_pitch_class,
            accidental_preference: new_preference,
        }
    }
}

impl FromStr for Note {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_uppercase();

        let (pitch_class, accidental_preference) = match s.as_str() {
            // Natural notes
            "C" => (0, AccidentalPreference::Natural),
            "D" => (2, AccidentalPreference::Natural),
            "E" => (4, AccidentalPreference::Natural),
            "F" => (5, AccidentalPreference::Natural),
            "G" => (7, AccidentalPreference::Natural),
            "A" => (9, AccidentalPreference::Natural),
            "B" => (11, AccidentalPreference::Natural),

            // Sharp notes
            "C#" | "CS" => (1, AccidentalPreference::Sharp),
            "D#" | "DS" => (3, AccidentalPreference::Sharp),
            "F#" | "FS" => (6, AccidentalPreference::Sharp),
            "G#" | "GS" => (8, AccidentalPreference::Sharp),
            "A#" | "AS" => (10, AccidentalPreference::Sharp),

            // Flat notes
            "DB" => (1, AccidentalPreference::Flat),
            "EB" => (3, AccidentalPreference::Flat),
            "GB" => (6, AccidentalPreference::Flat),
            "AB" => (8, AccidentalPreference::Flat),
            "BB" => (10, AccidentalPreference::Flat),

            _ => return Err(anyhow!("Invalid note name: {}", s)),
        };

        Ok(Note {
            pitch_class,
            accidental_preference,
        })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if Self::is_natural_note(self.pitch_class) {
            Self::base_note_name(self.pitch_class)
        } else {
            match self.accidental_preference {
                AccidentalPreference::Flat => Self::flat_name(self.pitch_class),
                // Non-natural notes default to sharp spelling
                _ => Self::sharp_name(self.pitch_class),
            }
        };

        write!(f, "{}", name)
    }
}

// Arithmetic operations for transposition
impl Add<i8> for Note {
    type Output = Note;

    fn add(self, semitones: i8) -> Self::Output {
        self.transpose(semitones)
    }
}

impl Sub<i8> for Note {
    type Output = Note;

    fn sub(self, semitones: i8) -> Self::Output {
        self.transpose(-semitones)
    }
}

// Calculate the ascending interval between two notes
impl Sub<Note> for Note {
    type Output = i8;

    fn sub(self, other: Note) -> Self::Output {
        let diff = (self.pitch_class as i8) - (other.pitch_class as i8);
        if diff < 0 {
            diff + 12
        } else {
            diff
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_creation() {
        let c = Note::new(0).unwrap();
        assert_eq!(c.pitch_class(), 0);

        let invalid = Note::new(12);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_note_parsing() {
        let c: Note = "C".parse().unwrap();
        assert_eq!(c.pitch_class(), 0);

        let cs: Note = "C#".parse().unwrap();
        assert_eq!(cs.pitch_class(), 1);

        let db: Note = "Db".parse().unwrap();
        assert_eq!(db.pitch_class(), 1);

        let invalid: Result<Note> = "H".parse();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_note_display() {
        let c: Note = "C".parse().unwrap();
        assert_eq!(format!("{}", c), "C");

        let cs: Note = "C#".parse().unwrap();
        assert_eq!(format!("{}", cs), "C#");

        let db: Note = "Db".parse().unwrap();
        assert_eq!(format!("{}", db), "Db");
    }

    #[test]
    fn test_transposition() {
        let c: Note = "C".parse().unwrap();
        let d = c + 2;
        assert_eq!(d.pitch_class(), 2);

        let bb = c - 2;
        assert_eq!(bb.pitch_class(), 10);

        // Test wrapping
        let b: Note = "B".parse().unwrap();
        let c2 = b + 1;
        assert_eq!(c2.pitch_class(), 0);
    }

    #[test]
    fn test_from_semitones_wraps_negative() {
        assert_eq!(Note::from_semitones(-2).pitch_class(), 10);
        assert_eq!(Note::from_semitones(14).pitch_class(), 2);
        assert_eq!(Note::from_semitones(0).pitch_class(), 0);
    }

    #[test]
    fn test_interval_calculation() {
        let c: Note = "C".parse().unwrap();
        let e: Note = "E".parse().unwrap();
        assert_eq!(e - c, 4); // Major third

        let g: Note = "G".parse().unwrap();
        assert_eq!(g - c, 7); // Perfect fifth

        // Test descending interval
        assert_eq!(c - g, 5); // Perfect fourth (12 - 7)
    }

    #[test]
    fn test_accidental_preferences() {
        let cs = Note::with_accidental_preference(1, true).unwrap();
        assert_eq!(format!("{}", cs), "C#");

        let db = Note::with_accidental_preference(1, false).unwrap();
        assert_eq!(format!("{}", db), "Db");

        let c = Note::with_accidental_preference(0, true).unwrap();
        assert_eq!(format!("{}", c), "C"); // Natural notes ignore preference
    }
}
