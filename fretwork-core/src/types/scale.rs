use crate::types::chord::{ChordQuality, ChordSpec};
use crate::types::note::Note;
use anyhow::{anyhow, Result};
use std::fmt;

/// Number of degree slots in a scale. Pentatonic scales keep seven slots and
/// mark the missing degrees as `None`, so degree arithmetic stays uniform.
pub const DEGREE_COUNT: usize = 7;

/// An ordered scale as semitone offsets from the key root, one slot per degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scale {
    name: &'static str,
    degrees: [Option<u8>; DEGREE_COUNT],
}

/// A chord built by stacking alternating scale tones from a degree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeChord {
    pub spec: ChordSpec,
    pub quality: ChordQuality,
}

impl Scale {
    /// The major (ionian) scale
    pub fn major() -> Self {
        Scale {
            name: "Major",
            degrees: [
                Some(0),
                Some(2),
                Some(4),
                Some(5),
                Some(7),
                Some(9),
                Some(11),
            ],
        }
    }

    /// The natural minor (aeolian) scale
    pub fn natural_minor() -> Self {
        Scale {
            name: "Natural Minor",
            degrees: [
                Some(0),
                Some(2),
                Some(3),
                Some(5),
                Some(7),
                Some(8),
                Some(10),
            ],
        }
    }

    /// Major pentatonic: the major scale with degrees 4 and 7 removed
    pub fn major_pentatonic() -> Self {
        Scale {
            name: "Major Pentatonic",
            degrees: [Some(0), Some(2), Some(4), None, Some(7), Some(9), None],
        }
    }

    /// Minor pentatonic: natural minor with degrees 2 and 6 removed
    pub fn minor_pentatonic() -> Self {
        Scale {
            name: "Minor Pentatonic",
            degrees: [Some(0), None, Some(3), Some(5), Some(7), None, Some(10)],
        }
    }

    /// All shipped scales
    pub fn all() -> [Scale; 4] {
        [
            Scale::major(),
            Scale::natural_minor(),
            Scale::major_pentatonic(),
            Scale::minor_pentatonic(),
        ]
    }

    /// Look up a scale by name, case-insensitive
    pub fn by_name(name: &str) -> Option<Scale> {
        let wanted = name.trim().to_lowercase().replace(['-', '_'], " ");
        Scale::all()
            .into_iter()
            .find(|scale| scale.name.to_lowercase() == wanted)
    }

    /// Scale name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Degree slots (semitone offsets from the key root)
    pub fn degrees(&self) -> &[Option<u8>; DEGREE_COUNT] {
        &self.degrees
    }

    /// Whether a 0-based degree exists in this scale
    pub fn has_degree(&self, degree: usize) -> bool {
        degree < DEGREE_COUNT && self.degrees[degree].is_some()
    }

    fn degree_offset(&self, degree: usize) -> Result<u8> {
        self.degrees[degree % DEGREE_COUNT].ok_or_else(|| {
            anyhow!(
                "The {} scale has no degree {}",
                self.name,
                degree % DEGREE_COUNT + 1
            )
        })
    }

    /// Build the triad (or seventh chord) on a 0-based scale degree in the
    /// given key, stacking every other scale tone and wrapping past the
    /// octave. Requesting a degree that is missing from a gapped scale is a
    /// caller error, reported distinctly from an empty search result.
    pub fn degree_chord(&self, key: Note, degree: usize, seventh: bool) -> Result<DegreeChord> {
        if degree >= DEGREE_COUNT {
            return Err(anyhow!(
                "Scale degree must be 1-{}, got {}",
                DEGREE_COUNT,
                degree + 1
            ));
        }

        let root_offset = self.degree_offset(degree)?;
        let mut intervals = vec![0u8];

        let stack_len = if seventh { 3 } else { 2 };
        for step in 1..=stack_len {
            let tone = self.degree_offset(degree + 2 * step)?;
            intervals.push((tone + 12 - root_offset) % 12);
        }

        let third = intervals[1];
        let fifth = intervals[2];
        let quality = match (third, fifth) {
            (3, 6) => ChordQuality::Diminished,
            (3, _) => ChordQuality::Minor,
            (4, 8) => ChordQuality::Augmented,
            (4, _) => ChordQuality::Major,
            _ => {
                return Err(anyhow!(
                    "Degree {} of the {} scale does not stack into a tertian chord",
                    degree + 1,
                    self.name
                ))
            }
        };

        let spec = ChordSpec::new(key + root_offset as i8, intervals)?;
        Ok(DegreeChord { spec, quality })
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
