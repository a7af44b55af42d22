use crate::search::inversion::Inversion;
use crate::types::chord::ChordSpec;
use crate::types::tuning::STRING_COUNT;
use std::collections::BTreeSet;
use std::fmt;

/// What one string does in a voicing: silent, or stopped at a fret
/// (`Played(0)` is the open string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fret {
    Muted,
    Played(u8),
}

impl Fret {
    /// True when the string is not sounded
    pub fn is_muted(&self) -> bool {
        matches!(self, Fret::Muted)
    }

    /// True for an open (unfretted but sounding) string
    pub fn is_open(&self) -> bool {
        matches!(self, Fret::Played(0))
    }

    /// True when a finger is actually down on the string
    pub fn is_fretted(&self) -> bool {
        matches!(self, Fret::Played(f) if *f > 0)
    }

    /// The fret number, if the string sounds
    pub fn fret(&self) -> Option<u8> {
        match self {
            Fret::Muted => None,
            Fret::Played(f) => Some(*f),
        }
    }
}

impl fmt::Display for Fret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fret::Muted => write!(f, "x"),
            Fret::Played(fret) => write!(f, "{}", fret),
        }
    }
}

/// One concrete assignment of fret-or-mute to each string.
/// Index 0 is the lowest-pitched string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voicing {
    frets: [Fret; STRING_COUNT],
}

impl Voicing {
    /// Wrap a complete fret assignment
    pub fn new(frets: [Fret; STRING_COUNT]) -> Self {
        Voicing { frets }
    }

    /// The per-string assignment
    pub fn frets(&self) -> &[Fret; STRING_COUNT] {
        &self.frets
    }

    /// Sounding strings as (string index, fret) pairs, low string first
    pub fn sounding(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.frets
            .iter()
            .enumerate()
            .filter_map(|(string, fret)| fret.fret().map(|f| (string, f)))
    }

    /// Fret numbers of the fretted (non-open) notes
    pub fn fretted(&self) -> impl Iterator<Item = u8> + '_ {
        self.frets.iter().filter_map(|fret| match fret {
            Fret::Played(f) if *f > 0 => Some(*f),
            _ => None,
        })
    }

    /// Index of the lowest-pitched sounding string
    pub fn lowest_sounding(&self) -> Option<usize> {
        self.sounding().next().map(|(string, _)| string)
    }

    /// Index of the highest-pitched sounding string
    pub fn highest_sounding(&self) -> Option<usize> {
        self.sounding().last().map(|(string, _)| string)
    }

    /// Number of sounding strings
    pub fn sounding_count(&self) -> usize {
        self.sounding().count()
    }

    /// Number of open strings
    pub fn open_count(&self) -> usize {
        self.frets.iter().filter(|f| f.is_open()).count()
    }

    /// Sum of the fretted fret numbers (selection tie-break)
    pub fn fretted_sum(&self) -> u32 {
        self.fretted().map(u32::from).sum()
    }

    /// Pitch classes sounded against the given open-string pitches,
    /// low string first, one entry per sounding string
    pub fn sounded_pitch_classes(&self, tuning_pitches: &[u8; STRING_COUNT]) -> Vec<u8> {
        self.sounding()
            .map(|(string, fret)| ((u16::from(tuning_pitches[string]) + u16::from(fret)) % 12) as u8)
            .collect()
    }
}

impl fmt::Display for Voicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.frets.iter().map(|fret| fret.to_string()).collect();
        write!(f, "{}", cells.join(" "))
    }
}

/// A voicing plus the derived scalar facts the selector ranks on
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedVoicing {
    pub voicing: Voicing,
    /// Hand position the search window was anchored at when this was found
    pub base_fret: u8,
    /// Lowest fretted fret number, 0 when nothing is fretted
    pub min_fret: u8,
    /// Highest fretted fret number, 0 when nothing is fretted
    pub max_fret: u8,
    /// Frets spanned by the fretted notes, inclusive; 0 when nothing is fretted
    pub span: u8,
    /// Number of sounding strings
    pub sounding: u8,
    /// Number of open strings
    pub open_strings: u8,
    /// Muted strings strictly between the lowest and highest sounding string
    pub inner_muted: u8,
    /// Sorted unique sounded pitch classes
    pub pitch_classes: BTreeSet<u8>,
    /// Pitch class of the lowest sounding string
    pub bass: u8,
    /// Which chord tone sits in the bass
    pub inversion: Inversion,
}

impl RankedVoicing {
    /// Compute all derived facts for a voicing with at least one sounding
    /// string.
    pub fn derive(
        voicing: Voicing,
        base_fret: u8,
        tuning_pitches: &[u8; STRING_COUNT],
        chord: &ChordSpec,
    ) -> Self {
        debug_assert!(voicing.sounding_count() > 0);

        let fretted: Vec<u8> = voicing.fretted().collect();
        let (min_fret, max_fret, span) = match (fretted.iter().min(), fretted.iter().max()) {
            (Some(&min), Some(&max)) => (min, max, max - min + 1),
            _ => (0, 0, 0),
        };

        let lowest = voicing.lowest_sounding().unwrap_or(0);
        let highest = voicing.highest_sounding().unwrap_or(0);
        let inner_muted = voicing.frets()[lowest..=highest]
            .iter()
            .filter(|f| f.is_muted())
            .count() as u8;

        let sounded = voicing.sounded_pitch_classes(tuning_pitches);
        let bass = sounded.first().copied().unwrap_or(0);
        let pitch_classes: BTreeSet<u8> = sounded.into_iter().collect();

        RankedVoicing {
            voicing,
            base_fret,
            min_fret,
            max_fret,
            span,
            sounding: voicing.sounding_count() as u8,
            open_strings: voicing.open_count() as u8,
            inner_muted,
            pitch_classes,
            bass,
            inversion: Inversion::classify(chord, bass),
        }
    }

    /// Equivalence key for selection: same bass and same harmonic content
    pub fn group_key(&self) -> (u8, Vec<u8>) {
        (self.bass, self.pitch_classes.iter().copied().collect())
    }
}
