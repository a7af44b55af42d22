use crate::types::chord::ChordSpec;
use std::fmt;

/// Classification of a voicing by which chord tone is in the bass.
///
/// Extended chords can put a 7th or added tone in the bass; those fall back
/// to `Natural` so inversion filtering never hides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inversion {
    Natural,
    First,
    Second,
}

impl Inversion {
    /// Classify a bass pitch class against the chord's root/third/fifth
    pub fn classify(chord: &ChordSpec, bass: u8) -> Inversion {
        let tones = chord.chord_tones();
        if tones.first() == Some(&bass) {
            Inversion::Natural
        } else if tones.get(1) == Some(&bass) {
            Inversion::First
        } else if tones.get(2) == Some(&bass) {
            Inversion::Second
        } else {
            Inversion::Natural
        }
    }
}

impl fmt::Display for Inversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Inversion::Natural => "Natural",
            Inversion::First => "1st inversion",
            Inversion::Second => "2nd inversion",
        };
        write!(f, "{}", label)
    }
}

/// Caller-supplied filter predicate over inversion labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InversionFilter {
    pub natural: bool,
    pub first: bool,
    pub second: bool,
}

impl InversionFilter {
    /// A filter that lets everything through
    pub fn all() -> Self {
        InversionFilter {
            natural: true,
            first: true,
            second: true,
        }
    }

    /// Whether a voicing with this inversion should be shown
    pub fn allows(&self, inversion: Inversion) -> bool {
        match inversion {
            Inversion::Natural => self.natural,
            Inversion::First => self.first,
            Inversion::Second => self.second,
        }
    }
}

impl Default for InversionFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chord::ChordFamily;
    use crate::types::note::Note;

    fn e_major() -> ChordSpec {
        ChordSpec::from_family("E".parse::<Note>().unwrap(), ChordFamily::Major)
    }

    #[test]
    fn test_classification() {
        let chord = e_major();
        assert_eq!(Inversion::classify(&chord, 4), Inversion::Natural); // E
        assert_eq!(Inversion::classify(&chord, 8), Inversion::First); // G#
        assert_eq!(Inversion::classify(&chord, 11), Inversion::Second); // B
    }

    #[test]
    fn test_unrelated_bass_is_natural() {
        // E7 with the 7th (D) in the bass is not one of the three named
        // inversions; it must still pass a Natural-only filter
        let chord = ChordSpec::from_family("E".parse::<Note>().unwrap(), ChordFamily::Seventh);
        assert_eq!(Inversion::classify(&chord, 2), Inversion::Natural);
    }

    #[test]
    fn test_filter() {
        let mut filter = InversionFilter::all();
        assert!(filter.allows(Inversion::Second));

        filter.second = false;
        assert!(!filter.allows(Inversion::Second));
        assert!(filter.allows(Inversion::Natural));
        assert!(filter.allows(Inversion::First));
    }
}
