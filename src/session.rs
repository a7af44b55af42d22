//! Interactive session state.
//!
//! The session is an explicit, immutable-per-call snapshot: command handlers
//! replace fields and every display re-runs the pure search pipeline from
//! scratch, so nothing computed ever outlives the inputs it came from.

use fretwork_core::search::{find_voicings, InversionFilter, RankedVoicing, SearchOptions};
use fretwork_core::types::{ChordFamily, ChordSpec, Note, Scale, Tuning};

/// Highest fret ceiling the front-end will ask the engine to search
pub const MAX_FRET_CEILING: u8 = 15;

/// Everything the REPL needs to answer "what voicings should I show?"
#[derive(Debug, Clone)]
pub struct Session {
    pub tuning: Tuning,
    pub root: Note,
    pub family: ChordFamily,
    pub scale: Scale,
    pub max_fret: u8,
    pub filter: InversionFilter,
    pub options: SearchOptions,
}

impl Session {
    pub fn new() -> Self {
        Session {
            tuning: Tuning::standard(),
            root: Note::from_semitones(0), // C
            family: ChordFamily::Major,
            scale: Scale::major(),
            max_fret: 9,
            filter: InversionFilter::all(),
            options: SearchOptions::default(),
        }
    }

    /// The currently selected chord
    pub fn chord(&self) -> ChordSpec {
        ChordSpec::from_family(self.root, self.family)
    }

    /// Chord symbol for headers, e.g. "Am7"
    pub fn chord_symbol(&self) -> String {
        format!("{}{}", self.root, self.family.suffix())
    }

    /// Run the pipeline for the current chord and apply the inversion filter
    pub fn voicings(&self) -> Vec<RankedVoicing> {
        self.voicings_for(&self.chord())
    }

    /// Run the pipeline for an arbitrary chord under the session's tuning,
    /// ceiling, and inversion filter
    pub fn voicings_for(&self, chord: &ChordSpec) -> Vec<RankedVoicing> {
        let mut results = find_voicings(chord, &self.tuning, self.max_fret, &self.options);
        results.retain(|ranked| self.filter.allows(ranked.inversion));
        results
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretwork_core::search::Inversion;

    #[test]
    fn test_default_session_finds_voicings() {
        let session = Session::new();
        assert_eq!(session.chord_symbol(), "C");
        assert!(!session.voicings().is_empty());
    }

    #[test]
    fn test_inversion_filter_applies() {
        let mut session = Session::new();
        session.root = "E".parse().unwrap();
        session.family = ChordFamily::Major;

        session.filter.first = false;
        session.filter.second = false;
        for ranked in session.voicings() {
            assert_eq!(ranked.inversion, Inversion::Natural);
        }
    }

    #[test]
    fn test_chord_symbol_includes_suffix() {
        let mut session = Session::new();
        session.root = "A".parse().unwrap();
        session.family = ChordFamily::MinorSeventh;
        assert_eq!(session.chord_symbol(), "Am7");
    }
}
