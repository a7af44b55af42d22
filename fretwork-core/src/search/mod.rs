//! The voicing search pipeline: enumeration, selection, inversion labels,
//! and display windowing.

pub mod diagram;
pub mod engine;
pub mod inversion;
pub mod select;
pub mod voicing;

pub use diagram::{Diagram, DiagramCell, WINDOW_ROWS};
pub use engine::{SearchOptions, HAND_SPAN, MAX_FRETTED_NOTES, MIN_SOUNDING_STRINGS};
pub use inversion::{Inversion, InversionFilter};
pub use select::MAX_VOICINGS;
pub use voicing::{Fret, RankedVoicing, Voicing};

use crate::types::chord::ChordSpec;
use crate::types::tuning::Tuning;

/// Run the full pipeline for one chord: enumerate every playable voicing up
/// to `max_fret`, then group, rank, dedup, and cap the results. Each result
/// carries its derived ranking facts and inversion label. An empty list is a
/// normal outcome, not an error.
pub fn find_voicings(
    chord: &ChordSpec,
    tuning: &Tuning,
    max_fret: u8,
    options: &SearchOptions,
) -> Vec<RankedVoicing> {
    select::select(engine::search(chord, tuning, max_fret, options))
}
