// fretwork-core/src/types/mod.rs

pub mod chord;
pub mod note;
pub mod scale;
pub mod tuning;

pub use chord::{ChordFamily, ChordQuality, ChordSpec};
pub use note::Note;
pub use scale::{DegreeChord, Scale, DEGREE_COUNT};
pub use tuning::{Tuning, STANDARD_OPEN_PITCHES, STRING_COUNT, STRING_NAMES, TUNING_PRESETS};
