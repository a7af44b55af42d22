//! # Fretwork Core
//!
//! Voicing search engine for fretted string instruments: given a tuning, a
//! target chord, and playability constraints, enumerate every physically
//! valid way to sound the chord, rank the candidates, collapse equivalent
//! results, classify them by bass-note inversion, and compute the fret
//! window used to display each one.
//!
//! The whole pipeline is a pure function of its inputs; nothing persists
//! between calls and an empty result list is a normal, displayable outcome.
//!
//! ## Features
//!
//! - **serde**: derive `Serialize`/`Deserialize` on the public value types
//!
//! ## Example
//!
//! ```
//! use fretwork_core::types::{ChordFamily, ChordSpec, Note, Tuning};
//! use fretwork_core::search::{find_voicings, SearchOptions};
//!
//! let chord = ChordSpec::from_family("E".parse::<Note>()?, ChordFamily::Major);
//! let voicings = find_voicings(&chord, &Tuning::standard(), 9, &SearchOptions::default());
//! assert!(!voicings.is_empty());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod search;
pub mod types;

// Re-export commonly used types
pub use search::{find_voicings, Diagram, Inversion, RankedVoicing, SearchOptions, Voicing};
pub use types::{ChordFamily, ChordSpec, Note, Scale, Tuning};
