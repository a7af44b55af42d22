//! # Fretwork
//!
//! Fretwork is an interactive chord voicing explorer for guitar. Given a
//! root note, a chord family, and a tuning, it searches every playable
//! fingering, ranks and dedups the results, and renders them as chord
//! diagrams in the terminal. The search itself lives in the
//! `fretwork-core` crate; this crate is the REPL front-end.
//!
//! ## Modules
//!
//! - `commands`: The REPL command registry and the handlers for chord,
//!   tuning, scale, and voicing commands.
//! - `display`: ASCII chord-diagram cards and paged result rendering.
//! - `repl`: The Read-Eval-Print Loop, including the chord-symbol shortcut
//!   for inputs like `Am7`.
//! - `session`: The mutable state a REPL session carries between commands.
//! - `store`: Plain-text persistence for named tunings.

pub mod commands;
pub mod display;
pub mod repl;
pub mod session;
pub mod store;

// Re-export commonly used types for convenience
pub use crate::session::Session;
pub use crate::store::{FileTuningStore, TuningStore};
