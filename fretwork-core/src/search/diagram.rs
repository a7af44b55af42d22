use crate::search::voicing::{Fret, Voicing};
use crate::types::tuning::STRING_COUNT;

/// Rows shown in one chord diagram
pub const WINDOW_ROWS: u8 = 5;

/// Frets at or below this display at a window starting on fret 1, so open
/// shapes and low positions share the same diagram
const LOW_POSITION_CEILING: u8 = 5;

/// What one string shows in a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagramCell {
    /// String is not played: an X above the nut
    Muted,
    /// String rings open: an O above the nut
    Open,
    /// A dot on the given window row (1-based, always within the window)
    Dot(u8),
}

/// A voicing mapped into the 5-fret relative window used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagram {
    start_fret: u8,
    cells: [DiagramCell; STRING_COUNT],
}

impl Diagram {
    /// Choose the display window for a voicing and map each absolute fret to
    /// its relative row.
    pub fn from_voicing(voicing: &Voicing) -> Self {
        let fretted: Vec<u8> = voicing.fretted().collect();
        let max_fretted = fretted.iter().max().copied().unwrap_or(0);
        let min_fretted = fretted.iter().min().copied().unwrap_or(0);

        let start_fret = if max_fretted > LOW_POSITION_CEILING {
            min_fretted
        } else {
            1
        };

        let mut cells = [DiagramCell::Muted; STRING_COUNT];
        for (string, cell) in cells.iter_mut().enumerate() {
            *cell = match voicing.frets()[string] {
                Fret::Muted => DiagramCell::Muted,
                Fret::Played(0) => DiagramCell::Open,
                Fret::Played(fret) => {
                    let row = fret as i16 - start_fret as i16 + 1;
                    if (1..=WINDOW_ROWS as i16).contains(&row) {
                        DiagramCell::Dot(row as u8)
                    } else {
                        // Unreachable while the hand-span rule holds; a note
                        // outside the window is dropped from the visual
                        DiagramCell::Muted
                    }
                }
            };
        }

        Diagram { start_fret, cells }
    }

    /// Absolute fret the first window row represents
    pub fn start_fret(&self) -> u8 {
        self.start_fret
    }

    /// True when the window does not begin at the nut
    pub fn is_offset(&self) -> bool {
        self.start_fret > 1
    }

    /// Per-string diagram cells, low string first
    pub fn cells(&self) -> &[DiagramCell; STRING_COUNT] {
        &self.cells
    }
}
