//! Terminal rendering for voicings: ASCII chord diagrams and paged result
//! lists.

use colored::*;
use fretwork_core::search::{Diagram, DiagramCell, RankedVoicing, WINDOW_ROWS};
use fretwork_core::types::{ChordSpec, Note, Tuning};

/// Voicings shown per page
pub const PAGE_SIZE: usize = 12;

/// Note name for a pitch class
pub fn note_name(pc: u8) -> String {
    Note::from_semitones(pc as i32).to_string()
}

/// Render one voicing as a small diagram card: a summary line, the string
/// markers, the nut (or fret label), and the 5-row fret window. Root-note
/// dots are highlighted.
pub fn render_card(ranked: &RankedVoicing, chord: &ChordSpec, tuning: &Tuning) -> String {
    let diagram = Diagram::from_voicing(&ranked.voicing);
    let root_pc = chord.root().pitch_class();
    let mut out = String::new();

    out.push_str(&format!(
        "{}  {}  bass {}\n",
        ranked.voicing.to_string().bold(),
        ranked.inversion.to_string().dimmed(),
        note_name(ranked.bass).cyan()
    ));

    // Markers above the nut: x for muted, o for open
    let markers: Vec<String> = diagram
        .cells()
        .iter()
        .enumerate()
        .map(|(string, cell)| match cell {
            DiagramCell::Muted => "x".red().to_string(),
            DiagramCell::Open => {
                if tuning.pitch(string) == root_pc {
                    "o".cyan().to_string()
                } else {
                    "o".green().to_string()
                }
            }
            DiagramCell::Dot(_) => " ".to_string(),
        })
        .collect();
    out.push_str(&markers.join(" "));
    out.push('\n');

    if diagram.is_offset() {
        out.push_str(&format!("{:>9}\n", format!("{}fr", diagram.start_fret())));
    } else {
        out.push_str("===========\n");
    }

    for row in 1..=WINDOW_ROWS {
        let cells: Vec<String> = diagram
            .cells()
            .iter()
            .enumerate()
            .map(|(string, cell)| match cell {
                DiagramCell::Dot(r) if *r == row => {
                    let fret = diagram.start_fret() + row - 1;
                    let pc = (tuning.pitch(string) + fret) % 12;
                    if pc == root_pc {
                        "●".cyan().to_string()
                    } else {
                        "●".green().to_string()
                    }
                }
                _ => "·".dimmed().to_string(),
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    out
}

/// Render one page of results with a header and a footer range line.
/// `page` is 1-based and clamped into range.
pub fn render_page(
    results: &[RankedVoicing],
    page: usize,
    symbol: &str,
    chord: &ChordSpec,
    tuning: &Tuning,
) -> String {
    if results.is_empty() {
        return format!(
            "{}  {}\n{}",
            symbol.bold(),
            chord,
            "No playable voicings in the current fret range.".yellow()
        );
    }

    let pages = results.len().div_ceil(PAGE_SIZE);
    let page = page.clamp(1, pages);
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(results.len());

    let mut out = format!(
        "{}  {}  {} voicings (page {}/{})\n",
        symbol.bold(),
        chord,
        results.len(),
        page,
        pages
    );
    for ranked in &results[start..end] {
        out.push('\n');
        out.push_str(&render_card(ranked, chord, tuning));
    }
    out.push_str(&format!(
        "\nShowing {}-{} of {}",
        start + 1,
        end,
        results.len()
    ));
    if pages > 1 {
        out.push_str(&format!(
            "  {}",
            format!("(voicings <page> for more, up to {})", pages).dimmed()
        ));
    }
    out
}
