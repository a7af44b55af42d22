//! Chord selection and voicing commands

use crate::commands::{CommandContext, CommandResult};
use crate::display::render_page;
use crate::session::MAX_FRET_CEILING;
use colored::*;
use fretwork_core::search::InversionFilter;
use fretwork_core::types::{ChordFamily, Note, Scale};

/// Parse a chord symbol like "Am7", "C#", or "Dbmaj7" into a root and family
pub fn parse_chord_symbol(input: &str) -> Option<(Note, ChordFamily)> {
    let input = input.trim();
    if input.is_empty() || !input.is_ascii() || input.contains(char::is_whitespace) {
        return None;
    }

    // Try the two-character root first so "C#m" does not parse as C + "#m"
    if input.len() >= 2 {
        if let Ok(root) = input[..2].parse::<Note>() {
            if let Ok(family) = ChordFamily::parse(&input[2..]) {
                return Some((root, family));
            }
        }
    }
    let root = input[..1].parse::<Note>().ok()?;
    let family = ChordFamily::parse(&input[1..]).ok()?;
    Some((root, family))
}

fn show_current(ctx: &CommandContext, page: usize) -> CommandResult {
    let chord = ctx.session.chord();
    let results = ctx.session.voicings();
    CommandResult::Message(render_page(
        &results,
        page,
        &ctx.session.chord_symbol(),
        &chord,
        &ctx.session.tuning,
    ))
}

/// Handle `root <note>` command
pub fn cmd_root(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Root is {} (current chord: {})",
            ctx.session.root.to_string().cyan(),
            ctx.session.chord_symbol()
        ));
    }
    match args.parse::<Note>() {
        Ok(note) => {
            ctx.session.root = note;
            show_current(ctx, 1)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `chord [family]` command
pub fn cmd_chord(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ChordFamily::parse(args) {
        Ok(family) => {
            ctx.session.family = family;
            show_current(ctx, 1)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `chords` command: one-line survey of every family on the
/// current root
pub fn cmd_chords(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut lines = vec![format!(
        "Families on root {} (fret ceiling {}):",
        ctx.session.root.to_string().cyan(),
        ctx.session.max_fret
    )];
    for family in ChordFamily::ALL {
        let mut probe = ctx.session.clone();
        probe.family = family;
        let results = probe.voicings();
        let summary = match results.first() {
            Some(best) => format!(
                "{} voicings, e.g. {}",
                results.len(),
                best.voicing.to_string().bold()
            ),
            None => "no playable voicings".yellow().to_string(),
        };
        lines.push(format!(
            "  {:<16} {:<7} {}",
            family.name(),
            format!("{}{}", probe.root, family.suffix()).cyan(),
            summary
        ));
    }
    CommandResult::Message(lines.join("\n"))
}

/// Handle `frets <max>` command
pub fn cmd_frets(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Searching up to fret {}",
            ctx.session.max_fret
        ));
    }
    match args.parse::<u8>() {
        Ok(max) if max <= MAX_FRET_CEILING => {
            ctx.session.max_fret = max;
            show_current(ctx, 1)
        }
        _ => CommandResult::Error(format!(
            "Fret ceiling must be a number from 0 to {}",
            MAX_FRET_CEILING
        )),
    }
}

/// Handle `scale [name]` command
pub fn cmd_scale(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        let names: Vec<String> = Scale::all()
            .iter()
            .map(|s| format!("  {}", s.name().cyan()))
            .collect();
        return CommandResult::Message(format!(
            "Scale is {}. Available:\n{}",
            ctx.session.scale.name().bold(),
            names.join("\n")
        ));
    }
    match Scale::by_name(args) {
        Some(scale) => {
            ctx.session.scale = scale;
            CommandResult::Message(format!(
                "Scale set to {} (key {})",
                scale.name().bold(),
                ctx.session.root.to_string().cyan()
            ))
        }
        None => CommandResult::Error(format!("Unknown scale: {}", args)),
    }
}

/// Handle `degree <1-7> [7]` command: voicings for the chord built on a
/// scale degree of the current key, without changing the session chord
pub fn cmd_degree(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 2 {
        return CommandResult::Error("Usage: degree <1-7> [7]".to_string());
    }
    let degree = match parts[0].parse::<usize>() {
        Ok(d) if (1..=7).contains(&d) => d - 1,
        _ => return CommandResult::Error("Scale degree must be 1-7".to_string()),
    };
    let seventh = match parts.get(1) {
        None => false,
        Some(&"7") => true,
        Some(other) => {
            return CommandResult::Error(format!("Expected '7' after the degree, got {}", other))
        }
    };

    match ctx.session.scale.degree_chord(ctx.session.root, degree, seventh) {
        Ok(degree_chord) => {
            let results = ctx.session.voicings_for(&degree_chord.spec);
            let symbol = format!(
                "{} {} (degree {} of {} {})",
                degree_chord.spec.root(),
                degree_chord.quality,
                degree + 1,
                ctx.session.root,
                ctx.session.scale.name()
            );
            CommandResult::Message(render_page(
                &results,
                1,
                &symbol,
                &degree_chord.spec,
                &ctx.session.tuning,
            ))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `inversions <all | list>` command, e.g. `inversions natural,first`
pub fn cmd_inversions(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        let f = &ctx.session.filter;
        let mut shown = Vec::new();
        if f.natural {
            shown.push("natural");
        }
        if f.first {
            shown.push("first");
        }
        if f.second {
            shown.push("second");
        }
        return CommandResult::Message(format!("Showing inversions: {}", shown.join(", ")));
    }

    if args.eq_ignore_ascii_case("all") {
        ctx.session.filter = InversionFilter::all();
        return show_current(ctx, 1);
    }

    let mut filter = InversionFilter {
        natural: false,
        first: false,
        second: false,
    };
    for token in args.split(|c| c == ',' || c == ' ').filter(|t| !t.is_empty()) {
        match token.to_lowercase().as_str() {
            "natural" | "root" => filter.natural = true,
            "first" | "1st" => filter.first = true,
            "second" | "2nd" => filter.second = true,
            other => {
                return CommandResult::Error(format!(
                    "Unknown inversion: {} (use natural, first, second, or all)",
                    other
                ))
            }
        }
    }
    ctx.session.filter = filter;
    show_current(ctx, 1)
}

/// Handle `voicings [page]` command
pub fn cmd_voicings(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let page = if args.is_empty() {
        1
    } else {
        match args.parse::<usize>() {
            Ok(p) if p >= 1 => p,
            _ => return CommandResult::Error("Usage: voicings [page]".to_string()),
        }
    };
    show_current(ctx, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileTuningStore;
    use fretwork_core::search::Inversion;

    fn ctx(tag: &str) -> CommandContext {
        colored::control::set_override(false);
        let path = std::env::temp_dir().join(format!(
            "fretwork-chord-cmd-{}-{}.txt",
            tag,
            std::process::id()
        ));
        CommandContext::with_store(FileTuningStore::new(path))
    }

    #[test]
    fn test_chord_symbol_parsing() {
        let (root, family) = parse_chord_symbol("Am7").unwrap();
        assert_eq!(root.pitch_class(), 9);
        assert_eq!(family, ChordFamily::MinorSeventh);

        let (root, family) = parse_chord_symbol("C#").unwrap();
        assert_eq!(root.pitch_class(), 1);
        assert_eq!(family, ChordFamily::Major);

        let (root, family) = parse_chord_symbol("Dbmaj7").unwrap();
        assert_eq!(root.pitch_class(), 1);
        assert_eq!(family, ChordFamily::MajorSeventh);

        let (root, family) = parse_chord_symbol("Esus4").unwrap();
        assert_eq!(root.pitch_class(), 4);
        assert_eq!(family, ChordFamily::Sus4);

        assert!(parse_chord_symbol("H7").is_none());
        assert!(parse_chord_symbol("A weird7").is_none());
        assert!(parse_chord_symbol("").is_none());
    }

    #[test]
    fn test_root_and_chord_update_the_session() {
        let mut ctx = ctx("session");
        cmd_root("E", &mut ctx);
        cmd_chord("m", &mut ctx);
        assert_eq!(ctx.session.chord_symbol(), "Em");

        match cmd_root("bad note", &mut ctx) {
            CommandResult::Error(_) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_frets_validates_the_ceiling() {
        let mut ctx = ctx("frets");
        cmd_frets("12", &mut ctx);
        assert_eq!(ctx.session.max_fret, 12);

        assert!(matches!(
            cmd_frets("99", &mut ctx),
            CommandResult::Error(_)
        ));
        assert_eq!(ctx.session.max_fret, 12);
    }

    #[test]
    fn test_degree_command_reports_quality() {
        let mut ctx = ctx("degree");
        cmd_root("C", &mut ctx);

        match cmd_degree("5 7", &mut ctx) {
            // V7 in C major is G dominant
            CommandResult::Message(msg) => {
                assert!(msg.contains("G Major"));
                assert!(msg.contains("degree 5"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        cmd_scale("major pentatonic", &mut ctx);
        assert!(matches!(
            cmd_degree("4", &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_inversions_filter_tokens() {
        let mut ctx = ctx("inversions");
        cmd_root("E", &mut ctx);

        cmd_inversions("natural", &mut ctx);
        for ranked in ctx.session.voicings() {
            assert_eq!(ranked.inversion, Inversion::Natural);
        }

        cmd_inversions("all", &mut ctx);
        assert!(ctx.session.filter.first && ctx.session.filter.second);

        assert!(matches!(
            cmd_inversions("fourth", &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_voicings_pages() {
        let mut ctx = ctx("pages");
        match cmd_voicings("", &mut ctx) {
            CommandResult::Message(msg) => assert!(msg.contains("voicings")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            cmd_voicings("0", &mut ctx),
            CommandResult::Error(_)
        ));
    }
}
