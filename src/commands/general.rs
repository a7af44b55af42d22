//! General REPL commands (help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Print help information
fn print_help() {
    println!("{}", "🎸 Fretwork Chord Explorer Help".bold());
    println!("{}", "===============================".bold());
    println!();
    println!("{}", "Picking a chord:".green());
    println!("  {}                - Set the root note", "root C#".cyan());
    println!(
        "  {}              - Set the chord family and show voicings",
        "chord m7".cyan()
    );
    println!(
        "  {}                 - Survey every family on the current root",
        "chords".cyan()
    );
    println!(
        "  {}                     - Shortcut: type a chord symbol directly",
        "Am7".cyan()
    );
    println!();
    println!("{}", "Voicings:".green());
    println!("  {}             - Show a page of results", "voicings 2".cyan());
    println!(
        "  {}                - Raise or lower the search ceiling",
        "frets 12".cyan()
    );
    println!(
        "  {}  - Keep only some inversions",
        "inversions natural,first".cyan()
    );
    println!();
    println!("{}", "Scales and degrees:".green());
    println!(
        "  {}       - Pick the session scale",
        "scale minor pentatonic".cyan()
    );
    println!(
        "  {}              - Voicings for a scale-degree chord",
        "degree 5 7".cyan()
    );
    println!();
    println!("{}", "Tuning:".green());
    println!("  {}                 - Show the current tuning", "tuning".cyan());
    println!(
        "  {}   - Load a named preset",
        "tuning preset drop d".cyan()
    );
    println!(
        "  {}       - Detune one string (guitarist numbering)",
        "tuning set 6 -2".cyan()
    );
    println!(
        "  {}           - Disable or enable a string",
        "string 6 off".cyan()
    );
    println!(
        "  {} / {} / {} - Persist tunings",
        "tuning save <name>".cyan(),
        "tuning load <name>".cyan(),
        "tuning saved".cyan()
    );
    println!();
    println!(
        "Type '{}' or {} to exit.",
        "quit".bright_red(),
        "Ctrl+C".bright_red()
    );
}
