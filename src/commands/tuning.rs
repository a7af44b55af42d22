//! Tuning commands: show, detune, toggle strings, presets, persistence

use crate::commands::{CommandContext, CommandResult};
use crate::display::note_name;
use crate::store::TuningStore;
use colored::*;
use fretwork_core::types::tuning::{STRING_COUNT, STRING_NAMES, TUNING_PRESETS};
use fretwork_core::types::Tuning;

/// Map a guitarist string number (1 = high E .. 6 = low E) to the internal
/// low-first index
fn string_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if (1..=STRING_COUNT).contains(&n) => Ok(STRING_COUNT - n),
        _ => Err(format!(
            "String must be a number from 1 (high) to {} (low)",
            STRING_COUNT
        )),
    }
}

/// Handle `tuning` command
pub fn cmd_tuning_show(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let tuning = &ctx.session.tuning;
    let mut out = format!("Tuning: {}\n", tuning.to_string().bold());
    // Display high string first, the way a player reads a headstock
    for string in (0..STRING_COUNT).rev() {
        let offset = tuning.offsets()[string];
        let state = if tuning.is_active(string) {
            format!("{:+} st", offset)
        } else {
            "off".red().to_string()
        };
        out.push_str(&format!(
            "  {} = {:<2} ({})\n",
            STRING_NAMES[string],
            note_name(tuning.pitch(string)),
            state
        ));
    }
    CommandResult::Message(out.trim_end().to_string())
}

/// Handle `tuning set <string> <semitones>` command
pub fn cmd_tuning_set(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        return CommandResult::Error("Usage: tuning set <string 1-6> <semitones>".to_string());
    }
    let string = match string_index(parts[0]) {
        Ok(s) => s,
        Err(e) => return CommandResult::Error(e),
    };
    let offset: i8 = match parts[1].parse() {
        Ok(o) => o,
        Err(_) => return CommandResult::Error(format!("Bad offset: {}", parts[1])),
    };

    ctx.session.tuning.set_offset(string, offset);
    let applied = ctx.session.tuning.offsets()[string];
    CommandResult::Message(format!(
        "String {}: {:+} st, now sounds {}",
        STRING_NAMES[string].bold(),
        applied,
        note_name(ctx.session.tuning.pitch(string)).cyan()
    ))
}

/// Handle `string <n> on|off` command
pub fn cmd_string(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        return CommandResult::Error("Usage: string <1-6> on|off".to_string());
    }
    let string = match string_index(parts[0]) {
        Ok(s) => s,
        Err(e) => return CommandResult::Error(e),
    };
    let active = match parts[1].to_lowercase().as_str() {
        "on" => true,
        "off" => false,
        other => return CommandResult::Error(format!("Expected on or off, got {}", other)),
    };

    ctx.session.tuning.set_active(string, active);
    CommandResult::Message(format!(
        "String {} is now {}",
        STRING_NAMES[string].bold(),
        if active {
            "on".green().to_string()
        } else {
            "off".red().to_string()
        }
    ))
}

/// Handle `tuning preset [name]` command
pub fn cmd_tuning_preset(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        let names: Vec<String> = TUNING_PRESETS
            .iter()
            .map(|(name, offsets)| format!("  {} ({})", name.cyan(), Tuning::with_offsets(*offsets)))
            .collect();
        return CommandResult::Message(format!("Presets:\n{}", names.join("\n")));
    }

    match Tuning::preset(args) {
        Some(tuning) => {
            // Presets reset detuning but keep the player's string toggles
            let active = ctx.session.tuning.active();
            ctx.session.tuning = tuning;
            for (string, &on) in active.iter().enumerate() {
                ctx.session.tuning.set_active(string, on);
            }
            let name = TUNING_PRESETS
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(args))
                .map(|(n, _)| *n)
                .unwrap_or(args);
            CommandResult::Message(format!(
                "Tuning set to {}: {}",
                name.bold(),
                ctx.session.tuning
            ))
        }
        None => CommandResult::Error(format!(
            "Unknown preset: {} (try 'tuning preset' to list them)",
            args
        )),
    }
}

/// Handle `tuning save <name>` command
pub fn cmd_tuning_save(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: tuning save <name>".to_string());
    }
    match ctx.store.save(args, ctx.session.tuning.offsets()) {
        Ok(()) => CommandResult::Message(format!("Saved tuning '{}'", args.bold())),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `tuning load <name>` command
pub fn cmd_tuning_load(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: tuning load <name>".to_string());
    }
    match ctx.store.load(args) {
        Ok(tuning) => {
            let active = ctx.session.tuning.active();
            ctx.session.tuning = tuning;
            for (string, &on) in active.iter().enumerate() {
                ctx.session.tuning.set_active(string, on);
            }
            CommandResult::Message(format!(
                "Loaded '{}': {}",
                args.bold(),
                ctx.session.tuning
            ))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `tuning saved` command
pub fn cmd_tuning_saved(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.store.load_all() {
        Ok(entries) if entries.is_empty() => {
            CommandResult::Message("No saved tunings yet (use 'tuning save <name>')".to_string())
        }
        Ok(entries) => {
            let lines: Vec<String> = entries
                .iter()
                .map(|(name, offsets)| {
                    format!("  {} ({})", name.cyan(), Tuning::with_offsets(*offsets))
                })
                .collect();
            CommandResult::Message(format!("Saved tunings:\n{}", lines.join("\n")))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
