//! Interactive REPL for exploring chord voicings

use crate::commands::{chords, create_registry, CommandContext, CommandResult};
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};

/// Interactive voicing explorer
pub struct Repl {
    editor: DefaultEditor,
    ctx: CommandContext,
}

impl Repl {
    /// Create a new REPL instance with the default tuning store
    pub fn new() -> RustylineResult<Self> {
        Ok(Repl {
            editor: DefaultEditor::new()?,
            ctx: CommandContext::new(),
        })
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎸".bright_yellow(),
            "Fretwork Chord Explorer".bright_cyan().bold()
        );
        println!("Tuning: {}", self.ctx.session.tuning.to_string().bold());
        println!(
            "Type a chord symbol like {} or {}, or commands like {}, {}, {}",
            "Am7".cyan(),
            "C#maj7".cyan(),
            "chord m".cyan(),
            "frets 12".cyan(),
            "tuning preset drop d".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        let registry = create_registry();

        loop {
            let prompt = format!("{} ", "fretwork>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(line.to_owned())?;

                    // Try to execute as a command
                    match registry.execute(line, &mut self.ctx) {
                        CommandResult::Success => {
                            // Command executed, no output needed
                        }
                        CommandResult::Message(msg) => {
                            println!("{}", msg);
                        }
                        CommandResult::Exit => {
                            println!("{} 🎸", "Goodbye!".bright_cyan());
                            break;
                        }
                        CommandResult::Error(e) => {
                            println!("{} {}", "Error:".bright_red().bold(), e.red());
                        }
                        CommandResult::NotACommand => {
                            // Fall back to reading the input as a chord symbol
                            match chords::parse_chord_symbol(line) {
                                Some((root, family)) => {
                                    self.ctx.session.root = root;
                                    self.ctx.session.family = family;
                                    match chords::cmd_voicings("", &mut self.ctx) {
                                        CommandResult::Message(msg) => println!("{}", msg),
                                        CommandResult::Error(e) => {
                                            println!("{} {}", "Error:".bright_red().bold(), e.red())
                                        }
                                        _ => {}
                                    }
                                }
                                None => {
                                    println!(
                                        "{} {} (type '{}' for commands)",
                                        "Unknown input:".bright_red().bold(),
                                        line.red(),
                                        "help".bright_green()
                                    );
                                }
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{} 🎸", "Goodbye!".bright_cyan());
                    break;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    println!("{} {:?}", "Error:".bright_red().bold(), err);
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Create and run a REPL
pub fn start() -> Result<()> {
    let mut repl = Repl::new()?;
    repl.run()
}
