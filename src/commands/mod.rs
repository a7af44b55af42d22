//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod chords;
pub mod general;
pub mod tuning;

use crate::session::Session;
use crate::store::FileTuningStore;

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, try reading as a chord symbol
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub session: Session,
    pub store: FileTuningStore,
}

impl CommandContext {
    pub fn new() -> Self {
        Self::with_store(FileTuningStore::default())
    }

    /// Create a context backed by a specific tuning store
    pub fn with_store(store: FileTuningStore) -> Self {
        Self {
            session: Session::new(),
            store,
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "tuning preset")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Tuning commands (register specific prefixes before "tuning")
    registry.register("tuning preset", tuning::cmd_tuning_preset);
    registry.register("tuning set", tuning::cmd_tuning_set);
    registry.register("tuning save", tuning::cmd_tuning_save);
    registry.register("tuning load", tuning::cmd_tuning_load);
    registry.register("tuning saved", tuning::cmd_tuning_saved);
    registry.register("tuning", tuning::cmd_tuning_show);
    registry.register("string", tuning::cmd_string);

    // Chord and voicing commands
    registry.register("root", chords::cmd_root);
    registry.register("chords", chords::cmd_chords);
    registry.register("chord", chords::cmd_chord);
    registry.register("frets", chords::cmd_frets);
    registry.register("scale", chords::cmd_scale);
    registry.register("degree", chords::cmd_degree);
    registry.register("inversions", chords::cmd_inversions);
    registry.register("voicings", chords::cmd_voicings);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretwork_core::types::ChordFamily;

    fn ctx() -> CommandContext {
        colored::control::set_override(false);
        let path = std::env::temp_dir().join(format!(
            "fretwork-registry-{}.txt",
            std::process::id()
        ));
        CommandContext::with_store(FileTuningStore::new(path))
    }

    #[test]
    fn test_longest_prefix_wins() {
        let registry = create_registry();
        let mut ctx = ctx();

        // "tuning preset ..." must not fall through to the bare "tuning" handler
        match registry.execute("tuning preset drop d", &mut ctx) {
            CommandResult::Message(msg) => assert!(msg.contains("Drop D")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(ctx.session.tuning.pitch(0), 2); // low D
    }

    #[test]
    fn test_chord_and_chords_do_not_collide() {
        let registry = create_registry();
        let mut ctx = ctx();

        match registry.execute("chord m7", &mut ctx) {
            CommandResult::Message(_) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(ctx.session.family, ChordFamily::MinorSeventh);

        // Exact "chords" hits the all-families handler, not "chord" with args "s"
        match registry.execute("chords", &mut ctx) {
            CommandResult::Message(msg) => assert!(msg.contains("Major Seventh")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_input_is_not_a_command() {
        let registry = create_registry();
        let mut ctx = ctx();
        assert!(matches!(
            registry.execute("frobnicate", &mut ctx),
            CommandResult::NotACommand
        ));
    }

    #[test]
    fn test_quit_and_exit() {
        let registry = create_registry();
        let mut ctx = ctx();
        assert!(matches!(
            registry.execute("quit", &mut ctx),
            CommandResult::Exit
        ));
        assert!(matches!(
            registry.execute("exit", &mut ctx),
            CommandResult::Exit
        ));
    }
}
