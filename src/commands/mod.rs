//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod general;
pub mod rhythm;

use crate::board::TerminalBoard;
use drumkit_core::{Outcome, StopHandle, Trainer};
use std::sync::Arc;
use std::thread;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, try interpreting as pad presses
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub trainer: Arc<Trainer>,
    pub board: Option<Arc<TerminalBoard>>,
    /// Run sessions on a worker thread so `stop` can be typed while they play
    pub background: bool,
}

impl CommandContext {
    pub fn new(trainer: Arc<Trainer>, board: Arc<TerminalBoard>) -> Self {
        Self {
            trainer,
            board: Some(board),
            background: true,
        }
    }

    /// Context without a terminal board that runs sessions inline
    pub fn headless(trainer: Arc<Trainer>) -> Self {
        Self {
            trainer,
            board: None,
            background: false,
        }
    }

    /// Run a playback session, on a worker thread unless headless. The
    /// session is registered here, before the worker starts, so a `stop`
    /// entered right after always reaches it.
    pub fn run_session<F>(&self, run: F)
    where
        F: FnOnce(&Trainer, StopHandle) -> Outcome + Send + 'static,
    {
        let trainer = self.trainer.clone();
        let session = trainer.prepare();
        if self.background {
            thread::spawn(move || {
                let outcome = run(&trainer, session);
                log::debug!("worker session ended: {:?}", outcome);
            });
        } else {
            let outcome = run(&trainer, session);
            log::debug!("session ended: {:?}", outcome);
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix, longest first
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

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

    // Rhythm commands
    registry.register("suggest", rhythm::cmd_suggest);
    registry.register("teach", rhythm::cmd_teach);
    registry.register("replay teach", rhythm::cmd_replay_teach);
    registry.register("replay", rhythm::cmd_replay);
    registry.register("stop", rhythm::cmd_stop);
    registry.register("hit", rhythm::cmd_hit);

    // Settings
    registry.register("length", general::cmd_length);
    registry.register("density", general::cmd_density);
    registry.register("interval", general::cmd_interval);
    registry.register("volume", general::cmd_volume);

    // General commands
    registry.register("kit", general::cmd_kit);
    registry.register("status", general::cmd_status);
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}
