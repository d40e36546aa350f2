//! # Drumkit
//!
//! A terminal drum board. Typing a pad's key plays its drum sound; two
//! generative modes suggest a random rhythm and either play it back or teach
//! it by lighting the pads in turn.
//!
//! ## Modules
//!
//! - `audio`: synthesized drum voices and the output stream that mixes them.
//! - `board`: the terminal presentation driven by the rhythm engine.
//! - `commands`: REPL command registry and handlers.
//! - `repl`: the interactive read loop.
//!
//! The rhythm engine itself (patterns, generation, playback sessions) lives in
//! `drumkit-core`.

pub mod audio;
pub mod board;
pub mod commands;
pub mod options;
pub mod repl;

pub use drumkit_core::{Kit, Pattern, PlaybackMode, Trainer};
