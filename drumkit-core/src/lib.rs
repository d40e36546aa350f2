//! # Drumkit Core
//!
//! Rhythm engine for the drumkit board, with no audio or terminal
//! dependencies.
//!
//! - `types`: voices, kits and hit-or-rest patterns.
//! - `generator`: random rhythm generation.
//! - `playback`: cancellable, time-paced audible and teach loops.
//! - `presentation`: the output surface the loops drive.
//! - `trainer`: the trigger surface (press, suggest, teach, stop).
//!
//! ## Example
//!
//! ```
//! use drumkit_core::playback::InstantTicker;
//! use drumkit_core::presentation::EventLog;
//! use drumkit_core::{Kit, Trainer};
//! use std::sync::Arc;
//!
//! let log = Arc::new(EventLog::new());
//! let trainer = Trainer::new(Kit::standard(), log.clone(), Arc::new(InstantTicker));
//! let (pattern, outcome) = trainer.suggest();
//! assert_eq!(pattern.len(), 8);
//! assert!(!outcome.was_stopped());
//! ```

pub mod config;
pub mod generator;
pub mod playback;
pub mod presentation;
pub mod trainer;
pub mod types;

pub use config::{Overrides, TrainerConfig};
pub use generator::PatternGenerator;
pub use playback::{Outcome, PlaybackController, PlaybackMode, StopHandle};
pub use presentation::{Highlight, Presentation};
pub use trainer::Trainer;
pub use types::{DrumSound, Kit, Pattern, Symbol, Voice, VoiceKey};
