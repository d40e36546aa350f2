//! The board's trigger surface
//!
//! `Trainer` ties the kit, the pattern generator, runtime settings and the
//! playback controller together behind the actions a player can take: strike a
//! pad, ask for a suggested rhythm, ask to be taught one, or stop.

use crate::config::{Overrides, TrainerConfig};
use crate::generator::PatternGenerator;
use crate::playback::{
    pressed_status, Outcome, PlaybackController, PlaybackMode, StopHandle, Ticker,
};
use crate::presentation::{Highlight, Presentation};
use crate::types::{Kit, Pattern, VoiceKey};
use std::sync::{Arc, Mutex, RwLock};

pub const SUGGESTION_PREFIX: &str = "Suggested rhythm: ";
pub const TEACH_SUGGESTION: &str = "Watch and follow the highlights!";

pub struct Trainer {
    controller: PlaybackController,
    generator: Mutex<PatternGenerator>,
    config: RwLock<TrainerConfig>,
}

impl Trainer {
    pub fn new(kit: Kit, presentation: Arc<dyn Presentation>, ticker: Arc<dyn Ticker>) -> Self {
        Self {
            controller: PlaybackController::new(kit, presentation, ticker),
            generator: Mutex::new(PatternGenerator::new()),
            config: RwLock::new(TrainerConfig::default()),
        }
    }

    /// Replace the pattern generator (e.g. with a seeded one)
    pub fn with_generator(mut self, generator: PatternGenerator) -> Self {
        self.generator = Mutex::new(generator);
        self
    }

    pub fn with_config(mut self, config: TrainerConfig) -> Self {
        self.config = RwLock::new(config);
        self
    }

    pub fn kit(&self) -> &Kit {
        self.controller.kit()
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn config(&self) -> TrainerConfig {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Change settings in place
    pub fn update_config<R>(&self, f: impl FnOnce(&mut TrainerConfig) -> R) -> R {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        f(&mut config)
    }

    /// Strike a pad directly. Returns false for keys with no voice.
    pub fn press(&self, key: VoiceKey) -> bool {
        let Some(voice) = self.kit().get(key) else {
            return false;
        };
        let presentation = self.controller.presentation();
        presentation.play_sound(voice);
        presentation.highlight(key, Highlight::Pressed);
        presentation.set_status(&pressed_status(key));
        true
    }

    /// Generate a rhythm from the current settings plus overrides
    pub fn generate(&self, mode: PlaybackMode, overrides: &Overrides) -> Pattern {
        let settings = self.config().resolve(mode, overrides);
        let keys = self.kit().keys();
        self.generator
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .generate(settings.length, settings.hit_probability, &keys)
    }

    /// Register the next session now, before its loop runs. See
    /// [`PlaybackController::prepare`].
    pub fn prepare(&self) -> StopHandle {
        self.controller.prepare()
    }

    /// Generate a rhythm, show it, and play it audibly
    pub fn suggest(&self) -> (Pattern, Outcome) {
        self.suggest_with(&Overrides::none())
    }

    pub fn suggest_with(&self, overrides: &Overrides) -> (Pattern, Outcome) {
        self.suggest_in(self.prepare(), overrides)
    }

    /// Like [`suggest_with`](Self::suggest_with), inside a prepared session
    pub fn suggest_in(&self, session: StopHandle, overrides: &Overrides) -> (Pattern, Outcome) {
        let pattern = self.generate(PlaybackMode::Audible, overrides);
        self.controller
            .presentation()
            .set_suggestion_text(&format!("{}{}", SUGGESTION_PREFIX, pattern));
        let outcome = self.run(session, PlaybackMode::Audible, &pattern, overrides);
        (pattern, outcome)
    }

    /// Generate a rhythm and teach it silently
    pub fn teach(&self) -> (Pattern, Outcome) {
        self.teach_with(&Overrides::none())
    }

    pub fn teach_with(&self, overrides: &Overrides) -> (Pattern, Outcome) {
        self.teach_in(self.prepare(), overrides)
    }

    pub fn teach_in(&self, session: StopHandle, overrides: &Overrides) -> (Pattern, Outcome) {
        let pattern = self.generate(PlaybackMode::Teach, overrides);
        self.controller
            .presentation()
            .set_suggestion_text(TEACH_SUGGESTION);
        let outcome = self.run(session, PlaybackMode::Teach, &pattern, overrides);
        (pattern, outcome)
    }

    /// Run a given pattern in a mode with the configured interval
    pub fn replay(&self, mode: PlaybackMode, pattern: &Pattern) -> Outcome {
        self.replay_in(self.prepare(), mode, pattern)
    }

    pub fn replay_in(&self, session: StopHandle, mode: PlaybackMode, pattern: &Pattern) -> Outcome {
        self.run(session, mode, pattern, &Overrides::none())
    }

    fn run(
        &self,
        session: StopHandle,
        mode: PlaybackMode,
        pattern: &Pattern,
        overrides: &Overrides,
    ) -> Outcome {
        let interval = self.config().resolve(mode, overrides).interval;
        self.controller.play_prepared(session, mode, pattern, interval)
    }

    /// Stop whatever session is running
    pub fn stop(&self) {
        self.controller.stop_all();
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }
}
