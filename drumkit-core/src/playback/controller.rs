//! Cancellable, time-paced playback of rhythm patterns
//!
//! Two loops share one shape: step through the pattern in order, check the
//! session's stop flag at the top of each step, drive the presentation, then
//! wait one interval. Audible playback sounds and flashes each hit; teach mode
//! only holds a highlight on the pad to strike and clears it after the wait.
//!
//! Only the current session drives the presentation. Preparing a new one
//! stops the old one, and the old loop goes quiet at once: it makes no
//! further presentation calls, not even its "Stopped." status.

use crate::playback::session::StopHandle;
use crate::playback::ticker::Ticker;
use crate::presentation::{Highlight, Presentation};
use crate::types::{Kit, Pattern, Symbol};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const STATUS_STOPPED: &str = "Stopped.";
pub const STATUS_REST: &str = "Rest";
pub const STATUS_PLAY_DONE: &str = "Try to play this rhythm!";
pub const STATUS_TEACH_DONE: &str = "Now try this rhythm!";

/// How a pattern is presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackMode {
    /// Sound and flash every hit
    Audible,
    /// Silent highlighting to cue a player
    Teach,
}

impl PlaybackMode {
    /// Default time between steps. Teach mode is slower to leave the learner
    /// time to react.
    pub fn default_interval(&self) -> Duration {
        match self {
            PlaybackMode::Audible => Duration::from_millis(400),
            PlaybackMode::Teach => Duration::from_millis(1000),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlaybackMode::Audible => "play",
            PlaybackMode::Teach => "teach",
        }
    }

    fn closing_status(&self) -> &'static str {
        match self {
            PlaybackMode::Audible => STATUS_PLAY_DONE,
            PlaybackMode::Teach => STATUS_TEACH_DONE,
        }
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a playback loop ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every step was processed
    Completed { steps: usize },
    /// A stop was observed before step `completed_steps`
    Stopped { completed_steps: usize },
}

impl Outcome {
    pub fn was_stopped(&self) -> bool {
        matches!(self, Outcome::Stopped { .. })
    }

    pub fn steps_processed(&self) -> usize {
        match self {
            Outcome::Completed { steps } => *steps,
            Outcome::Stopped { completed_steps } => *completed_steps,
        }
    }
}

/// Status line for a struck pad
pub fn pressed_status(key: impl fmt::Display) -> String {
    format!("You pressed: {}", key)
}

/// Runs playback sessions against a presentation
pub struct PlaybackController {
    presentation: Arc<dyn Presentation>,
    ticker: Arc<dyn Ticker>,
    kit: Kit,
    current: Mutex<Option<StopHandle>>,
}

impl PlaybackController {
    pub fn new(kit: Kit, presentation: Arc<dyn Presentation>, ticker: Arc<dyn Ticker>) -> Self {
        Self {
            presentation,
            ticker,
            kit,
            current: Mutex::new(None),
        }
    }

    pub fn kit(&self) -> &Kit {
        &self.kit
    }

    pub fn presentation(&self) -> &Arc<dyn Presentation> {
        &self.presentation
    }

    /// Play a pattern audibly, blocking the calling thread until it finishes
    /// or is stopped
    pub fn play_audible(&self, pattern: &Pattern, interval: Duration) -> Outcome {
        self.play(PlaybackMode::Audible, pattern, interval)
    }

    /// Teach a pattern by highlighting pads, blocking until finished or stopped
    pub fn teach(&self, pattern: &Pattern, interval: Duration) -> Outcome {
        self.play(PlaybackMode::Teach, pattern, interval)
    }

    /// Run one session in the given mode
    pub fn play(&self, mode: PlaybackMode, pattern: &Pattern, interval: Duration) -> Outcome {
        let session = self.prepare();
        self.play_prepared(session, mode, pattern, interval)
    }

    /// Register a fresh session as current without starting it. A `stop_all`
    /// from here on reaches this session even if its loop has not begun, so a
    /// caller handing the loop to another thread should prepare first.
    ///
    /// A session that has not finished is asked to stop, and any cue it left
    /// lit is cleared. From this point it no longer touches the board.
    pub fn prepare(&self) -> StopHandle {
        let session = StopHandle::new();
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = current.replace(session.clone()) {
            if !previous.is_finished() {
                log::info!(
                    "session {} superseded by session {}",
                    previous.id(),
                    session.id()
                );
                previous.stop();
                self.presentation.unhighlight_all();
            }
        }
        session
    }

    /// Run a session obtained from [`prepare`](Self::prepare)
    pub fn play_prepared(
        &self,
        session: StopHandle,
        mode: PlaybackMode,
        pattern: &Pattern,
        interval: Duration,
    ) -> Outcome {
        session.begin();
        log::info!(
            "session {} started: {} {} steps every {:?}",
            session.id(),
            mode,
            pattern.len(),
            interval
        );

        let outcome = self.run_steps(mode, pattern, interval, &session);
        session.finish();

        let status = match outcome {
            Outcome::Completed { .. } => mode.closing_status(),
            Outcome::Stopped { .. } => STATUS_STOPPED,
        };
        let owned = self.if_current(&session, || self.presentation.set_status(status));
        match outcome {
            Outcome::Completed { .. } => log::info!("session {} completed", session.id()),
            Outcome::Stopped { completed_steps } if owned => log::info!(
                "session {} stopped after {} steps",
                session.id(),
                completed_steps
            ),
            Outcome::Stopped { completed_steps } => log::info!(
                "session {} superseded after {} steps",
                session.id(),
                completed_steps
            ),
        }
        outcome
    }

    fn run_steps(
        &self,
        mode: PlaybackMode,
        pattern: &Pattern,
        interval: Duration,
        session: &StopHandle,
    ) -> Outcome {
        for (index, symbol) in pattern.iter().enumerate() {
            let stepped = !session.is_stop_requested()
                && self.if_current(session, || {
                    log::debug!("session {} step {}: {}", session.id(), index, symbol);
                    match mode {
                        PlaybackMode::Audible => self.sound_step(symbol),
                        PlaybackMode::Teach => self.cue_step(symbol),
                    }
                });
            if !stepped {
                return Outcome::Stopped {
                    completed_steps: index,
                };
            }

            self.ticker.wait(interval, session);

            if mode == PlaybackMode::Teach {
                self.if_current(session, || self.presentation.unhighlight_all());
            }
        }

        // A stop during the last wait still counts
        if session.is_stop_requested() {
            return Outcome::Stopped {
                completed_steps: pattern.len(),
            };
        }
        Outcome::Completed {
            steps: pattern.len(),
        }
    }

    /// Run `f` only while `session` is the current one. The lock is held for
    /// the duration, so a newer session cannot start between the check and
    /// the presentation calls.
    fn if_current(&self, session: &StopHandle, f: impl FnOnce()) -> bool {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let owns_board = current
            .as_ref()
            .map(|c| c.same_session(session))
            .unwrap_or(false);
        if owns_board {
            f();
        }
        owns_board
    }

    fn sound_step(&self, symbol: &Symbol) {
        match symbol {
            Symbol::Hit(key) => match self.kit.get(*key) {
                Some(voice) => {
                    self.presentation.play_sound(voice);
                    self.presentation.highlight(*key, Highlight::Pressed);
                    self.presentation.set_status(&pressed_status(key));
                }
                None => log::warn!("no voice bound to '{}', skipping step", key),
            },
            Symbol::Rest => self.presentation.set_status(STATUS_REST),
        }
    }

    fn cue_step(&self, symbol: &Symbol) {
        if let Symbol::Hit(key) = symbol {
            if self.kit.contains(*key) {
                self.presentation.highlight(*key, Highlight::Teach);
            } else {
                log::warn!("no voice bound to '{}', skipping step", key);
            }
        }
    }

    /// Ask the current session to stop. Idempotent, and harmless when nothing
    /// is playing.
    pub fn stop_all(&self) {
        if let Some(session) = self.current_session() {
            session.stop();
        }
    }

    /// Handle to the most recently prepared session
    pub fn current_session(&self) -> Option<StopHandle> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether the most recent session has been asked to stop
    pub fn is_stop_requested(&self) -> bool {
        self.current_session()
            .map(|s| s.is_stop_requested())
            .unwrap_or(false)
    }

    /// Whether the current session is prepared or stepping through a pattern
    pub fn is_running(&self) -> bool {
        self.current_session()
            .map(|s| !s.is_finished())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::ticker::InstantTicker;
    use crate::presentation::{EventLog, PresentationEvent};
    use crate::types::VoiceKey;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(c: char) -> VoiceKey {
        VoiceKey::new(c).unwrap()
    }

    /// Raises the stop flag once `after` waits have elapsed
    struct StopAfterWaits {
        after: usize,
        waits: AtomicUsize,
    }

    impl StopAfterWaits {
        fn new(after: usize) -> Self {
            Self {
                after,
                waits: AtomicUsize::new(0),
            }
        }
    }

    impl Ticker for StopAfterWaits {
        fn wait(&self, _interval: Duration, session: &StopHandle) {
            let waits = self.waits.fetch_add(1, Ordering::SeqCst) + 1;
            if waits == self.after {
                session.stop();
            }
        }
    }

    fn controller_with(ticker: Arc<dyn Ticker>) -> (PlaybackController, Arc<EventLog>) {
        let log = Arc::new(EventLog::new());
        let controller = PlaybackController::new(Kit::standard(), log.clone(), ticker);
        (controller, log)
    }

    fn eight_hits() -> Pattern {
        Pattern::parse("w a s d j k l w").unwrap()
    }

    #[test]
    fn test_audible_completes_with_closing_status() {
        let (controller, log) = controller_with(Arc::new(InstantTicker));
        let pattern = Pattern::parse("k - j").unwrap();

        let outcome = controller.play_audible(&pattern, Duration::from_millis(400));

        assert_eq!(outcome, Outcome::Completed { steps: 3 });
        assert_eq!(log.sounds(), vec![key('k'), key('j')]);
        assert_eq!(
            log.statuses(),
            vec!["You pressed: K", "Rest", "You pressed: J", STATUS_PLAY_DONE]
        );
        assert_eq!(
            log.highlights(),
            vec![(key('k'), Highlight::Pressed), (key('j'), Highlight::Pressed)]
        );
    }

    #[test]
    fn test_audible_stop_before_step_three() {
        let (controller, log) = controller_with(Arc::new(StopAfterWaits::new(3)));

        let outcome = controller.play_audible(&eight_hits(), Duration::from_millis(400));

        assert_eq!(outcome, Outcome::Stopped { completed_steps: 3 });
        assert_eq!(log.sounds(), vec![key('w'), key('a'), key('s')]);
        assert_eq!(log.highlights().len(), 3);
        assert_eq!(log.last_status().as_deref(), Some(STATUS_STOPPED));
        assert!(!log.statuses().iter().any(|s| s == STATUS_PLAY_DONE));
    }

    #[test]
    fn test_teach_never_sounds_and_clears_after_each_step() {
        let (controller, log) = controller_with(Arc::new(InstantTicker));
        let pattern = Pattern::parse("w - k").unwrap();

        let outcome = controller.teach(&pattern, Duration::from_millis(1000));

        assert_eq!(outcome, Outcome::Completed { steps: 3 });
        assert!(log.sounds().is_empty());
        assert_eq!(
            log.events(),
            vec![
                PresentationEvent::Highlight(key('w'), Highlight::Teach),
                PresentationEvent::UnhighlightAll,
                PresentationEvent::UnhighlightAll,
                PresentationEvent::Highlight(key('k'), Highlight::Teach),
                PresentationEvent::UnhighlightAll,
                PresentationEvent::Status(STATUS_TEACH_DONE.to_string()),
            ]
        );
        assert_eq!(log.max_held(), 1);
    }

    #[test]
    fn test_teach_stopped() {
        let (controller, log) = controller_with(Arc::new(StopAfterWaits::new(1)));

        let outcome = controller.teach(&eight_hits(), Duration::from_millis(1000));

        assert_eq!(outcome, Outcome::Stopped { completed_steps: 1 });
        assert_eq!(log.highlights(), vec![(key('w'), Highlight::Teach)]);
        assert!(log.held().is_empty());
        assert_eq!(log.last_status().as_deref(), Some(STATUS_STOPPED));
    }

    #[test]
    fn test_stop_during_last_wait_is_not_a_completion() {
        let (controller, log) = controller_with(Arc::new(StopAfterWaits::new(3)));
        let pattern = Pattern::parse("w a s").unwrap();

        let outcome = controller.play_audible(&pattern, Duration::from_millis(400));

        assert_eq!(outcome, Outcome::Stopped { completed_steps: 3 });
        assert_eq!(log.sounds().len(), 3);
        assert_eq!(log.last_status().as_deref(), Some(STATUS_STOPPED));
        assert!(!log.statuses().iter().any(|s| s == STATUS_PLAY_DONE));
    }

    #[test]
    fn test_prepared_session_sees_an_early_stop() {
        let (controller, log) = controller_with(Arc::new(InstantTicker));

        let session = controller.prepare();
        assert!(controller.is_running());
        controller.stop_all();
        let outcome =
            controller.play_prepared(session, PlaybackMode::Audible, &eight_hits(), Duration::ZERO);

        assert_eq!(outcome, Outcome::Stopped { completed_steps: 0 });
        assert!(log.sounds().is_empty());
        assert_eq!(log.statuses(), vec![STATUS_STOPPED]);
        assert!(!controller.is_running());
    }

    #[test]
    fn test_superseded_session_leaves_the_board_alone() {
        let (controller, log) = controller_with(Arc::new(InstantTicker));

        let stale = controller.prepare();
        let fresh = controller.prepare();
        assert!(stale.is_stop_requested());
        log.clear();

        let outcome =
            controller.play_prepared(stale, PlaybackMode::Teach, &eight_hits(), Duration::ZERO);
        assert_eq!(outcome, Outcome::Stopped { completed_steps: 0 });
        assert!(log.events().is_empty());

        let k = Pattern::parse("k").unwrap();
        controller.play_prepared(fresh, PlaybackMode::Audible, &k, Duration::ZERO);
        assert_eq!(log.statuses(), vec!["You pressed: K", STATUS_PLAY_DONE]);
    }

    #[test]
    fn test_empty_pattern_completes_immediately() {
        let (controller, log) = controller_with(Arc::new(InstantTicker));

        let outcome = controller.play_audible(&Pattern::default(), Duration::from_millis(400));

        assert_eq!(outcome, Outcome::Completed { steps: 0 });
        assert_eq!(log.statuses(), vec![STATUS_PLAY_DONE]);
    }

    #[test]
    fn test_unknown_voice_is_a_silent_step() {
        let log = Arc::new(EventLog::new());
        let kit = Kit::parse("k=kick").unwrap();
        let controller = PlaybackController::new(kit, log.clone(), Arc::new(InstantTicker));

        let outcome = controller.play_audible(&Pattern::parse("z k").unwrap(), Duration::ZERO);

        assert_eq!(outcome, Outcome::Completed { steps: 2 });
        assert_eq!(log.sounds(), vec![key('k')]);
        assert_eq!(log.statuses(), vec!["You pressed: K", STATUS_PLAY_DONE]);
    }

    #[test]
    fn test_stop_all_idempotent_and_harmless_when_idle() {
        let (controller, log) = controller_with(Arc::new(InstantTicker));

        controller.stop_all();
        controller.stop_all();
        assert!(!controller.is_stop_requested());
        assert!(log.events().is_empty());

        controller.play_audible(&Pattern::parse("k").unwrap(), Duration::ZERO);
        controller.stop_all();
        controller.stop_all();
        assert!(controller.is_stop_requested());
        assert!(!controller.is_running());
        assert_eq!(log.statuses(), vec!["You pressed: K", STATUS_PLAY_DONE]);
    }

    #[test]
    fn test_new_session_resets_cancellation() {
        let (controller, log) = controller_with(Arc::new(InstantTicker));
        controller.play_audible(&Pattern::parse("k").unwrap(), Duration::ZERO);
        controller.stop_all();
        assert!(controller.is_stop_requested());

        let outcome = controller.play_audible(&eight_hits(), Duration::ZERO);

        assert_eq!(outcome, Outcome::Completed { steps: 8 });
        assert!(!controller.is_stop_requested());
        assert_eq!(log.last_status().as_deref(), Some(STATUS_PLAY_DONE));
    }

    #[test]
    fn test_mode_defaults() {
        assert_eq!(
            PlaybackMode::Audible.default_interval(),
            Duration::from_millis(400)
        );
        assert_eq!(
            PlaybackMode::Teach.default_interval(),
            Duration::from_millis(1000)
        );
    }
}
