//! Presentation collaborator
//!
//! The sequencing engine never touches audio devices or screens directly. It
//! drives a `Presentation`, which plays sounds, lights pads and shows text.
//! Implementations absorb their own failures: a missing sample or an unknown
//! pad is a silent no-op, never an error surfaced to the loop.

use crate::types::{Voice, VoiceKey};
use std::collections::BTreeSet;
use std::sync::Mutex;

/// Visual state applied to a pad
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Brief flash for a pad that was just struck
    Pressed,
    /// Held cue showing the learner which pad to strike next
    Teach,
}

/// Output surface driven by the board and the playback loops
pub trait Presentation: Send + Sync {
    /// Start the voice's sample from the beginning, cutting off any earlier
    /// playback of the same voice
    fn play_sound(&self, voice: &Voice);

    fn highlight(&self, key: VoiceKey, style: Highlight);

    /// Clear every pad's highlight
    fn unhighlight_all(&self);

    /// Replace the status line
    fn set_status(&self, text: &str);

    /// Replace the rhythm suggestion line
    fn set_suggestion_text(&self, text: &str);
}

/// Everything a presentation was asked to do, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresentationEvent {
    Sound(VoiceKey),
    Highlight(VoiceKey, Highlight),
    UnhighlightAll,
    Status(String),
    Suggestion(String),
}

#[derive(Default)]
struct LogState {
    events: Vec<PresentationEvent>,
    held: BTreeSet<VoiceKey>,
    max_held: usize,
}

/// Presentation that records calls instead of rendering them.
///
/// Used for headless runs and to inspect what a session did. `Teach`
/// highlights are held until `unhighlight_all`; `Pressed` highlights are
/// momentary and are not counted as held.
#[derive(Default)]
pub struct EventLog {
    state: Mutex<LogState>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut LogState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    pub fn events(&self) -> Vec<PresentationEvent> {
        self.with_state(|s| s.events.clone())
    }

    /// Statuses written so far, oldest first
    pub fn statuses(&self) -> Vec<String> {
        self.with_state(|s| {
            s.events
                .iter()
                .filter_map(|e| match e {
                    PresentationEvent::Status(text) => Some(text.clone()),
                    _ => None,
                })
                .collect()
        })
    }

    pub fn last_status(&self) -> Option<String> {
        self.statuses().pop()
    }

    pub fn last_suggestion(&self) -> Option<String> {
        self.with_state(|s| {
            s.events.iter().rev().find_map(|e| match e {
                PresentationEvent::Suggestion(text) => Some(text.clone()),
                _ => None,
            })
        })
    }

    /// Voices whose sound was triggered, in order
    pub fn sounds(&self) -> Vec<VoiceKey> {
        self.with_state(|s| {
            s.events
                .iter()
                .filter_map(|e| match e {
                    PresentationEvent::Sound(key) => Some(*key),
                    _ => None,
                })
                .collect()
        })
    }

    /// Highlights applied, in order
    pub fn highlights(&self) -> Vec<(VoiceKey, Highlight)> {
        self.with_state(|s| {
            s.events
                .iter()
                .filter_map(|e| match e {
                    PresentationEvent::Highlight(key, style) => Some((*key, *style)),
                    _ => None,
                })
                .collect()
        })
    }

    /// Pads currently holding a teach highlight
    pub fn held(&self) -> Vec<VoiceKey> {
        self.with_state(|s| s.held.iter().copied().collect())
    }

    /// Largest number of pads ever holding a teach highlight at once
    pub fn max_held(&self) -> usize {
        self.with_state(|s| s.max_held)
    }

    pub fn clear(&self) {
        self.with_state(|s| *s = LogState::default());
    }
}

impl Presentation for EventLog {
    fn play_sound(&self, voice: &Voice) {
        self.with_state(|s| s.events.push(PresentationEvent::Sound(voice.key)));
    }

    fn highlight(&self, key: VoiceKey, style: Highlight) {
        self.with_state(|s| {
            s.events.push(PresentationEvent::Highlight(key, style));
            if style == Highlight::Teach {
                s.held.insert(key);
                s.max_held = s.max_held.max(s.held.len());
            }
        });
    }

    fn unhighlight_all(&self) {
        self.with_state(|s| {
            s.events.push(PresentationEvent::UnhighlightAll);
            s.held.clear();
        });
    }

    fn set_status(&self, text: &str) {
        self.with_state(|s| s.events.push(PresentationEvent::Status(text.to_string())));
    }

    fn set_suggestion_text(&self, text: &str) {
        self.with_state(|s| s.events.push(PresentationEvent::Suggestion(text.to_string())));
    }
}
