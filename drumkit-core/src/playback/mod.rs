//! Rhythm playback: sessions, step timing and the two playback loops

pub mod controller;
pub mod session;
pub mod ticker;

pub use controller::{
    pressed_status, Outcome, PlaybackController, PlaybackMode, STATUS_PLAY_DONE, STATUS_REST,
    STATUS_STOPPED, STATUS_TEACH_DONE,
};
pub use session::{SessionState, StopHandle};
pub use ticker::{InstantTicker, SleepTicker, Ticker};
