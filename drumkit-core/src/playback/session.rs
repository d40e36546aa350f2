//! Per-session cancellation
//!
//! Every playback loop runs inside its own session. A session owns a stop
//! flag and a small state machine; `StopHandle` is the shareable handle to
//! both. Flag writes use Release and reads use Acquire, so a stop raised on
//! one thread is seen by the loop at its next step boundary on another.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of a playback session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Created, loop not yet started
    Idle,
    /// Loop stepping through the pattern
    Running,
    /// Stop requested, loop will exit at its next step boundary
    Stopping,
    /// Loop has returned
    Done,
}

impl SessionState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => SessionState::Idle,
            1 => SessionState::Running,
            2 => SessionState::Stopping,
            _ => SessionState::Done,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            SessionState::Idle => 0,
            SessionState::Running => 1,
            SessionState::Stopping => 2,
            SessionState::Done => 3,
        }
    }
}

struct SessionInner {
    id: u64,
    stop_requested: AtomicBool,
    state: AtomicU8,
}

/// Cloneable handle to one playback session
#[derive(Clone)]
pub struct StopHandle {
    inner: Arc<SessionInner>,
}

impl StopHandle {
    /// Fresh session in the Idle state with the stop flag cleared
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
                stop_requested: AtomicBool::new(false),
                state: AtomicU8::new(SessionState::Idle.as_u8()),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Ask the session to stop. Idempotent; on a session that is not running
    /// this only raises the flag.
    pub fn stop(&self) {
        self.inner.stop_requested.store(true, Ordering::Release);
        let _ = self.inner.state.compare_exchange(
            SessionState::Running.as_u8(),
            SessionState::Stopping.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn is_stop_requested(&self) -> bool {
        self.inner.stop_requested.load(Ordering::Acquire)
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// Running or stopping
    pub fn is_active(&self) -> bool {
        matches!(self.state(), SessionState::Running | SessionState::Stopping)
    }

    /// The loop has returned. A prepared session that has not begun yet is
    /// not finished.
    pub fn is_finished(&self) -> bool {
        self.state() == SessionState::Done
    }

    /// Idle -> Running. A stop raised before the loop started still leaves
    /// the flag set, so the loop exits at its first boundary.
    pub(crate) fn begin(&self) {
        let next = if self.is_stop_requested() {
            SessionState::Stopping
        } else {
            SessionState::Running
        };
        self.inner.state.store(next.as_u8(), Ordering::Release);
    }

    pub(crate) fn finish(&self) {
        self.inner
            .state
            .store(SessionState::Done.as_u8(), Ordering::Release);
    }

    /// Whether both handles point at the same session
    pub fn same_session(&self, other: &StopHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopHandle")
            .field("id", &self.id())
            .field("state", &self.state())
            .field("stop_requested", &self.is_stop_requested())
            .finish()
    }
}
