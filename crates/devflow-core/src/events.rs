use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::SessionType;

/// Every timer state change produces an Event.
/// The GUI polls for events and owns the side effects (notification
/// sound, re-render); the engine never calls back into the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        session_type: SessionType,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        session_type: SessionType,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        session_type: SessionType,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Session discarded without a history record.
    TimerSkipped {
        from: SessionType,
        to: SessionType,
        at: DateTime<Utc>,
    },
    /// Natural completion: a history record was written and the engine
    /// advanced to `next_type`. `play_sound` reflects the sound setting
    /// at completion time; `auto_started` tells the caller whether the
    /// new session is already running.
    SessionCompleted {
        session_type: SessionType,
        duration_minutes: u32,
        next_type: SessionType,
        auto_started: bool,
        play_sound: bool,
        at: DateTime<Utc>,
    },
    /// Full state snapshot for UI polling.
    StateSnapshot {
        session_type: SessionType,
        is_running: bool,
        remaining_secs: u32,
        total_secs: u32,
        /// 0.0 .. 1.0 progress within the current session.
        progress: f64,
        focus_sessions_in_cycle: u32,
        completed_focus_sessions: u32,
        at: DateTime<Utc>,
    },
}
