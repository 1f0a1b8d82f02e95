//! Timer engine implementation.
//!
//! A wall-clock-based state machine with no internal thread: the caller
//! invokes `tick()` periodically while the timer runs and cancels its
//! callback whenever the engine leaves the running state.
//!
//! Elapsed time is always recomputed against an anchor captured at start
//! (`anchor = now - (total - remaining)`), never accumulated per tick, so
//! a burst of dropped or throttled ticks cannot skew the countdown.

use chrono::Utc;

use crate::events::Event;
use crate::store::{Command, PomodoroSettings, SessionType, Store};

/// Focus sessions per cycle; the cycle ends in a long break.
const FOCUS_SESSIONS_PER_CYCLE: u32 = 4;

/// Core timer engine.
///
/// Holds the runtime-only state (never persisted): the active session
/// type and its captured duration, the countdown, and the focus-cycle
/// counter. Completed sessions are written to the store it is handed.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    session_type: SessionType,
    /// Duration of the active session in milliseconds, captured when the
    /// session was entered. Settings edits apply from the next session.
    total_ms: u64,
    remaining_ms: u64,
    running: bool,
    /// Wall-clock instant (ms since epoch) the countdown is measured from.
    anchor_epoch_ms: Option<u64>,
    /// Focus completions in the current cycle, wraps at 4.
    focus_in_cycle: u32,
    /// Naturally completed focus sessions, for the dashboard counter.
    completed_focus_total: u32,
}

impl TimerEngine {
    /// Create an engine in the initial state: `Focus`, paused, full
    /// countdown from the configured focus duration.
    pub fn new(settings: &PomodoroSettings) -> Self {
        let total_ms = minutes_to_ms(settings.focus_duration);
        Self {
            session_type: SessionType::Focus,
            total_ms,
            remaining_ms: total_ms,
            running: false,
            anchor_epoch_ms: None,
            focus_in_cycle: 0,
            completed_focus_total: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn remaining_secs(&self) -> u32 {
        (self.remaining_ms / 1000) as u32
    }

    pub fn total_secs(&self) -> u32 {
        (self.total_ms / 1000) as u32
    }

    pub fn focus_sessions_in_cycle(&self) -> u32 {
        self.focus_in_cycle
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus_total
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / self.total_ms as f64)
    }

    /// The session type the advance rule would select next.
    pub fn upcoming_session_type(&self) -> SessionType {
        match self.session_type {
            SessionType::Focus => {
                if (self.focus_in_cycle + 1) % FOCUS_SESSIONS_PER_CYCLE == 0 {
                    SessionType::Long
                } else {
                    SessionType::Short
                }
            }
            SessionType::Short | SessionType::Long => SessionType::Focus,
        }
    }

    /// Build a full state snapshot event for UI polling.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            session_type: self.session_type,
            is_running: self.running,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            progress: self.progress(),
            focus_sessions_in_cycle: self.focus_in_cycle,
            completed_focus_sessions: self.completed_focus_total,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.reset_at()
    }

    /// Discard the current session and advance without recording it.
    pub fn skip(&mut self, store: &Store) -> Option<Event> {
        self.skip_at(store)
    }

    /// Call periodically while running. Returns the completion event
    /// when the countdown reaches zero.
    pub fn tick(&mut self, store: &mut Store) -> Option<Event> {
        self.tick_at(store, now_ms())
    }

    // ── Clock-injected transitions ───────────────────────────────────

    pub(crate) fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.anchor_epoch_ms = Some(now_ms.saturating_sub(self.total_ms - self.remaining_ms));
        Some(Event::TimerStarted {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub(crate) fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.recompute_remaining(now_ms);
        self.running = false;
        self.anchor_epoch_ms = None;
        Some(Event::TimerPaused {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub(crate) fn reset_at(&mut self) -> Option<Event> {
        self.running = false;
        self.anchor_epoch_ms = None;
        self.remaining_ms = self.total_ms;
        Some(Event::TimerReset {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub(crate) fn skip_at(&mut self, store: &Store) -> Option<Event> {
        let from = self.session_type;
        self.running = false;
        self.anchor_epoch_ms = None;
        let to = self.advance(&store.snapshot().pomodoro_settings);
        Some(Event::TimerSkipped {
            from,
            to,
            at: Utc::now(),
        })
    }

    pub(crate) fn tick_at(&mut self, store: &mut Store, now_ms: u64) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.recompute_remaining(now_ms);
        if self.remaining_ms == 0 {
            return Some(self.complete(store, now_ms));
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Recompute the countdown from the anchor. The anchor itself never
    /// moves while running.
    fn recompute_remaining(&mut self, now_ms: u64) {
        if let Some(anchor) = self.anchor_epoch_ms {
            self.remaining_ms = self.total_ms.saturating_sub(now_ms.saturating_sub(anchor));
        }
    }

    /// Natural completion: record history, then advance.
    fn complete(&mut self, store: &mut Store, now_ms: u64) -> Event {
        self.running = false;
        self.anchor_epoch_ms = None;

        let finished = self.session_type;
        let duration_minutes = (self.total_ms / 60_000) as u32;
        if let Err(err) = store.dispatch(Command::RecordSession {
            session_type: finished,
            duration_minutes,
        }) {
            tracing::warn!(error = %err, "failed to record completed session");
        }
        if finished == SessionType::Focus {
            self.completed_focus_total += 1;
        }

        let settings = store.snapshot().pomodoro_settings.clone();
        let next = self.advance(&settings);
        let auto_started = settings.auto_start_next;
        if auto_started {
            self.running = true;
            self.anchor_epoch_ms = Some(now_ms);
        }
        Event::SessionCompleted {
            session_type: finished,
            duration_minutes,
            next_type: next,
            auto_started,
            play_sound: settings.sound_enabled,
            at: Utc::now(),
        }
    }

    /// Session-advance rule, shared by completion and skip. Finishing a
    /// focus session advances the cycle counter; every fourth selects
    /// the long break. Finishing a break returns to focus. The new
    /// session's duration is read from the settings here, so settings
    /// edits take effect from the next session of that type.
    fn advance(&mut self, settings: &PomodoroSettings) -> SessionType {
        let next = match self.session_type {
            SessionType::Focus => {
                self.focus_in_cycle += 1;
                if self.focus_in_cycle % FOCUS_SESSIONS_PER_CYCLE == 0 {
                    self.focus_in_cycle = 0;
                    SessionType::Long
                } else {
                    SessionType::Short
                }
            }
            SessionType::Short | SessionType::Long => SessionType::Focus,
        };
        self.session_type = next;
        self.total_ms = minutes_to_ms(settings.duration_minutes_for(next));
        self.remaining_ms = self.total_ms;
        next
    }
}

fn minutes_to_ms(minutes: u32) -> u64 {
    u64::from(minutes).saturating_mul(60_000)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
