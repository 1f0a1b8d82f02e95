//! Persisted data model.
//!
//! The whole store serializes as a single JSON document with camelCase
//! field names, the shape the dashboard persisted from day one. Per-field
//! serde defaults keep older or partial documents loadable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session history is capped at the most recent entries, oldest evicted.
pub const SESSION_HISTORY_CAP: usize = 10;

/// Category of a daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Code,
    Learn,
    Exercise,
    Other,
}

/// A daily goal.
///
/// Immutable once created except `completed` (toggled), `title` and
/// `category` (edited).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub category: GoalCategory,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(title: impl Into<String>, category: GoalCategory, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            category,
            completed: false,
            created_at: now,
        }
    }
}

/// Type of a pomodoro session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Focus,
    Short,
    Long,
}

impl SessionType {
    /// Display label used by the dashboard badge.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Focus => "Focus Time",
            SessionType::Short => "Short Break",
            SessionType::Long => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, SessionType::Short | SessionType::Long)
    }
}

/// Record of a completed pomodoro session.
///
/// Append-only, written only by the timer engine on natural completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: String,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub duration_minutes: u32,
    pub completed_at: DateTime<Utc>,
}

impl PomodoroSession {
    pub fn new(session_type: SessionType, duration_minutes: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_type,
            duration_minutes,
            completed_at: now,
        }
    }
}

/// A saved code snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub code: String,
    pub language: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(
        title: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            code: code.into(),
            language: language.into(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Pomodoro timer settings. Durations are positive integer minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    #[serde(default = "default_focus_duration")]
    pub focus_duration: u32,
    #[serde(default = "default_short_break_duration")]
    pub short_break_duration: u32,
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration: u32,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default)]
    pub auto_start_next: bool,
}

fn default_focus_duration() -> u32 {
    25
}
fn default_short_break_duration() -> u32 {
    5
}
fn default_long_break_duration() -> u32 {
    15
}
fn default_true() -> bool {
    true
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_duration: default_focus_duration(),
            short_break_duration: default_short_break_duration(),
            long_break_duration: default_long_break_duration(),
            sound_enabled: true,
            auto_start_next: false,
        }
    }
}

impl PomodoroSettings {
    /// Configured duration for a session type, in minutes.
    pub fn duration_minutes_for(&self, session_type: SessionType) -> u32 {
        match session_type {
            SessionType::Focus => self.focus_duration,
            SessionType::Short => self.short_break_duration,
            SessionType::Long => self.long_break_duration,
        }
    }
}

/// The full persisted document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub github_username: String,
    pub goals: Vec<Goal>,
    /// Newest first, at most [`SESSION_HISTORY_CAP`] entries.
    pub pomodoro_sessions: Vec<PomodoroSession>,
    pub pomodoro_settings: PomodoroSettings,
    pub snippets: Vec<Snippet>,
}
