//! # DevFlow Core Library
//!
//! This library provides the state engine for the DevFlow productivity
//! dashboard. The GUI is a thin shell over this crate: it reads
//! snapshots and derived views from the core and pushes primitive
//! updates into it, never the other way around.
//!
//! ## Architecture
//!
//! - **Store**: a single in-memory snapshot, mutated through an explicit
//!   command/apply pattern and persisted as one JSON document on every
//!   mutation
//! - **Timer Engine**: a wall-clock-anchored pomodoro state machine that
//!   requires the caller to periodically invoke `tick()`
//! - **Agenda**: the lifecycle-aware daily view over the goal collection
//! - **Snippets**: keyed CRUD over the snippet library
//! - **Backup**: versioned export/import of the whole store
//! - **Activity**: read-only GitHub summary for the dashboard widget
//!
//! ## Key Components
//!
//! - [`Store`]: snapshot owner and command dispatcher
//! - [`TimerEngine`]: core timer state machine
//! - [`daily_agenda`]: today's goal sequence
//! - [`ActivityClient`]: external activity collaborator

pub mod activity;
pub mod agenda;
pub mod backup;
pub mod error;
pub mod events;
pub mod snippets;
pub mod stats;
pub mod store;
pub mod timer;

pub use activity::{ActivityClient, ActivityStats};
pub use agenda::{daily_agenda, DailyAgenda};
pub use backup::{export_snapshot, import_snapshot, reset_all, suggested_file_name, BackupDocument};
pub use error::{
    ActivityError, BackupError, CoreError, PersistenceError, Result, ValidationError,
};
pub use events::Event;
pub use snippets::{parse_tags, SnippetDraft, SnippetRegistry};
pub use stats::{weekly_activity, DayActivity, WeeklyActivity};
pub use store::{
    Command, Goal, GoalCategory, PomodoroSession, PomodoroSettings, SessionType, SettingsPatch,
    Snapshot, Snippet, SnippetPatch, Store,
};
pub use timer::TimerEngine;
