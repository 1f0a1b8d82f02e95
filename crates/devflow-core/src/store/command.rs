//! Store commands and the pure reducer.
//!
//! Every mutation is described by a [`Command`], validated up front, then
//! applied by [`apply`] -- a pure transformation of the snapshot with no
//! I/O. Persistence happens afterwards, as a separate step owned by the
//! store. Invalid input never produces a partial entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::snapshot::{
    Goal, GoalCategory, PomodoroSession, SessionType, Snapshot, Snippet, SESSION_HISTORY_CAP,
};
use crate::error::ValidationError;

/// Partial update for the pomodoro settings. `None` fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub focus_duration: Option<u32>,
    pub short_break_duration: Option<u32>,
    pub long_break_duration: Option<u32>,
    pub sound_enabled: Option<bool>,
    pub auto_start_next: Option<bool>,
}

/// Partial update for a [`Snippet`]. `None` fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetPatch {
    pub title: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// An intended change to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    SetGithubUsername {
        username: String,
    },
    AddGoal {
        title: String,
        category: GoalCategory,
    },
    ToggleGoal {
        id: String,
    },
    UpdateGoal {
        id: String,
        title: Option<String>,
        category: Option<GoalCategory>,
    },
    RemoveGoal {
        id: String,
    },
    /// Written only by the timer engine on natural session completion.
    RecordSession {
        session_type: SessionType,
        duration_minutes: u32,
    },
    UpdateSettings {
        patch: SettingsPatch,
    },
    AddSnippet {
        title: String,
        code: String,
        language: String,
        tags: Vec<String>,
    },
    UpdateSnippet {
        id: String,
        patch: SnippetPatch,
    },
    RemoveSnippet {
        id: String,
    },
    /// Wholesale replacement, used by backup import.
    ReplaceAll {
        snapshot: Box<Snapshot>,
    },
    ResetAll,
}

impl Command {
    /// Reject invalid input before it reaches the reducer.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Command::AddGoal { title, .. } => non_empty(title, "title"),
            Command::UpdateGoal { title, .. } => match title {
                Some(t) => non_empty(t, "title"),
                None => Ok(()),
            },
            Command::RecordSession {
                duration_minutes, ..
            } => positive(*duration_minutes, "durationMinutes"),
            Command::UpdateSettings { patch } => {
                if let Some(m) = patch.focus_duration {
                    positive(m, "focusDuration")?;
                }
                if let Some(m) = patch.short_break_duration {
                    positive(m, "shortBreakDuration")?;
                }
                if let Some(m) = patch.long_break_duration {
                    positive(m, "longBreakDuration")?;
                }
                Ok(())
            }
            Command::AddSnippet { title, code, .. } => {
                non_empty(title, "title")?;
                non_empty(code, "code")
            }
            Command::UpdateSnippet { patch, .. } => {
                if let Some(t) = &patch.title {
                    non_empty(t, "title")?;
                }
                if let Some(c) = &patch.code {
                    non_empty(c, "code")?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

fn positive(minutes: u32, field: &'static str) -> Result<(), ValidationError> {
    if minutes == 0 {
        Err(ValidationError::InvalidValue {
            field,
            message: "must be a positive number of minutes".into(),
        })
    } else {
        Ok(())
    }
}

/// Apply a validated command to the snapshot.
///
/// Pure with respect to the outside world: `now` is passed in, fresh ids
/// are stamped inside the entity constructors. Removals of unknown ids
/// are no-ops.
pub fn apply(snapshot: &mut Snapshot, command: Command, now: DateTime<Utc>) {
    match command {
        Command::SetGithubUsername { username } => {
            snapshot.github_username = username;
        }
        Command::AddGoal { title, category } => {
            snapshot.goals.push(Goal::new(title, category, now));
        }
        Command::ToggleGoal { id } => {
            if let Some(goal) = snapshot.goals.iter_mut().find(|g| g.id == id) {
                goal.completed = !goal.completed;
            }
        }
        Command::UpdateGoal {
            id,
            title,
            category,
        } => {
            if let Some(goal) = snapshot.goals.iter_mut().find(|g| g.id == id) {
                if let Some(title) = title {
                    goal.title = title;
                }
                if let Some(category) = category {
                    goal.category = category;
                }
            }
        }
        Command::RemoveGoal { id } => {
            snapshot.goals.retain(|g| g.id != id);
        }
        Command::RecordSession {
            session_type,
            duration_minutes,
        } => {
            snapshot
                .pomodoro_sessions
                .insert(0, PomodoroSession::new(session_type, duration_minutes, now));
            snapshot.pomodoro_sessions.truncate(SESSION_HISTORY_CAP);
        }
        Command::UpdateSettings { patch } => {
            let settings = &mut snapshot.pomodoro_settings;
            if let Some(m) = patch.focus_duration {
                settings.focus_duration = m;
            }
            if let Some(m) = patch.short_break_duration {
                settings.short_break_duration = m;
            }
            if let Some(m) = patch.long_break_duration {
                settings.long_break_duration = m;
            }
            if let Some(on) = patch.sound_enabled {
                settings.sound_enabled = on;
            }
            if let Some(on) = patch.auto_start_next {
                settings.auto_start_next = on;
            }
        }
        Command::AddSnippet {
            title,
            code,
            language,
            tags,
        } => {
            snapshot
                .snippets
                .push(Snippet::new(title, code, language, tags, now));
        }
        Command::UpdateSnippet { id, patch } => {
            if let Some(snippet) = snapshot.snippets.iter_mut().find(|s| s.id == id) {
                if let Some(title) = patch.title {
                    snippet.title = title;
                }
                if let Some(code) = patch.code {
                    snippet.code = code;
                }
                if let Some(language) = patch.language {
                    snippet.language = language;
                }
                if let Some(tags) = patch.tags {
                    snippet.tags = tags;
                }
                snippet.updated_at = now;
            }
        }
        Command::RemoveSnippet { id } => {
            snapshot.snippets.retain(|s| s.id != id);
        }
        Command::ReplaceAll { snapshot: new } => {
            *snapshot = *new;
            snapshot.pomodoro_sessions.truncate(SESSION_HISTORY_CAP);
        }
        Command::ResetAll => {
            *snapshot = Snapshot::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_now(snapshot: &mut Snapshot, command: Command) {
        apply(snapshot, command, Utc::now());
    }

    #[test]
    fn add_goal_stamps_id_and_creation_time() {
        let mut snap = Snapshot::default();
        apply_now(
            &mut snap,
            Command::AddGoal {
                title: "Review PRs".into(),
                category: GoalCategory::Code,
            },
        );
        assert_eq!(snap.goals.len(), 1);
        assert!(!snap.goals[0].id.is_empty());
        assert!(!snap.goals[0].completed);
    }

    #[test]
    fn goal_ids_are_unique() {
        let mut snap = Snapshot::default();
        for _ in 0..20 {
            apply_now(
                &mut snap,
                Command::AddGoal {
                    title: "x".into(),
                    category: GoalCategory::Other,
                },
            );
        }
        let mut ids: Vec<_> = snap.goals.iter().map(|g| g.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn toggle_goal_flips_completed() {
        let mut snap = Snapshot::default();
        apply_now(
            &mut snap,
            Command::AddGoal {
                title: "Stretch".into(),
                category: GoalCategory::Exercise,
            },
        );
        let id = snap.goals[0].id.clone();
        apply_now(&mut snap, Command::ToggleGoal { id: id.clone() });
        assert!(snap.goals[0].completed);
        apply_now(&mut snap, Command::ToggleGoal { id });
        assert!(!snap.goals[0].completed);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut snap = Snapshot::default();
        apply_now(
            &mut snap,
            Command::AddGoal {
                title: "Keep me".into(),
                category: GoalCategory::Learn,
            },
        );
        apply_now(
            &mut snap,
            Command::RemoveGoal {
                id: "no-such-id".into(),
            },
        );
        assert_eq!(snap.goals.len(), 1);

        apply_now(
            &mut snap,
            Command::RemoveSnippet {
                id: "no-such-id".into(),
            },
        );
        assert!(snap.snippets.is_empty());
    }

    #[test]
    fn session_history_is_capped_newest_first() {
        let mut snap = Snapshot::default();
        for i in 1..=11u32 {
            apply(
                &mut snap,
                Command::RecordSession {
                    session_type: SessionType::Focus,
                    duration_minutes: i,
                },
                Utc::now(),
            );
        }
        assert_eq!(snap.pomodoro_sessions.len(), SESSION_HISTORY_CAP);
        // Newest first; the first recorded session (1 min) was evicted.
        assert_eq!(snap.pomodoro_sessions[0].duration_minutes, 11);
        assert!(snap
            .pomodoro_sessions
            .iter()
            .all(|s| s.duration_minutes != 1));
    }

    #[test]
    fn update_snippet_refreshes_updated_at() {
        let created = Utc::now();
        let mut snap = Snapshot::default();
        apply(
            &mut snap,
            Command::AddSnippet {
                title: "quicksort".into(),
                code: "fn qs() {}".into(),
                language: "rust".into(),
                tags: vec!["algo".into()],
            },
            created,
        );
        let id = snap.snippets[0].id.clone();
        let later = created + chrono::Duration::seconds(90);
        apply(
            &mut snap,
            Command::UpdateSnippet {
                id,
                patch: SnippetPatch {
                    code: Some("fn qs<T>() {}".into()),
                    ..Default::default()
                },
            },
            later,
        );
        assert_eq!(snap.snippets[0].created_at, created);
        assert_eq!(snap.snippets[0].updated_at, later);
        assert_eq!(snap.snippets[0].title, "quicksort");
    }

    #[test]
    fn validation_rejects_empty_and_non_positive_input() {
        assert!(Command::AddGoal {
            title: "   ".into(),
            category: GoalCategory::Code,
        }
        .validate()
        .is_err());

        assert!(Command::AddSnippet {
            title: "t".into(),
            code: "".into(),
            language: "rust".into(),
            tags: vec![],
        }
        .validate()
        .is_err());

        assert!(Command::UpdateSettings {
            patch: SettingsPatch {
                focus_duration: Some(0),
                ..Default::default()
            },
        }
        .validate()
        .is_err());

        assert!(Command::UpdateSettings {
            patch: SettingsPatch {
                focus_duration: Some(50),
                ..Default::default()
            },
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn replace_all_recaps_history() {
        let mut incoming = Snapshot::default();
        for _ in 0..15 {
            incoming
                .pomodoro_sessions
                .push(PomodoroSession::new(SessionType::Focus, 25, Utc::now()));
        }
        let mut snap = Snapshot::default();
        apply_now(
            &mut snap,
            Command::ReplaceAll {
                snapshot: Box::new(incoming),
            },
        );
        assert_eq!(snap.pomodoro_sessions.len(), SESSION_HISTORY_CAP);
    }
}
