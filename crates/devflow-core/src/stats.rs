//! Weekly activity summary.
//!
//! Buckets the session history and goal list into the last seven local
//! calendar days for the dashboard chart. Goals count toward the day
//! they were created, once completed -- the store does not track a
//! completion timestamp.

use chrono::{DateTime, Days, Local, NaiveDate};

use crate::store::{SessionType, Snapshot};

/// One chart bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub focus_sessions: usize,
    pub goals_completed: usize,
}

/// Seven daily buckets, oldest first, plus window totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyActivity {
    pub days: Vec<DayActivity>,
    pub total_focus_sessions: usize,
    pub total_goals_completed: usize,
}

/// Summarize the seven days ending on the day containing `now`.
pub fn weekly_activity(snapshot: &Snapshot, now: DateTime<Local>) -> WeeklyActivity {
    let today = now.date_naive();

    let days: Vec<DayActivity> = (0..7u64)
        .map(|offset| {
            let date = today - Days::new(6 - offset);
            let focus_sessions = snapshot
                .pomodoro_sessions
                .iter()
                .filter(|s| {
                    s.session_type == SessionType::Focus
                        && s.completed_at.with_timezone(&Local).date_naive() == date
                })
                .count();
            let goals_completed = snapshot
                .goals
                .iter()
                .filter(|g| {
                    g.completed && g.created_at.with_timezone(&Local).date_naive() == date
                })
                .count();
            DayActivity {
                date,
                focus_sessions,
                goals_completed,
            }
        })
        .collect();

    let total_focus_sessions = days.iter().map(|d| d.focus_sessions).sum();
    let total_goals_completed = days.iter().map(|d| d.goals_completed).sum();
    WeeklyActivity {
        days,
        total_focus_sessions,
        total_goals_completed,
    }
}
