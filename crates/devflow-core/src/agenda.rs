//! Daily agenda over the goal collection.
//!
//! A goal shows up on today's agenda if it was created today (local
//! calendar day) or if it is still incomplete from an earlier day
//! (carried over). Goals completed on a prior day are archived
//! implicitly: they simply stop matching.
//!
//! The ordering is total: carried-over goals sink below everything from
//! today, incomplete goals sort before completed ones, newer before
//! older, and ids break any remaining tie.

use chrono::{DateTime, Local, NaiveDate};

use crate::store::Goal;

/// The ordered agenda for one day, plus the header counts.
#[derive(Debug)]
pub struct DailyAgenda<'a> {
    pub goals: Vec<&'a Goal>,
    pub completed_count: usize,
    pub total_count: usize,
}

/// Build the agenda for the calendar day containing `now`.
pub fn daily_agenda(goals: &[Goal], now: DateTime<Local>) -> DailyAgenda<'_> {
    let today = now.date_naive();

    let mut included: Vec<&Goal> = goals
        .iter()
        .filter(|goal| local_day(goal) >= today || !goal.completed)
        .collect();

    included.sort_by(|a, b| {
        let carried = |g: &Goal| local_day(g) < today;
        carried(a)
            .cmp(&carried(b))
            .then(a.completed.cmp(&b.completed))
            .then(b.created_at.cmp(&a.created_at))
            .then(a.id.cmp(&b.id))
    });

    let completed_count = included.iter().filter(|g| g.completed).count();
    let total_count = included.len();
    DailyAgenda {
        goals: included,
        completed_count,
        total_count,
    }
}

fn local_day(goal: &Goal) -> NaiveDate {
    goal.created_at.with_timezone(&Local).date_naive()
}
