//! Consecutive-day streak and the trailing 7-day activity window.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::template::is_meaningful;
use crate::store::NoteStore;

/// Number of days in the activity window, today included.
pub const WINDOW_LEN: u64 = 7;

/// One day in the activity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    /// First letter of the weekday name (`M`, `T`, `W`, ...).
    pub label: String,
    pub done: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    pub current_streak: u32,
    /// Exactly [`WINDOW_LEN`] days, oldest first, ending at today.
    pub days: Vec<DayRecord>,
}

/// Count meaningful days walking back from yesterday, stopping at the first gap
/// or after `max_lookback` days.
pub fn count_prior_streak(store: &dyn NoteStore, today: NaiveDate, max_lookback: u32) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while streak < max_lookback {
        let Some(prev) = day.checked_sub_days(Days::new(1)) else {
            break;
        };
        if !is_meaningful(store, prev) {
            break;
        }
        streak += 1;
        day = prev;
    }
    if streak == max_lookback && max_lookback > 0 {
        tracing::debug!(max_lookback, "streak walk hit lookback cap");
    }
    streak
}

/// Streak ending at `today` plus the 7-day window.
///
/// Today is checked on its own: an untouched today neither breaks nor extends
/// the backward walk, it only decides whether one more day is added.
pub fn compute_streak(store: &dyn NoteStore, today: NaiveDate, max_lookback: u32) -> StreakReport {
    let mut current_streak = count_prior_streak(store, today, max_lookback);
    if is_meaningful(store, today) {
        current_streak += 1;
    }

    let days = (0..WINDOW_LEN)
        .rev()
        .filter_map(|i| today.checked_sub_days(Days::new(i)))
        .map(|date| DayRecord {
            date,
            label: weekday_initial(date),
            done: is_meaningful(store, date),
            is_today: date == today,
        })
        .collect();

    StreakReport {
        current_streak,
        days,
    }
}

fn weekday_initial(date: NaiveDate) -> String {
    date.format("%a").to_string().chars().take(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::template::NOTE_TEMPLATE;
    use crate::store::MemoryNoteStore;

    // A Wednesday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn ago(n: u64) -> NaiveDate {
        today().checked_sub_days(Days::new(n)).unwrap()
    }

    fn with_meaningful(days: &[u64]) -> MemoryNoteStore {
        days.iter().fold(MemoryNoteStore::new(), |store, &n| {
            store.with_note(ago(n), "- [x] did something")
        })
    }

    #[test]
    fn window_has_seven_ordered_days_ending_today() {
        let report = compute_streak(&MemoryNoteStore::new(), today(), 365);
        assert_eq!(report.days.len(), 7);
        assert_eq!(report.days[0].date, ago(6));
        assert_eq!(report.days[6].date, today());
        assert!(report.days.windows(2).all(|w| w[0].date < w[1].date));
        let today_flags: Vec<bool> = report.days.iter().map(|d| d.is_today).collect();
        assert_eq!(today_flags, vec![false, false, false, false, false, false, true]);
        assert_eq!(report.current_streak, 0);
    }

    #[test]
    fn labels_are_weekday_initials() {
        let report = compute_streak(&MemoryNoteStore::new(), today(), 365);
        let labels: Vec<&str> = report.days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["T", "F", "S", "S", "M", "T", "W"]);
    }

    #[test]
    fn three_prior_days_then_gap() {
        let store = with_meaningful(&[1, 2, 3, 5]);
        assert_eq!(count_prior_streak(&store, today(), 365), 3);
        assert_eq!(compute_streak(&store, today(), 365).current_streak, 3);
    }

    #[test]
    fn meaningful_today_adds_one() {
        let store = with_meaningful(&[0, 1, 2]);
        assert_eq!(compute_streak(&store, today(), 365).current_streak, 3);
    }

    #[test]
    fn today_alone_counts_even_after_a_gap() {
        let store = with_meaningful(&[0, 2, 3]);
        assert_eq!(compute_streak(&store, today(), 365).current_streak, 1);
    }

    #[test]
    fn blank_template_breaks_streak() {
        let store = with_meaningful(&[1, 3]).with_note(ago(2), NOTE_TEMPLATE);
        assert_eq!(compute_streak(&store, today(), 365).current_streak, 1);
    }

    #[test]
    fn lookback_is_capped() {
        let days: Vec<u64> = (1..=30).collect();
        let store = with_meaningful(&days);
        assert_eq!(count_prior_streak(&store, today(), 10), 10);
        assert_eq!(count_prior_streak(&store, today(), 0), 0);
        assert_eq!(count_prior_streak(&store, today(), 365), 30);
    }

    #[test]
    fn done_flags_follow_notes() {
        let store = with_meaningful(&[0, 4]);
        let report = compute_streak(&store, today(), 365);
        let done: Vec<bool> = report.days.iter().map(|d| d.done).collect();
        assert_eq!(done, vec![false, false, true, false, false, false, true]);
    }

    #[test]
    fn serializes_in_extension_shape() {
        let store = with_meaningful(&[0]);
        let json = serde_json::to_value(compute_streak(&store, today(), 365)).unwrap();
        assert_eq!(json["currentStreak"], 1);
        assert_eq!(json["days"][6]["date"], "2024-05-15");
        assert_eq!(json["days"][6]["isToday"], true);
        assert_eq!(json["days"][6]["done"], true);
        assert_eq!(json["days"][6]["label"], "W");
    }
}
