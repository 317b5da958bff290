//! Calendar-day helpers behind the date picker and the quick "days ago" buttons.

use crate::models::{CalendarWeekStart, DateShortcut};
use chrono::{Datelike, Duration, Local, NaiveDate};

/// Offsets offered as one-click shortcuts.
pub const SHORTCUT_DAYS: [u32; 5] = [1, 2, 3, 7, 14];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

pub fn days_ago(today: NaiveDate, days: u32) -> NaiveDate {
    today - Duration::days(i64::from(days))
}

pub fn shortcut_label(days: u32) -> String {
    if days == 1 {
        "Yesterday".to_string()
    } else {
        format!("{days} days ago")
    }
}

pub fn shortcuts_at(today: NaiveDate) -> Vec<DateShortcut> {
    SHORTCUT_DAYS
        .iter()
        .map(|&days| DateShortcut {
            days,
            label: shortcut_label(days),
            date: date_key(days_ago(today, days)),
        })
        .collect()
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, start: CalendarWeekStart) -> NaiveDate {
    let offset = match start {
        CalendarWeekStart::Sunday => date.weekday().num_days_from_sunday(),
        CalendarWeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    date - Duration::days(i64::from(offset))
}

/// Single-date picker with an inclusive upper bound.
#[derive(Debug, Clone)]
pub struct DateSelection {
    pub max_date: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub default_date: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new(max_date: NaiveDate) -> Self {
        Self {
            max_date,
            selected: None,
            default_date: None,
        }
    }

    pub fn with_default(mut self, date: NaiveDate) -> Self {
        self.default_date = Some(date);
        self
    }

    pub fn displayed(&self) -> Option<NaiveDate> {
        self.selected.or(self.default_date)
    }

    /// A cleared pick falls back to today. Dates past `max_date` are refused
    /// and `on_change` is not called.
    pub fn pick(
        &mut self,
        picked: Option<NaiveDate>,
        today: NaiveDate,
        on_change: impl FnOnce(NaiveDate),
    ) -> bool {
        let date = picked.unwrap_or(today);
        if date > self.max_date {
            return false;
        }
        self.selected = Some(date);
        on_change(date);
        true
    }

    pub fn press_shortcut(
        &mut self,
        days: u32,
        today: NaiveDate,
        on_change: impl FnOnce(NaiveDate),
    ) {
        let date = days_ago(today, days);
        self.selected = Some(date);
        on_change(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seven_days_ago_shortcut_hits_the_callback() {
        let today = ymd(2024, 3, 5);
        let mut selection = DateSelection::new(today);
        let mut seen = None;
        selection.press_shortcut(7, today, |date| seen = Some(date));
        assert_eq!(seen, Some(ymd(2024, 2, 27)));
        assert_eq!(selection.displayed(), Some(ymd(2024, 2, 27)));
    }

    #[test]
    fn shortcuts_cover_fixed_offsets() {
        let shortcuts = shortcuts_at(ymd(2024, 1, 10));
        let labels: Vec<_> = shortcuts.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Yesterday", "2 days ago", "3 days ago", "7 days ago", "14 days ago"]
        );
        assert_eq!(shortcuts[0].date, "2024-01-09");
        assert_eq!(shortcuts[4].date, "2023-12-27");
    }

    #[test]
    fn pick_respects_max_date() {
        let today = ymd(2024, 1, 10);
        let mut selection = DateSelection::new(today);
        let mut calls = 0;
        assert!(!selection.pick(Some(ymd(2024, 1, 11)), today, |_| calls += 1));
        assert!(selection.pick(Some(today), today, |_| calls += 1));
        assert_eq!(calls, 1);
    }

    #[test]
    fn cleared_pick_falls_back_to_today() {
        let today = ymd(2024, 1, 10);
        let mut selection = DateSelection::new(today).with_default(ymd(2024, 1, 1));
        assert_eq!(selection.displayed(), Some(ymd(2024, 1, 1)));
        let mut seen = None;
        selection.pick(None, today, |date| seen = Some(date));
        assert_eq!(seen, Some(today));
    }

    #[test]
    fn week_start_follows_preference() {
        // 2024-01-10 is a Wednesday.
        let date = ymd(2024, 1, 10);
        assert_eq!(week_start(date, CalendarWeekStart::Sunday), ymd(2024, 1, 7));
        assert_eq!(week_start(date, CalendarWeekStart::Monday), ymd(2024, 1, 8));
    }

    #[test]
    fn date_keys_round_trip() {
        assert_eq!(date_key(ymd(2024, 2, 3)), "2024-02-03");
        assert_eq!(parse_date_key("2024-02-03"), Some(ymd(2024, 2, 3)));
        assert_eq!(parse_date_key("2024-02-30"), None);
        assert_eq!(parse_date_key("today"), None);
    }
}
