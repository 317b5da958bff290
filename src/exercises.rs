use crate::dates::{date_key, parse_date_key};
use crate::errors::AppError;
use crate::models::{DailyExercises, ExerciseEntry};
use crate::store::ExerciseLog;
use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

/// Distinct names in first-seen order, walking days oldest first.
pub fn all_exercise_names<L: ExerciseLog + ?Sized>(log: &L) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for date in log.all_dates() {
        let Some(day) = log.get_by_date(&date) else {
            continue;
        };
        for entry in &day.entries {
            if seen.insert(entry.name.clone()) {
                names.push(entry.name.clone());
            }
        }
    }
    names
}

/// Clipboard lines for every entry dated within `[start, end]`.
///
/// One `YYYY-MM-DD` header per day that has entries, then `- name: SETSxREPS`
/// lines in stored order. Days without entries are left out, and a reversed
/// range yields nothing.
pub fn exercises_for_date_range_formatted<L: ExerciseLog + ?Sized>(
    log: &L,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<String> {
    let mut lines = Vec::new();
    if start > end {
        return lines;
    }

    for key in log.all_dates() {
        let Some(date) = parse_date_key(&key) else {
            continue;
        };
        if date < start || date > end {
            continue;
        }
        let Some(day) = log.get_by_date(&key) else {
            continue;
        };
        if day.entries.is_empty() {
            continue;
        }

        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(date_key(date));
        for entry in &day.entries {
            lines.push(format!("- {}: {}x{}", entry.name, entry.sets, entry.reps));
        }
    }
    lines
}

pub fn format_export(lines: &[String]) -> String {
    lines.join("\n")
}

pub fn add_entry<L: ExerciseLog + ?Sized>(
    log: &mut L,
    date: NaiveDate,
    name: &str,
    sets: u32,
    reps: u32,
) -> Result<ExerciseEntry, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("exercise name must not be empty"));
    }
    if sets == 0 || reps == 0 {
        return Err(AppError::bad_request("sets and reps must be positive"));
    }

    let entry = ExerciseEntry {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        sets,
        reps,
    };
    let mut day = day_or_empty(log, date);
    day.entries.push(entry.clone());
    log.upsert(day);
    Ok(entry)
}

pub fn remove_entry<L: ExerciseLog + ?Sized>(log: &mut L, date: NaiveDate, id: &str) -> bool {
    let mut day = day_or_empty(log, date);
    let before = day.entries.len();
    day.entries.retain(|entry| entry.id != id);
    if day.entries.len() == before {
        return false;
    }
    log.upsert(day);
    true
}

/// Renames every entry called `from`, across all days. Returns how many changed.
pub fn rename_exercise<L: ExerciseLog + ?Sized>(
    log: &mut L,
    from: &str,
    to: &str,
) -> Result<usize, AppError> {
    let to = to.trim();
    if to.is_empty() {
        return Err(AppError::bad_request("new exercise name must not be empty"));
    }

    let mut changed = 0;
    for date in log.all_dates() {
        let Some(mut day) = log.get_by_date(&date).cloned() else {
            continue;
        };
        let mut touched = false;
        for entry in day.entries.iter_mut().filter(|entry| entry.name == from) {
            entry.name = to.to_string();
            touched = true;
            changed += 1;
        }
        if touched {
            log.upsert(day);
        }
    }
    Ok(changed)
}

/// Drops every entry called `name`. Emptied days keep their (empty) record.
pub fn delete_exercise<L: ExerciseLog + ?Sized>(log: &mut L, name: &str) -> usize {
    let mut removed = 0;
    for date in log.all_dates() {
        let Some(mut day) = log.get_by_date(&date).cloned() else {
            continue;
        };
        let before = day.entries.len();
        day.entries.retain(|entry| entry.name != name);
        if day.entries.len() != before {
            removed += before - day.entries.len();
            log.upsert(day);
        }
    }
    removed
}

/// Appends copies of `from`'s entries to `to`, each with a fresh id.
pub fn import_day<L: ExerciseLog + ?Sized>(
    log: &mut L,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<ExerciseEntry> {
    let copies: Vec<ExerciseEntry> = match log.get_by_date(&date_key(from)) {
        Some(source) => source
            .entries
            .iter()
            .map(|entry| ExerciseEntry {
                id: Uuid::new_v4().to_string(),
                ..entry.clone()
            })
            .collect(),
        None => return Vec::new(),
    };
    if copies.is_empty() {
        return copies;
    }

    let mut day = day_or_empty(log, to);
    day.entries.extend(copies.iter().cloned());
    log.upsert(day);
    copies
}

pub fn day_or_empty<L: ExerciseLog + ?Sized>(log: &L, date: NaiveDate) -> DailyExercises {
    let key = date_key(date);
    log.get_by_date(&key).cloned().unwrap_or(DailyExercises {
        date: key,
        entries: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Unordered fake, so the functions can't lean on `AppData`'s sorted map.
    #[derive(Default)]
    struct MemoryLog {
        days: HashMap<String, DailyExercises>,
    }

    impl ExerciseLog for MemoryLog {
        fn get_by_date(&self, date: &str) -> Option<&DailyExercises> {
            self.days.get(date)
        }

        fn upsert(&mut self, day: DailyExercises) {
            self.days.insert(day.date.clone(), day);
        }

        fn all_dates(&self) -> Vec<String> {
            let mut dates: Vec<_> = self.days.keys().cloned().collect();
            dates.sort();
            dates
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> MemoryLog {
        let mut log = MemoryLog::default();
        add_entry(&mut log, ymd(2024, 1, 1), "Squat", 3, 10).unwrap();
        add_entry(&mut log, ymd(2024, 1, 3), "Bench", 4, 8).unwrap();
        log
    }

    #[test]
    fn range_includes_only_days_inside() {
        let log = sample();

        let first_two = exercises_for_date_range_formatted(&log, ymd(2024, 1, 1), ymd(2024, 1, 2));
        assert_eq!(first_two, vec!["2024-01-01", "- Squat: 3x10"]);

        let all = exercises_for_date_range_formatted(&log, ymd(2024, 1, 1), ymd(2024, 1, 3));
        assert_eq!(
            format_export(&all),
            "2024-01-01\n- Squat: 3x10\n\n2024-01-03\n- Bench: 4x8"
        );
    }

    #[test]
    fn reversed_range_is_empty() {
        let log = sample();
        let lines = exercises_for_date_range_formatted(&log, ymd(2024, 1, 3), ymd(2024, 1, 1));
        assert!(lines.is_empty());
    }

    #[test]
    fn days_without_entries_are_skipped() {
        let mut log = sample();
        log.upsert(DailyExercises {
            date: "2024-01-02".to_string(),
            entries: Vec::new(),
        });
        let lines = exercises_for_date_range_formatted(&log, ymd(2024, 1, 1), ymd(2024, 1, 3));
        assert!(!lines.iter().any(|line| line == "2024-01-02"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn entries_keep_insertion_order_within_a_day() {
        let mut log = MemoryLog::default();
        let day = ymd(2024, 5, 1);
        add_entry(&mut log, day, "Row", 3, 12).unwrap();
        add_entry(&mut log, day, "Deadlift", 5, 5).unwrap();
        let lines = exercises_for_date_range_formatted(&log, day, day);
        assert_eq!(lines, vec!["2024-05-01", "- Row: 3x12", "- Deadlift: 5x5"]);
    }

    #[test]
    fn names_are_distinct_and_stable() {
        let mut log = sample();
        add_entry(&mut log, ymd(2023, 12, 31), "Bench", 1, 1).unwrap();
        add_entry(&mut log, ymd(2024, 1, 3), "Squat", 2, 2).unwrap();

        let names = all_exercise_names(&log);
        assert_eq!(names, vec!["Bench", "Squat"]);
        assert_eq!(all_exercise_names(&log), names);
        assert!(all_exercise_names(&MemoryLog::default()).is_empty());
    }

    #[test]
    fn add_entry_validates_input() {
        let mut log = MemoryLog::default();
        assert!(add_entry(&mut log, ymd(2024, 1, 1), "   ", 3, 10).is_err());
        assert!(add_entry(&mut log, ymd(2024, 1, 1), "Squat", 0, 10).is_err());
        assert!(add_entry(&mut log, ymd(2024, 1, 1), "Squat", 3, 0).is_err());
        assert!(log.all_dates().is_empty());

        let entry = add_entry(&mut log, ymd(2024, 1, 1), "  Squat ", 3, 10).unwrap();
        assert_eq!(entry.name, "Squat");
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn remove_entry_by_id() {
        let mut log = sample();
        let id = log.get_by_date("2024-01-01").unwrap().entries[0].id.clone();
        assert!(!remove_entry(&mut log, ymd(2024, 1, 1), "missing"));
        assert!(remove_entry(&mut log, ymd(2024, 1, 1), &id));
        assert!(log.get_by_date("2024-01-01").unwrap().entries.is_empty());
    }

    #[test]
    fn rename_merges_into_existing_name() {
        let mut log = sample();
        let changed = rename_exercise(&mut log, "Squat", "Bench").unwrap();
        assert_eq!(changed, 1);
        assert_eq!(all_exercise_names(&log), vec!["Bench"]);
        assert!(rename_exercise(&mut log, "Bench", " ").is_err());
    }

    #[test]
    fn delete_removes_across_days() {
        let mut log = sample();
        add_entry(&mut log, ymd(2024, 1, 3), "Squat", 2, 2).unwrap();
        assert_eq!(delete_exercise(&mut log, "Squat"), 2);
        assert_eq!(all_exercise_names(&log), vec!["Bench"]);
        assert!(log.get_by_date("2024-01-01").unwrap().entries.is_empty());
        assert_eq!(delete_exercise(&mut log, "Squat"), 0);
    }

    #[test]
    fn import_copies_with_fresh_ids() {
        let mut log = sample();
        add_entry(&mut log, ymd(2024, 1, 1), "Lunge", 3, 12).unwrap();
        let source_ids: Vec<_> = log
            .get_by_date("2024-01-01")
            .unwrap()
            .entries
            .iter()
            .map(|e| e.id.clone())
            .collect();

        let copied = import_day(&mut log, ymd(2024, 1, 1), ymd(2024, 1, 3));
        assert_eq!(copied.len(), 2);

        let target = log.get_by_date("2024-01-03").unwrap();
        let names: Vec<_> = target.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bench", "Squat", "Lunge"]);
        assert!(copied.iter().all(|entry| !source_ids.contains(&entry.id)));

        assert!(import_day(&mut log, ymd(2020, 1, 1), ymd(2024, 1, 3)).is_empty());
        assert_eq!(log.get_by_date("2024-01-03").unwrap().entries.len(), 3);
    }
}
