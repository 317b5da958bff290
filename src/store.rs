//! Store seams. `AppData` is the authoritative in-memory implementation; the
//! HTTP layer persists it after every mutation.

use crate::models::{AppData, DailyExercises, UnitPreferences};

pub trait PreferenceStore {
    /// Never fails: absent or unreadable records come back as the default.
    fn load(&self) -> UnitPreferences;

    /// Replaces the whole record. Callers merge before saving.
    fn save(&mut self, prefs: UnitPreferences);
}

pub trait ExerciseLog {
    fn get_by_date(&self, date: &str) -> Option<&DailyExercises>;

    /// Inserts or replaces the record stored under `day.date`.
    fn upsert(&mut self, day: DailyExercises);

    /// Every stored date key, ascending.
    fn all_dates(&self) -> Vec<String>;
}

impl PreferenceStore for AppData {
    fn load(&self) -> UnitPreferences {
        self.preferences.unwrap_or_default()
    }

    fn save(&mut self, prefs: UnitPreferences) {
        self.preferences = Some(prefs);
    }
}

impl ExerciseLog for AppData {
    fn get_by_date(&self, date: &str) -> Option<&DailyExercises> {
        self.exercises.get(date)
    }

    fn upsert(&mut self, day: DailyExercises) {
        self.exercises.insert(day.date.clone(), day);
    }

    fn all_dates(&self) -> Vec<String> {
        self.exercises.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarWeekStart, HeightUnit, WeightUnit};

    #[test]
    fn load_defaults_when_empty() {
        let data = AppData::default();
        let prefs = data.load();
        assert_eq!(prefs.weight, WeightUnit::Kg);
        assert_eq!(prefs.height, HeightUnit::Cm);
        assert_eq!(prefs.calendar_week_start, CalendarWeekStart::Sunday);
    }

    #[test]
    fn save_then_load_returns_same_record() {
        let mut data = AppData::default();
        let prefs = UnitPreferences {
            weight: WeightUnit::Lbs,
            height: HeightUnit::FtIn,
            calendar_week_start: CalendarWeekStart::Monday,
        };
        data.save(prefs);
        assert_eq!(data.load(), prefs);
    }

    #[test]
    fn upsert_keeps_one_record_per_date() {
        let mut data = AppData::default();
        data.upsert(DailyExercises {
            date: "2024-01-02".to_string(),
            entries: Vec::new(),
        });
        data.upsert(DailyExercises {
            date: "2024-01-01".to_string(),
            entries: Vec::new(),
        });
        data.upsert(DailyExercises {
            date: "2024-01-02".to_string(),
            entries: Vec::new(),
        });
        assert_eq!(data.all_dates(), vec!["2024-01-01", "2024-01-02"]);
    }
}
