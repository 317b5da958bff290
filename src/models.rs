use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "ft/in", alias = "ft_in")]
    FtIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarWeekStart {
    #[default]
    Sunday,
    Monday,
}

/// Display preferences. Missing fields take their defaults when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UnitPreferences {
    #[serde(default)]
    pub weight: WeightUnit,
    #[serde(default)]
    pub height: HeightUnit,
    #[serde(default)]
    pub calendar_week_start: CalendarWeekStart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DailyExercises {
    pub date: String,
    #[serde(default)]
    pub entries: Vec<ExerciseEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: String,
    pub name: String,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyWeightFood {
    pub date: String,
    #[serde(default)]
    pub morning_weight: Option<f64>,
    #[serde(default)]
    pub evening_weight: Option<f64>,
    #[serde(default)]
    pub food_entries: Vec<FoodEntry>,
}

/// Everything that is persisted. Each record is parsed on its own so one bad
/// record never takes the rest of the document down with it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default, deserialize_with = "lenient_record")]
    pub preferences: Option<UnitPreferences>,
    #[serde(default, deserialize_with = "lenient_days")]
    pub exercises: BTreeMap<String, DailyExercises>,
    #[serde(default, deserialize_with = "lenient_days")]
    pub weight_food: BTreeMap<String, DailyWeightFood>,
}

fn lenient_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!("ignoring malformed preference record: {err}");
            None
        }
    }))
}

fn lenient_days<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + DatedRecord,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    let mut days = BTreeMap::new();
    for (key, value) in raw.unwrap_or_default() {
        if crate::dates::parse_date_key(&key).is_none() {
            warn!("ignoring daily record with invalid date key {key:?}");
            continue;
        }
        match serde_json::from_value::<T>(value) {
            Ok(mut record) => {
                record.set_date(key.clone());
                let dropped = record.drop_invalid_entries();
                if dropped > 0 {
                    warn!("ignoring {dropped} malformed entries for {key}");
                }
                days.insert(key, record);
            }
            Err(err) => warn!("ignoring malformed daily record for {key}: {err}"),
        }
    }
    Ok(days)
}

/// Records keyed by their calendar date.
pub trait DatedRecord {
    fn set_date(&mut self, date: String);

    /// Removes entries that could never have been written through the API.
    /// Returns how many were removed.
    fn drop_invalid_entries(&mut self) -> usize;
}

impl DatedRecord for DailyExercises {
    fn set_date(&mut self, date: String) {
        self.date = date;
    }

    fn drop_invalid_entries(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !entry.name.trim().is_empty() && entry.sets > 0 && entry.reps > 0);
        before - self.entries.len()
    }
}

impl DatedRecord for DailyWeightFood {
    fn set_date(&mut self, date: String) {
        self.date = date;
    }

    fn drop_invalid_entries(&mut self) -> usize {
        let before = self.food_entries.len();
        self.food_entries.retain(|entry| !entry.name.trim().is_empty());
        before - self.food_entries.len()
    }
}

#[derive(Debug, Deserialize)]
pub struct NewExerciseRequest {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Deserialize)]
pub struct RenameExerciseRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteExerciseRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub days_ago: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    pub weight: Option<WeightUnit>,
    pub height: Option<HeightUnit>,
    pub calendar_week_start: Option<CalendarWeekStart>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRequest {
    pub morning_weight: Option<f64>,
    pub evening_weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct NewFoodRequest {
    pub name: String,
    pub calories: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NamesResponse {
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangedResponse {
    pub changed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResponse {
    pub start: String,
    pub end: String,
    pub lines: Vec<String>,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DateShortcut {
    pub days: u32,
    pub label: String,
    pub date: String,
}
