use crate::dates::date_key;
use crate::errors::AppError;
use crate::models::{AppData, DailyWeightFood, FoodEntry};
use chrono::NaiveDate;
use uuid::Uuid;

pub fn day(data: &AppData, date: NaiveDate) -> DailyWeightFood {
    let key = date_key(date);
    data.weight_food
        .get(&key)
        .cloned()
        .unwrap_or(DailyWeightFood {
            date: key,
            ..DailyWeightFood::default()
        })
}

pub fn set_weights(
    data: &mut AppData,
    date: NaiveDate,
    morning: Option<f64>,
    evening: Option<f64>,
) -> Result<DailyWeightFood, AppError> {
    for weight in [morning, evening].into_iter().flatten() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(AppError::bad_request("weight must be a non-negative number"));
        }
    }

    let mut record = day(data, date);
    record.morning_weight = morning;
    record.evening_weight = evening;
    data.weight_food.insert(record.date.clone(), record.clone());
    Ok(record)
}

pub fn add_food(
    data: &mut AppData,
    date: NaiveDate,
    name: &str,
    calories: u32,
) -> Result<FoodEntry, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("food name must not be empty"));
    }

    let entry = FoodEntry {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        calories,
    };
    let mut record = day(data, date);
    record.food_entries.push(entry.clone());
    data.weight_food.insert(record.date.clone(), record);
    Ok(entry)
}

pub fn remove_food(data: &mut AppData, date: NaiveDate, id: &str) -> bool {
    let Some(record) = data.weight_food.get_mut(&date_key(date)) else {
        return false;
    };
    let before = record.food_entries.len();
    record.food_entries.retain(|entry| entry.id != id);
    record.food_entries.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn missing_day_reads_as_empty() {
        let data = AppData::default();
        let record = day(&data, jan(4));
        assert_eq!(record.date, "2024-01-04");
        assert!(record.morning_weight.is_none());
        assert!(record.food_entries.is_empty());
    }

    #[test]
    fn weights_and_food_accumulate() {
        let mut data = AppData::default();
        set_weights(&mut data, jan(4), Some(80.5), None).unwrap();
        let oats = add_food(&mut data, jan(4), "Oats", 350).unwrap();
        add_food(&mut data, jan(4), "Apple", 95).unwrap();

        let record = day(&data, jan(4));
        assert_eq!(record.morning_weight, Some(80.5));
        assert_eq!(record.food_entries.len(), 2);

        assert!(remove_food(&mut data, jan(4), &oats.id));
        assert!(!remove_food(&mut data, jan(4), &oats.id));
        assert_eq!(day(&data, jan(4)).food_entries[0].name, "Apple");
    }

    #[test]
    fn rejects_bad_input() {
        let mut data = AppData::default();
        assert!(set_weights(&mut data, jan(4), Some(-1.0), None).is_err());
        assert!(set_weights(&mut data, jan(4), None, Some(f64::NAN)).is_err());
        assert!(add_food(&mut data, jan(4), "", 10).is_err());
        assert!(data.weight_food.is_empty());
    }
}
