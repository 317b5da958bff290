use crate::dates::{self, parse_date_key, DateSelection};
use crate::errors::AppError;
use crate::exercises::{
    add_entry, all_exercise_names, day_or_empty, delete_exercise,
    exercises_for_date_range_formatted, format_export, import_day, remove_entry, rename_exercise,
};
use crate::models::{
    ChangedResponse, DailyExercises, DailyWeightFood, DateShortcut, DeleteExerciseRequest,
    ExerciseEntry, ExportQuery, ExportResponse, FoodEntry, ImportRequest, NamesResponse,
    NewExerciseRequest, NewFoodRequest, PreferencesPatch, RenameExerciseRequest, UnitPreferences,
    WeightRequest,
};
use crate::state::AppState;
use crate::store::PreferenceStore;
use crate::ui::render_index;
use crate::weight_food;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::NaiveDate;
use tracing::info;

pub const MISSING_DATES: &str = "Please select both start and end dates.";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(dates::today(), &data.load()))
}

pub async fn get_preferences(State(state): State<AppState>) -> Json<UnitPreferences> {
    let data = state.data.lock().await;
    Json(data.load())
}

pub async fn put_preferences(
    State(state): State<AppState>,
    Json(prefs): Json<UnitPreferences>,
) -> Result<Json<UnitPreferences>, AppError> {
    state
        .update(|data| {
            data.save(prefs);
            Ok(())
        })
        .await?;
    info!(?prefs, "saved preferences");
    Ok(Json(prefs))
}

pub async fn patch_preferences(
    State(state): State<AppState>,
    Json(patch): Json<PreferencesPatch>,
) -> Result<Json<UnitPreferences>, AppError> {
    let prefs = state
        .update(|data| {
            let mut prefs = data.load();
            if let Some(weight) = patch.weight {
                prefs.weight = weight;
            }
            if let Some(height) = patch.height {
                prefs.height = height;
            }
            if let Some(start) = patch.calendar_week_start {
                prefs.calendar_week_start = start;
            }
            data.save(prefs);
            Ok(prefs)
        })
        .await?;
    info!(?prefs, "updated preferences");
    Ok(Json(prefs))
}

pub async fn get_names(State(state): State<AppState>) -> Json<NamesResponse> {
    let data = state.data.lock().await;
    Json(NamesResponse {
        names: all_exercise_names(&*data),
    })
}

pub async fn rename(
    State(state): State<AppState>,
    Json(payload): Json<RenameExerciseRequest>,
) -> Result<Json<ChangedResponse>, AppError> {
    let changed = state
        .update(|data| rename_exercise(data, &payload.from, &payload.to))
        .await?;
    info!(from = %payload.from, to = %payload.to, changed, "renamed exercise");
    Ok(Json(ChangedResponse { changed }))
}

pub async fn delete(
    State(state): State<AppState>,
    Json(payload): Json<DeleteExerciseRequest>,
) -> Result<Json<ChangedResponse>, AppError> {
    let changed = state
        .update(|data| Ok(delete_exercise(data, &payload.name)))
        .await?;
    info!(name = %payload.name, changed, "deleted exercise");
    Ok(Json(ChangedResponse { changed }))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailyExercises>, AppError> {
    let date = parse_date(&date)?;
    let data = state.data.lock().await;
    Ok(Json(day_or_empty(&*data, date)))
}

pub async fn add_exercise(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<NewExerciseRequest>,
) -> Result<(StatusCode, Json<ExerciseEntry>), AppError> {
    let date = parse_date(&date)?;
    let entry = state
        .update(|data| add_entry(data, date, &payload.name, payload.sets, payload.reps))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn remove_exercise(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let date = parse_date(&date)?;
    state
        .update(|data| {
            if remove_entry(data, date, &id) {
                Ok(())
            } else {
                Err(AppError::not_found(format!("no entry {id} on {date}")))
            }
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Copies a previous day into `date`. The source comes from a shortcut
/// (`daysAgo`), an explicit pick (`from`, which may not be after today), or
/// yesterday when neither is given.
pub async fn import(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<Vec<ExerciseEntry>>, AppError> {
    let to = parse_date(&date)?;
    let today = dates::today();
    let mut selection = DateSelection::new(today).with_default(dates::days_ago(today, 1));
    let mut from = selection.displayed();

    if let Some(days) = payload.days_ago {
        selection.press_shortcut(days, today, |date| from = Some(date));
    } else if let Some(picked) = payload.from.as_deref() {
        let picked = parse_date(picked)?;
        if !selection.pick(Some(picked), today, |date| from = Some(date)) {
            return Err(AppError::bad_request(format!(
                "cannot import from {picked}, it is after {today}"
            )));
        }
    }
    let Some(from) = from else {
        return Err(AppError::bad_request("no date to import from"));
    };

    let copied = state.update(|data| Ok(import_day(data, from, to))).await?;
    info!(%from, %to, copied = copied.len(), "imported exercises");
    Ok(Json(copied))
}

pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportResponse>, AppError> {
    let (Some(start), Some(end)) = (non_blank(query.start), non_blank(query.end)) else {
        return Err(AppError::bad_request(MISSING_DATES));
    };
    let start_date = parse_date(&start)?;
    let end_date = parse_date(&end)?;

    let data = state.data.lock().await;
    let lines = exercises_for_date_range_formatted(&*data, start_date, end_date);
    Ok(Json(ExportResponse {
        text: format_export(&lines),
        start,
        end,
        lines,
    }))
}

pub async fn date_shortcuts() -> Json<Vec<DateShortcut>> {
    Json(dates::shortcuts_at(dates::today()))
}

pub async fn get_weight_food(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailyWeightFood>, AppError> {
    let date = parse_date(&date)?;
    let data = state.data.lock().await;
    Ok(Json(weight_food::day(&data, date)))
}

pub async fn put_weight(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<WeightRequest>,
) -> Result<Json<DailyWeightFood>, AppError> {
    let date = parse_date(&date)?;
    let record = state
        .update(|data| {
            weight_food::set_weights(data, date, payload.morning_weight, payload.evening_weight)
        })
        .await?;
    Ok(Json(record))
}

pub async fn add_food(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<NewFoodRequest>,
) -> Result<(StatusCode, Json<FoodEntry>), AppError> {
    let date = parse_date(&date)?;
    let entry = state
        .update(|data| weight_food::add_food(data, date, &payload.name, payload.calories))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn remove_food(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let date = parse_date(&date)?;
    state
        .update(|data| {
            if weight_food::remove_food(data, date, &id) {
                Ok(())
            } else {
                Err(AppError::not_found(format!("no food entry {id} on {date}")))
            }
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    parse_date_key(value.trim())
        .ok_or_else(|| AppError::bad_request(format!("invalid date {value:?}, expected YYYY-MM-DD")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
