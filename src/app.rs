use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/preferences",
            get(handlers::get_preferences)
                .put(handlers::put_preferences)
                .patch(handlers::patch_preferences),
        )
        .route("/api/exercises/names", get(handlers::get_names))
        .route("/api/exercises/rename", post(handlers::rename))
        .route("/api/exercises/delete", post(handlers::delete))
        .route(
            "/api/exercises/:date",
            get(handlers::get_day).post(handlers::add_exercise),
        )
        .route("/api/exercises/:date/import", post(handlers::import))
        .route("/api/exercises/:date/:id", delete(handlers::remove_exercise))
        .route("/api/export", get(handlers::export))
        .route("/api/date-shortcuts", get(handlers::date_shortcuts))
        .route("/api/weight-food/:date", get(handlers::get_weight_food))
        .route("/api/weight-food/:date/weight", put(handlers::put_weight))
        .route("/api/weight-food/:date/food", post(handlers::add_food))
        .route(
            "/api/weight-food/:date/food/:id",
            delete(handlers::remove_food),
        )
        .with_state(state)
}
