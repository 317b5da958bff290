pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod exercises;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;
pub mod weight_food;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
pub use store::{ExerciseLog, PreferenceStore};
