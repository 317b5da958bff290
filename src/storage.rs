use crate::errors::AppError;
use crate::models::AppData;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

/// Reads the document. A missing file is a fresh start; an unreadable one is
/// copied aside to `<path>.corrupt` first so the next write cannot destroy it.
pub async fn load_data(path: &Path) -> AppData {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            return AppData::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(data) => data,
        Err(err) => {
            let backup = sibling(path, "corrupt");
            error!("failed to parse data file: {err}; keeping a copy at {}", backup.display());
            if let Err(err) = fs::write(&backup, &bytes).await {
                warn!("failed to back up unreadable data file: {err}");
            }
            AppData::default()
        }
    }
}

/// Writes to `<path>.tmp` and renames it over `path`, so a crash mid-write
/// leaves the previous document intact.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let tmp = sibling(path, "tmp");

    let written = match fs::write(&tmp, payload).await {
        Ok(()) => fs::rename(&tmp, path).await,
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        error!("failed to write data file {}: {err}", path.display());
        let _ = fs::remove_file(&tmp).await;
        return Err(AppError::internal(err));
    }

    debug!("persisted {} exercise days", data.exercises.len());
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
