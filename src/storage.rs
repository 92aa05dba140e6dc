use crate::errors::AppError;
use crate::records::{HydrationSettings, Record, StoreKind};
use crate::store::{RecordStore, StoreSet};
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::error;

pub fn resolve_data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("CARE_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data"))
}

fn store_path(dir: &Path, kind: StoreKind) -> PathBuf {
    dir.join(format!("{}.json", kind.storage_key()))
}

fn settings_path(dir: &Path) -> PathBuf {
    dir.join("hydrationSettings.json")
}

/// Loads one store's snapshot. Missing or corrupt snapshots fall back to an
/// empty store; a read failure never reaches the caller.
pub async fn load_store(dir: &Path, kind: StoreKind) -> RecordStore {
    let path = store_path(dir, kind);
    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<Record>>(&bytes) {
            Ok(records) => RecordStore::from_records(kind, records),
            Err(err) => {
                error!(store = kind.storage_key(), "failed to parse snapshot: {err}");
                RecordStore::new(kind)
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => RecordStore::new(kind),
        Err(err) => {
            error!(store = kind.storage_key(), "failed to read snapshot: {err}");
            RecordStore::new(kind)
        }
    }
}

pub async fn load_hydration_settings(dir: &Path) -> HydrationSettings {
    let path = settings_path(dir);
    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(settings) => settings,
            Err(err) => {
                error!("failed to parse hydration settings: {err}");
                HydrationSettings::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => HydrationSettings::default(),
        Err(err) => {
            error!("failed to read hydration settings: {err}");
            HydrationSettings::default()
        }
    }
}

pub async fn load_stores(dir: &Path) -> StoreSet {
    let mut set = StoreSet::new();
    for kind in StoreKind::ALL {
        set.insert(load_store(dir, kind).await);
    }
    set.hydration_settings = load_hydration_settings(dir).await;
    set
}

/// Whole-snapshot rewrite; at this scale no incremental diffing is worth
/// the bookkeeping.
pub async fn persist_store(dir: &Path, kind: StoreKind, records: &[Record]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(records).map_err(AppError::internal)?;
    fs::write(store_path(dir, kind), payload)
        .await
        .map_err(AppError::internal)?;
    Ok(())
}

pub async fn persist_hydration_settings(
    dir: &Path,
    settings: &HydrationSettings,
) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(settings).map_err(AppError::internal)?;
    fs::write(settings_path(dir), payload)
        .await
        .map_err(AppError::internal)?;
    Ok(())
}
