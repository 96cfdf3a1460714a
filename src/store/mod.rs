use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbImage};

use crate::{error::PersistenceError, log_error, log_info, models::SessionRecord};

mod helpers;

pub use helpers::atomic_write;

const ENABLE_LOGS: bool = true;

pub const LOG_FILE_NAME: &str = "data.json";

/// Append-only session log: one JSON array file plus one PNG thumbnail per
/// committed session, all in `data_dir`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    data_dir: PathBuf,
    log_path: PathBuf,
}

impl SessionStore {
    /// The directory must already exist; nothing is created here.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let log_path = data_dir.join(LOG_FILE_NAME);
        Self { data_dir, log_path }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn thumbnail_path(&self, record: &SessionRecord) -> PathBuf {
        self.data_dir.join(record.thumbnail_file_name())
    }

    /// Records in file order, oldest first. A missing or blank log is empty.
    pub fn read_all(&self) -> Result<Vec<SessionRecord>, PersistenceError> {
        let content = match fs::read_to_string(&self.log_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(&self.log_path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| PersistenceError::Format {
            path: self.log_path.clone(),
            source,
        })
    }

    /// Saves the thumbnail, then rewrites the log with `record` appended.
    /// The existing log is parsed first so a malformed file leaves no orphan
    /// thumbnail behind. An existing thumbnail is never overwritten.
    pub fn append(
        &self,
        record: &SessionRecord,
        thumbnail: &RgbImage,
    ) -> Result<(), PersistenceError> {
        let result = self.read_all().and_then(|mut records| {
            self.write_thumbnail(record, thumbnail)?;
            records.push(record.clone());
            self.write_all(&records)
        });

        match &result {
            Ok(()) => log_info!(
                "Saved session {} ({} min, tag '{}')",
                record.date,
                record.duration_minutes,
                record.tag
            ),
            Err(e) => log_error!("Failed to save session {}: {}", record.date, e),
        }
        result
    }

    fn write_thumbnail(
        &self,
        record: &SessionRecord,
        thumbnail: &RgbImage,
    ) -> Result<(), PersistenceError> {
        let path = self.thumbnail_path(record);
        if path.exists() {
            return Err(PersistenceError::ThumbnailExists(path));
        }

        thumbnail
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| PersistenceError::Image { path, source })
    }

    fn write_all(&self, records: &[SessionRecord]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(records).map_err(|source| {
            PersistenceError::Format {
                path: self.log_path.clone(),
                source,
            }
        })?;
        atomic_write(&self.log_path, &json)
    }
}
