use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use crate::error::PersistenceError;

/// Writes `content` to a sibling temp file, syncs it, then renames it over
/// `path` so readers never observe a half-written file.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), PersistenceError> {
    let tmp_path = path.with_extension("tmp");
    let mut tmp_file =
        File::create(&tmp_path).map_err(|e| PersistenceError::io(&tmp_path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| PersistenceError::io(&tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| PersistenceError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| PersistenceError::io(path, e))?;
    Ok(())
}
