use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::{
    log_warn,
    models::{DEFAULT_DESC, DEFAULT_TAG},
    timer::duration::MIN_MINUTES,
};

const ENABLE_LOGS: bool = true;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SoundSettings {
    pub enabled: bool,
    /// Directory holding custom cue files; built-in chimes play otherwise.
    pub directory: Option<PathBuf>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserSettings {
    pub default_minutes: u64,
    pub tag: String,
    pub desc: String,
    pub sound: SoundSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_minutes: MIN_MINUTES,
            tag: DEFAULT_TAG.to_string(),
            desc: DEFAULT_DESC.to_string(),
            sound: SoundSettings::default(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!(
                    "Ignoring malformed settings in {}: {}",
                    path.display(),
                    err
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> UserSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Applies `edit` and persists the result.
    pub fn update(&self, edit: impl FnOnce(&mut UserSettings)) -> Result<UserSettings> {
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        edit(&mut *guard);
        self.persist(&*guard)?;
        Ok(guard.clone())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    fn unique_path(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("{prefix}_{now}.json"))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let store = SettingsStore::new(unique_path("kamvas_settings_missing")).unwrap();
        let settings = store.get();
        assert_eq!(settings.default_minutes, 25);
        assert_eq!(settings.tag, "Empty");
        assert_eq!(settings.desc, "...");
        assert!(settings.sound.enabled);
    }

    #[test]
    fn test_update_persists() {
        let path = unique_path("kamvas_settings_update");
        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update(|s| {
                s.default_minutes = 45;
                s.tag = "sumi".into();
                s.sound.enabled = false;
            })
            .unwrap();

        let reloaded = SettingsStore::new(path.clone()).unwrap().get();
        assert_eq!(reloaded.default_minutes, 45);
        assert_eq!(reloaded.tag, "sumi");
        assert!(!reloaded.sound.enabled);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_partial_and_malformed_files() {
        let path = unique_path("kamvas_settings_partial");
        fs::write(&path, r#"{"tag": "ink"}"#).unwrap();
        let partial = SettingsStore::new(path.clone()).unwrap().get();
        assert_eq!(partial.tag, "ink");
        assert_eq!(partial.default_minutes, 25);

        fs::write(&path, "{ not json").unwrap();
        let fallback = SettingsStore::new(path.clone()).unwrap().get();
        assert_eq!(fallback, UserSettings::default());

        fs::remove_file(path).ok();
    }
}
