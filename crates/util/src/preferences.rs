//! User preference persistence for the Tally widgets demo.
//!
//! A small JSON-backed store recording the preferred theme and widget
//! defaults. The file lives in the standard configuration directory
//! (`~/.config/tally/preferences.json` on most platforms) unless
//! [`PREFERENCES_PATH_ENV`] points elsewhere. Values edited with the widgets
//! are never written here.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use tally_types::{CurrencyFormat, NumericEntryConfig, SuggestionFieldConfig};
use thiserror::Error;
use tracing::{debug, warn};

use crate::expand_tilde;

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "TALLY_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesPayload {
    /// Canonical identifier of the theme to load.
    pub preferred_theme: Option<String>,
    /// Defaults for the amount keypad.
    pub numeric: NumericEntryConfig,
    /// Defaults shared by suggestion fields (label and suggestions are per field).
    pub suggestions: SuggestionFieldConfig,
    pub currency: CurrencyFormat,
}

/// Preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: PreferencesPayload,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Load preferences from the default location (honouring the env override).
    pub fn new() -> Result<Self, PreferencesError> {
        Self::load_from(default_preferences_path())
    }

    /// Load preferences from an explicit path. A missing file yields defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        debug!(path = %path.display(), "Loaded preferences");
        Ok(Self {
            path,
            payload,
            persist_to_disk: true,
        })
    }

    /// In-memory store used when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: PreferencesPayload::default(),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn payload(&self) -> &PreferencesPayload {
        &self.payload
    }

    pub fn preferred_theme(&self) -> Option<&str> {
        self.payload.preferred_theme.as_deref()
    }

    /// Persist a new preferred theme identifier.
    pub fn set_preferred_theme(&mut self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        self.payload.preferred_theme = theme_id;
        self.save()
    }

    /// Replace the whole payload and persist it.
    pub fn replace(&mut self, payload: PreferencesPayload) -> Result<(), PreferencesError> {
        self.payload = payload;
        self.save()
    }

    fn save(&self) -> Result<(), PreferencesError> {
        if !self.persist_to_disk {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Resolves the preferences path from the environment or the config directory.
pub fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(PREFERENCES_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
        .join(PREFERENCES_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}
