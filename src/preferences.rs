//! User preferences: color theme and AI difficulty, persisted as TOML.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::Difficulty;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default preference file, relative to the working directory.
pub const DEFAULT_PREFS_PATH: &str = "noughts_prefs.toml";

/// Color theme of the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    #[default]
    Dark,
}

impl Theme {
    /// Switches between light and dark.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Preferences that survive between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize)]
pub struct Preferences {
    /// Board theme.
    #[getter(copy)]
    theme: Theme,
    /// Difficulty of the computer opponent.
    #[getter(copy)]
    #[serde(rename = "aiMode")]
    difficulty: Difficulty,
}

impl Preferences {
    /// Creates preferences from explicit values.
    #[instrument]
    pub fn new(theme: Theme, difficulty: Difficulty) -> Self {
        Self { theme, difficulty }
    }

    /// Replaces the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Replaces the difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Parses a preference file's contents.
    ///
    /// Unknown values fall back to that key's default instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] if the text is not valid TOML.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, PreferencesError> {
        let stored: StoredPreferences = toml::from_str(content)
            .map_err(|e| PreferencesError::new(format!("Failed to parse preferences: {}", e)))?;
        Ok(stored.resolve())
    }

    /// Renders these preferences as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] if serialization fails.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, PreferencesError> {
        toml::to_string(self)
            .map_err(|e| PreferencesError::new(format!("Failed to serialize preferences: {}", e)))
    }
}

/// Raw file contents, before unknown values are replaced by defaults.
#[derive(Debug, Default, Deserialize)]
struct StoredPreferences {
    theme: Option<toml::Value>,
    #[serde(rename = "aiMode")]
    ai_mode: Option<toml::Value>,
}

impl StoredPreferences {
    fn resolve(self) -> Preferences {
        Preferences {
            theme: parse_or_default("theme", self.theme.as_ref()),
            difficulty: parse_or_default("aiMode", self.ai_mode.as_ref()),
        }
    }
}

fn parse_or_default<T: FromStr + Default>(key: &str, value: Option<&toml::Value>) -> T {
    let Some(value) = value else {
        return T::default();
    };
    match value.as_str().map(T::from_str) {
        Some(Ok(parsed)) => parsed,
        _ => {
            warn!(key, %value, "Unrecognized preference value, using default");
            T::default()
        }
    }
}

/// Storage for [`Preferences`].
pub trait PreferenceStore {
    /// Loads preferences, falling back to defaults when nothing usable is stored.
    fn load(&self) -> Preferences;

    /// Persists `preferences`.
    fn save(&mut self, preferences: &Preferences) -> Result<(), PreferencesError>;
}

/// Preferences kept in a TOML file on disk.
#[derive(Debug, Clone, Getters)]
pub struct FilePreferenceStore {
    /// Location of the TOML file.
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads and parses the file.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] if the file cannot be read or parsed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn try_load(&self) -> Result<Preferences, PreferencesError> {
        debug!("Loading preferences from file");
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            PreferencesError::new(format!("Failed to read preferences file: {}", e))
        })?;
        Preferences::from_toml(&content)
    }
}

impl PreferenceStore for FilePreferenceStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Preferences {
        if !self.path.exists() {
            info!("Preferences file not found, using defaults");
            return Preferences::default();
        }
        match self.try_load() {
            Ok(preferences) => {
                info!(
                    theme = %preferences.theme,
                    difficulty = %preferences.difficulty,
                    "Preferences loaded"
                );
                preferences
            }
            Err(e) => {
                warn!(error = %e, "Could not load preferences, using defaults");
                Preferences::default()
            }
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn save(&mut self, preferences: &Preferences) -> Result<(), PreferencesError> {
        let content = preferences.to_toml()?;
        std::fs::write(&self.path, content).map_err(|e| {
            PreferencesError::new(format!("Failed to write preferences file: {}", e))
        })?;
        debug!("Preferences saved");
        Ok(())
    }
}

/// Preferences held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    saved: Option<Preferences>,
}

impl MemoryPreferenceStore {
    /// The last saved value, if any.
    pub fn saved(&self) -> Option<Preferences> {
        self.saved
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Preferences {
        self.saved.unwrap_or_default()
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), PreferencesError> {
        self.saved = Some(*preferences);
        Ok(())
    }
}

/// Preference storage error.
#[derive(Debug, Clone, Display, Error)]
#[display("Preferences error: {} at {}:{}", message, file, line)]
pub struct PreferencesError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PreferencesError {
    /// Creates a new preferences error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
