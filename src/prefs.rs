//! Persisted theme preference.
//!
//! A single dark/light choice, read once at startup and written on every
//! toggle. Kept as a small JSON file next to the local store's data.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::utils::errors::AppError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// File-backed theme preference store.
#[derive(Debug, Clone)]
pub struct ThemePreferences {
    path: PathBuf,
}

impl ThemePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the saved preference, falling back to the default when the
    /// file is missing or unreadable.
    pub async fn load(&self) -> Theme {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<ThemeFile>(&bytes) {
                Ok(file) => file.theme,
                Err(err) => {
                    debug!(error = %err, "theme file unreadable, using default");
                    Theme::default()
                }
            },
            Err(_) => Theme::default(),
        }
    }

    /// Persist the preference.
    pub async fn save(&self, theme: Theme) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(AppError::internal)?;
        }
        let bytes = serde_json::to_vec_pretty(&ThemeFile { theme })?;
        fs::write(&self.path, bytes).await.map_err(AppError::internal)
    }
}
