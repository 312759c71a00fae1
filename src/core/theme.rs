use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FolioError, Result};

/// Colour scheme preference. The only durable state folio keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// A single-value store holding the theme flag as a bare `dark`/`light` string.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default data-dir location.
    pub fn open_default() -> Self {
        Self::new(crate::config::theme_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored flag. Missing or unreadable values fall back to dark.
    pub fn load(&self) -> Theme {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no stored theme");
                return Theme::default();
            }
        };
        serde_plain::from_str(raw.trim()).unwrap_or_else(|_| {
            warn!(path = %self.path.display(), value = raw.trim(), "ignoring unknown theme");
            Theme::default()
        })
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        let io_err = |source: std::io::Error| FolioError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let value = serde_plain::to_string(&theme)
            .map_err(|e| FolioError::Config(format!("cannot encode theme: {}", e)))?;
        std::fs::write(&self.path, value).map_err(io_err)
    }

    /// Flip the stored flag and return the new value.
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}
