pub mod types;

use std::path::{Path, PathBuf};

use crate::error::{FolioError, Result};
use types::FolioConfig;

/// Environment variable that redirects both config and data directories.
pub const HOME_ENV: &str = "FOLIO_HOME";

/// Load config from the XDG path, falling back to defaults when absent.
pub fn load_config() -> Result<FolioConfig> {
    load_config_from(&config_path())
}

/// Load config from an explicit file. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<FolioConfig> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FolioConfig::default());
        }
        Err(source) => {
            return Err(FolioError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&text)
        .map_err(|e| FolioError::Config(format!("{}: {}", path.display(), e)))
}

/// Return the config dir (~/.config/folio/, or $FOLIO_HOME)
pub fn config_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return PathBuf::from(home);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("folio")
}

/// Return the data dir (~/.local/share/folio/, or $FOLIO_HOME)
pub fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return PathBuf::from(home);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("folio")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Return the persisted theme flag path
pub fn theme_path() -> PathBuf {
    data_dir().join("theme")
}
