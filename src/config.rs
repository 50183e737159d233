use crate::error::{Error, Result};
use crate::pomodoro::PomodoroSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const DATA_DIR_NAME: &str = ".projectpro";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "projectpro.log";

/// Default event poll timeout in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Only settings live on disk; projects, tasks and the session never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pomodoro: PomodoroSettings,
    /// Event loop poll timeout; the Pomodoro clock is refreshed at this rate
    pub tick_ms: u64,
    /// Default `tracing` filter when `PROJECTPRO_LOG` is unset
    pub log_level: String,
    pub use_emoji: bool,
    /// Reject new tasks whose project or assignee does not exist
    pub strict_references: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pomodoro: PomodoroSettings::default(),
            tick_ms: DEFAULT_TICK_MS,
            log_level: "info".to_string(),
            use_emoji: true,
            strict_references: false,
        }
    }
}

impl Config {
    /// Load config from `path`; a missing file yields the defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like `load`, but an unreadable or malformed file yields the defaults
    /// along with the error that caused the fallback
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<Error>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::ConfigSerialize {
            path: path.to_path_buf(),
            source,
        })?;
        atomic_write(path, &json)
    }
}

/// Get the data directory - checks for a local .projectpro first, then
/// falls back to the global ~/.projectpro
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(current_dir) = env::current_dir() {
        if let Some(local_dir) = find_local_data_dir(&current_dir) {
            return Ok(local_dir);
        }
    }

    let home = dirs::home_dir().ok_or(Error::NoDataDir)?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find a local .projectpro directory by walking up the directory tree
fn find_local_data_dir(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    create_dir(&dir)?;
    Ok(dir)
}

/// Create `.projectpro/` under `parent` with a default config file
pub fn init_data_dir_in(parent: &Path) -> Result<PathBuf> {
    let dir = parent.join(DATA_DIR_NAME);
    create_dir(&dir)?;

    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        Config::default().save(&config_path)?;
    }
    Ok(dir)
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::ConfigIo {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn config_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(CONFIG_FILE_NAME))
}

pub fn log_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(LOG_FILE_NAME))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| Error::ConfigIo {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(io_err)?;
    temp_file.write_all(content.as_bytes()).map_err(io_err)?;
    temp_file.as_file().sync_all().map_err(io_err)?;
    temp_file.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
