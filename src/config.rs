use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::characters::CharacterSet;
use crate::error::{AppError, Result};
use crate::runtime::DEFAULT_TICK_RATE_MS;
use crate::session::{SessionConfig, DEFAULT_WINDOW_SIZE};

pub const MAX_WINDOW_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window_size: usize,
    pub digits_only: bool,
    pub tick_rate_ms: u64,
    pub auto_start: bool,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            digits_only: false,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            auto_start: true,
            seed: None,
        }
    }
}

impl Config {
    pub fn charset(&self) -> CharacterSet {
        if self.digits_only {
            CharacterSet::Digits
        } else {
            CharacterSet::Numpad
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            window_size: self.window_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size > MAX_WINDOW_SIZE {
            return Err(AppError::Config(format!(
                "window size {} exceeds maximum of {}",
                self.window_size, MAX_WINDOW_SIZE
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(AppError::Config("tick rate must be positive".into()));
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ok(None) when no config file exists yet
    pub fn try_load(&self) -> Result<Option<Config>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let cfg = serde_json::from_slice::<Config>(&bytes)?;
        cfg.validate()?;
        Ok(Some(cfg))
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Config::default(),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        cfg.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        assert_eq!(cfg, store.load());
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested").join("config.json"));
        let cfg = Config {
            window_size: 4,
            digits_only: true,
            tick_rate_ms: 250,
            auto_start: false,
            seed: Some(99),
        };
        store.save(&cfg).unwrap();
        assert_eq!(cfg, store.load());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_matches!(store.try_load(), Ok(None));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);

        assert_matches!(store.try_load(), Err(AppError::Serialization(_)));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "digits_only": true }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();

        assert!(cfg.digits_only);
        assert_eq!(cfg.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(cfg.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert!(cfg.auto_start);
    }

    #[test]
    fn oversized_window_is_rejected() {
        let cfg = Config {
            window_size: MAX_WINDOW_SIZE + 1,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(AppError::Config(_)));

        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        assert!(store.save(&cfg).is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let cfg = Config {
            tick_rate_ms: 0,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(AppError::Config(_)));
    }

    #[test]
    fn charset_follows_digits_flag() {
        let mut cfg = Config::default();
        assert_eq!(cfg.charset(), CharacterSet::Numpad);
        cfg.digits_only = true;
        assert_eq!(cfg.charset(), CharacterSet::Digits);
        assert_eq!(cfg.session_config().window_size, cfg.window_size);
    }
}
