//! File logging for the TUI.
//!
//! stdout belongs to the alternate screen, so events go to a log file.
//! `RUST_LOG` controls the filter (default `numpad=info`).

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

pub const DEFAULT_LOG_FILTER: &str = "numpad=info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber writing to `path`.
///
/// A subscriber that is already installed is left in place.
pub fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("numpad.log");

        init_logging(&path).unwrap();
        assert!(path.exists());

        // second init is harmless
        init_logging(&path).unwrap();
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
