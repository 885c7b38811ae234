use std::fs;
use std::path::{Path, PathBuf};

use super::core::IospConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".iosplint.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<IospConfig> {
    Ok(toml::from_str::<IospConfig>(contents)?)
}

/// Load an explicitly requested config file; errors are fatal here
pub fn load_config_from(path: &Path) -> Result<IospConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Cannot read configuration", path, e))?;
    parse_config(&contents).map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))
}

/// Try loading config from a specific path, `None` when absent or invalid
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<IospConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!(
                "Invalid config file {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.iosplint.toml`
pub fn discover_config(start: PathBuf) -> IospConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            IospConfig::default()
        })
}

pub fn load_config() -> IospConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            IospConfig::default()
        }
    }
}
