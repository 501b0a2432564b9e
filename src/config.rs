//! Config file discovery and loading.

use crate::error::{CliError, Result};
use directories::ProjectDirs;
use sheetkeeper_core::SheetConfig;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const CONFIG_FILE_NAME: &str = "sheetkeeper.toml";

pub(crate) fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "sheetkeeper")?;
    Some(proj.config_dir().join(CONFIG_FILE_NAME))
}

/// Load the sheet configuration.
///
/// An explicit `config_file` must exist. Otherwise the per-user file is read
/// when present (unless disabled) and defaults are used when it is not.
/// The result is always validated.
pub fn load_config(config_file: Option<&Path>, use_user_config: bool) -> Result<SheetConfig> {
    let path = match config_file {
        Some(path) => Some(path.to_path_buf()),
        None if use_user_config => user_config_path().filter(|p| p.is_file()),
        None => None,
    };

    let config = match path {
        Some(path) => read_config_file(&path)?,
        None => {
            tracing::debug!("no config file, using defaults");
            SheetConfig::default()
        }
    };
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<SheetConfig> {
    let meta = std::fs::metadata(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(CliError::ConfigTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max: MAX_CONFIG_FILE_BYTES,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loading config");
    parse_config(&content).map_err(|message| CliError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &str) -> std::result::Result<SheetConfig, String> {
    toml::from_str::<SheetConfig>(content).map_err(|err| err.to_string())
}
