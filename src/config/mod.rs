//! Configuration loading and persistence.

pub mod model;
mod nickname;

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub use model::AppConfig;

/// `$XDG_CONFIG_HOME/shellchat/config.toml`, or the current directory when
/// the platform has no config dir.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shellchat")
        .join("config.toml")
}

/// Load the config file; an absent file just means defaults.
pub fn load_config() -> Result<AppConfig> {
    let path = config_path();
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("could not read {}", path.display()));
        }
    };
    toml::from_str(&contents).with_context(|| format!("could not parse {}", path.display()))
}

/// Write the config back out, creating the directory on first run.
pub fn save_config(config: &AppConfig) -> Result<()> {
    let path = config_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("could not create {}", dir.display()))?;
    }
    let rendered = toml::to_string_pretty(config).context("could not serialize config")?;
    fs::write(&path, rendered).with_context(|| format!("could not write {}", path.display()))
}
