use hellsharp::context::{DEFAULT_CAPACITY, MAX_CAPACITY};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    #[error("{0}")]
    Toml(#[from] toml::de::Error),
    #[error("capacity {0} exceeds the maximum of {max}", max = MAX_CAPACITY)]
    Capacity(usize),
}

/// How run results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from ~/.hellsharp.toml
///
/// ```text
/// capacity = 20
/// trace = false
/// format = "text"      # or "json"
/// log_level = "warn"   # HELLSHARP_LOG takes precedence
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) capacity: usize,
    pub(crate) trace: bool,
    pub(crate) format: OutputFormat,
    pub(crate) log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capacity: DEFAULT_CAPACITY,
            trace: false,
            format: OutputFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// $HELLSHARP_CONFIG, else ~/.hellsharp.toml
pub(crate) fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("HELLSHARP_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs_home().map(|h| h.join(".hellsharp.toml"))
}

pub(crate) fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    if config.capacity > MAX_CAPACITY {
        return Err(ConfigError::Capacity(config.capacity));
    }
    Ok(config)
}

/// Load the config file if it exists. A broken file is reported and
/// ignored; it never stops a run.
pub(crate) fn load_config() -> Config {
    let path = match config_path() {
        Some(p) => p,
        None => return Config::default(),
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Config::default(),
    };

    match parse_config(&content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}: {}", path.display(), e);
            Config::default()
        }
    }
}
