//! `langfix.toml` loading and merging with command-line flags.
//!
//! ```toml
//! dir = "common/src/main/resources/assets/catchrate-display/lang"
//! reference_locale = "en_us"
//! extension = "json"
//! prefix = "catchrate.ball."
//! ```
//!
//! Every field is optional. A relative `dir` is resolved against the
//! directory holding the config file. Flags win over the file, the file
//! wins over the defaults.

use std::path::{Path, PathBuf};

use langfix::{CATCHRATE_PREFIX, DEFAULT_EXTENSION, DEFAULT_REFERENCE_LOCALE};
use serde::Deserialize;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "langfix.toml";

/// Contents of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub dir: Option<PathBuf>,
    pub reference_locale: Option<String>,
    pub extension: Option<String>,
    pub prefix: Option<String>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub dir: Option<PathBuf>,
    pub reference_locale: Option<String>,
    pub extension: Option<String>,
    pub prefix: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dir: PathBuf,
    pub reference_locale: String,
    pub extension: String,
    pub prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dir: PathBuf::from("."),
            reference_locale: DEFAULT_REFERENCE_LOCALE.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            prefix: CATCHRATE_PREFIX.to_string(),
        }
    }
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Self {
        let defaults = Settings::default();
        Settings {
            dir: overrides.dir.or(file.dir).unwrap_or(defaults.dir),
            reference_locale: overrides
                .reference_locale
                .or(file.reference_locale)
                .unwrap_or(defaults.reference_locale),
            extension: overrides
                .extension
                .or(file.extension)
                .unwrap_or(defaults.extension),
            prefix: overrides.prefix.or(file.prefix).unwrap_or(defaults.prefix),
        }
    }
}

/// Parses config text. `base` anchors a relative `dir`.
pub fn parse_config(content: &str, base: Option<&Path>) -> Result<FileConfig, String> {
    let mut config: FileConfig =
        toml::from_str(content).map_err(|e| format!("Invalid config: {}", e))?;
    if let Some(base) = base {
        config.dir = config
            .dir
            .map(|dir| if dir.is_relative() { base.join(dir) } else { dir });
    }
    Ok(config)
}

/// Loads `explicit`, or `langfix.toml` from the working directory if it
/// exists, or nothing.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, String> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(format!("Config file does not exist: {}", path.display()));
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.is_file() {
                return Ok(FileConfig::default());
            }
            path
        }
    };

    debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_config(&content, path.parent())
        .map_err(|e| format!("{} ({})", e, path.display()))
}
