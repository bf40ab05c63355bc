//! # Configuration
//!
//! Optional TOML configuration for the `stego` front end. Every section and
//! field has a default, so an empty file (or no file at all) is valid.
//!
//! ```toml
//! [output]
//! directory = "/tmp/stego"
//! file_name = "encoded_image.png"
//!
//! [codec]
//! framing = "terminated"
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::processing::Framing;

/// Environment variable that overrides where encoded images are written.
pub const OUTPUT_DIR_ENV: &str = "LSB_STEGO_OUTPUT_DIR";

/// File name used when only an output directory is known.
pub const DEFAULT_OUTPUT_FILE: &str = "encoded_image.png";

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Complete front-end configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub output: OutputConfig,
    pub codec: CodecConfig,
    pub logging: LoggingConfig,
}

/// Where encoded images go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Target directory; falls back to the environment and then the desktop
    pub directory: Option<PathBuf>,
    /// File name inside the target directory
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub framing: Framing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level, `Info` if the configured value is unknown.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl OutputConfig {
    /// Resolve the path an encoded image should be written to.
    ///
    /// Order: configured directory, then [`OUTPUT_DIR_ENV`], then the user's
    /// desktop, then the current directory.
    pub fn resolve_path(&self) -> PathBuf {
        let env_dir = env::var_os(OUTPUT_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_path_from(env_dir, desktop_dir())
    }

    fn resolve_path_from(&self, env_dir: Option<PathBuf>, desktop: Option<PathBuf>) -> PathBuf {
        let directory = self
            .directory
            .clone()
            .or(env_dir)
            .or(desktop)
            .unwrap_or_else(|| PathBuf::from("."));
        directory.join(&self.file_name)
    }
}

/// `~/Desktop`, if it exists.
fn desktop_dir() -> Option<PathBuf> {
    let home = env::var_os("HOME").or_else(|| env::var_os("USERPROFILE"))?;
    let desktop = PathBuf::from(home).join("Desktop");
    desktop.is_dir().then_some(desktop)
}
