//! Configuration types for fieldcast.
//!
//! [`Config::load`] layers `~/.config/fieldcast/config.toml` and `FIELDCAST_*`
//! environment variables over the built-in defaults; [`Config::load_from`]
//! does the same with an explicit file that must exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in tests).

use crate::grammar::PhoneFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[phone]
country_code       = "7"
subscriber_pattern = '9\d{9}'
subscriber_len     = 10

[output]
pretty = false
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/fieldcast/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub phone: PhoneConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[phone]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PhoneConfig {
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_subscriber_pattern")]
    pub subscriber_pattern: String,
    #[serde(default = "default_subscriber_len")]
    pub subscriber_len: usize,
}

fn default_country_code() -> String { PhoneFormat::DEFAULT_COUNTRY_CODE.to_string() }
fn default_subscriber_pattern() -> String { PhoneFormat::DEFAULT_SUBSCRIBER_PATTERN.to_string() }
fn default_subscriber_len() -> usize { PhoneFormat::DEFAULT_SUBSCRIBER_LEN }

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
            subscriber_pattern: default_subscriber_pattern(),
            subscriber_len: default_subscriber_len(),
        }
    }
}

impl PhoneConfig {
    /// Compile the configured pattern into a [`PhoneFormat`].
    pub fn format(&self) -> Result<PhoneFormat, regex::Error> {
        PhoneFormat::new(&self.country_code, &self.subscriber_pattern, self.subscriber_len)
    }
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/fieldcast/config.toml` (if present) and the
    /// environment, layered on top of the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::layered(&config_path(), false)
    }

    /// Like [`Config::load`] but reads the user layer from `path`, which must
    /// exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(path, true)
    }

    fn layered(path: &Path, required: bool) -> anyhow::Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .add_source(config::Environment::with_prefix("FIELDCAST").separator("__"))
            .build()?
            .try_deserialize()?;
        tracing::debug!(path = %path.display(), required, "config loaded");
        Ok(config)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("fieldcast")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
