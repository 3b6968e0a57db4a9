//! Rotation settings.
//!
//! Defaults reproduce the classic slider setup: every `img` inside `.image-slider`, toggling
//! the `active` class every four seconds. With the `config` feature the same settings can
//! be read from a TOML file:
//!
//! ```toml
//! interval_ms = 2500
//! selector = ".hero img"
//! active_class = "visible"
//! ```

use crate::error::{Result, RotatorError};
use crate::host::Selector;
use crate::rotator::{DEFAULT_MARKER, DEFAULT_PERIOD};
use std::time::Duration;

/// Selector used when none is configured.
pub const DEFAULT_SELECTOR: &str = ".image-slider img";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct RotatorConfig {
    /// Milliseconds between transitions
    pub interval_ms: u64,
    /// Selector picking the banner elements
    pub selector: String,
    /// Class marking the active banner
    pub active_class: String,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_PERIOD.as_millis() as u64,
            selector: DEFAULT_SELECTOR.to_string(),
            active_class: DEFAULT_MARKER.to_string(),
        }
    }
}

impl RotatorConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Parse the configured selector.
    pub fn parsed_selector(&self) -> Result<Selector> {
        Selector::parse(&self.selector)
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(RotatorError::invalid_argument(
                "interval_ms must be greater than zero",
            ));
        }
        if self.active_class.is_empty() || self.active_class.chars().any(char::is_whitespace) {
            return Err(RotatorError::invalid_argument(format!(
                "active class '{}' must be a single non-empty class name",
                self.active_class
            )));
        }
        self.parsed_selector()?;
        Ok(())
    }
}

#[cfg(feature = "config")]
mod file {
    use super::RotatorConfig;
    use crate::error::{Result, RotatorError};
    use std::path::{Path, PathBuf};

    impl RotatorConfig {
        /// Parse settings without validating them, so later overrides can still fix a bad
        /// field. Call [`RotatorConfig::validate`] once the final values are known.
        pub fn from_toml_str(contents: &str) -> Result<Self> {
            toml::from_str(contents).map_err(|err| RotatorError::config(err.to_string()))
        }

        pub fn load(path: &Path) -> Result<Self> {
            let contents = std::fs::read_to_string(path).map_err(|err| {
                RotatorError::io(format!("reading config {}", path.display()), err)
            })?;
            Self::from_toml_str(&contents)
        }

        /// `<config dir>/banner-rotator/config.toml`, when the platform has a config dir.
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("banner-rotator").join("config.toml"))
        }

        /// Load the default config file if present, else fall back to defaults.
        pub fn load_or_default() -> Result<Self> {
            match Self::default_path() {
                Some(path) if path.is_file() => {
                    log::debug!("loading configuration from {}", path.display());
                    Self::load(&path)
                }
                _ => Ok(Self::default()),
            }
        }
    }
}
