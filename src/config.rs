//! Runtime settings.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `HOLDINGS_`-prefixed environment variables (`HOLDINGS_LOG_LEVEL`,
//!    `HOLDINGS_LOCATIONS_PATH`, `HOLDINGS_CHECK_IN_CARDS_PATH`)
//!
//! ```toml
//! log_level = "info"
//! locations_path = "/etc/holdings/locations.json"
//! check_in_cards_path = "/var/lib/holdings/check_in_cards.json"
//! ```

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "HOLDINGS";

/// Settings for the holdings parser binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// JSON locations document
    pub locations_path: Option<PathBuf>,
    /// JSON check-in card document
    pub check_in_cards_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: default_log_level(),
            locations_path: None,
            check_in_cards_path: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `file` is given but cannot be read or
    /// parsed, or if a source holds a value of the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().set_default("log_level", default_log_level())?;
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder.add_source(env).build()?.try_deserialize()
    }
}
