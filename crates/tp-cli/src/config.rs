//! Configuration loading and management.
//!
//! Settings merge in order: built-in defaults, the platform config file
//! (`<config dir>/tp/config.toml`), an explicit `--config` file, then
//! `TP_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timezone for emitted timestamps when `--timezone` is not given.
    pub timezone: String,

    /// Default email stamped on exported rows.
    pub email: Option<String>,

    /// Default projects JSON file used to resolve client names.
    pub projects_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
            email: None,
            projects_file: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TP_*)
        figment = figment.merge(Env::prefixed("TP_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tp.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timezone_is_nonempty() {
        assert!(!Config::default().timezone.is_empty());
    }

    #[test]
    fn test_explicit_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "timezone = \"Asia/Bangkok\"\nemail = \"me@example.com\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.timezone, "Asia/Bangkok");
        assert_eq!(config.email.as_deref(), Some("me@example.com"));
        assert_eq!(config.projects_file, None);
    }
}
