//! Global eventfinder configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{FinderError, FinderResult};

static DEFAULT_DATA_DIR: &str = "~/.eventfinder";
static DEFAULT_API_BASE_URL: &str = "https://app.ticketmaster.com";
static DEFAULT_LOCALE: &str = "*";
const DEFAULT_PAGE_SIZE: u32 = 200;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

const STORE_FILE: &str = "store.json";
const NOTIFICATIONS_FILE: &str = "notifications.json";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

/// Configuration at ~/.config/eventfinder/config.toml
///
/// Every field can be overridden with an `EVENTFINDER_`-prefixed environment
/// variable, e.g. `EVENTFINDER_API_KEY`.
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    pub api_key: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// How often the map watcher re-reads the store.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            api_key: None,
            api_base_url: default_api_base_url(),
            locale: default_locale(),
            page_size: default_page_size(),
            data_dir: default_data_dir(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl FinderConfig {
    /// Load the global config, writing a commented-out default on first run.
    pub fn load() -> FinderResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> FinderResult<Self> {
        let config: FinderConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EVENTFINDER").try_parsing(true))
            .build()
            .map_err(|e| FinderError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FinderError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn config_path() -> FinderResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FinderError::Config("Could not determine config directory".into()))?
            .join("eventfinder");

        Ok(config_dir.join("config.toml"))
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_path().join(STORE_FILE)
    }

    pub fn notifications_path(&self) -> PathBuf {
        self.data_path().join(NOTIFICATIONS_FILE)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn api_key(&self) -> FinderResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                FinderError::Config(format!(
                    "No Ticketmaster API key configured.\n\n\
                    Set api_key in {} or export EVENTFINDER_API_KEY",
                    Self::config_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "config.toml".to_string())
                ))
            })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> FinderResult<()> {
        let contents = format!(
            "\
# eventfinder configuration

# Ticketmaster Discovery API key (or set EVENTFINDER_API_KEY):
# api_key = \"your-key\"

# Where saved events, search results and reminders live:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Search parameters:
# locale = \"{DEFAULT_LOCALE}\"
# page_size = {DEFAULT_PAGE_SIZE}

# Seconds between store checks in `eventfinder map --watch`:
# poll_interval_secs = {DEFAULT_POLL_INTERVAL_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FinderError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| FinderError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
