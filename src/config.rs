use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, ensure, Context};
use serde::Deserialize;

use crate::constants::{DEFAULT_API_URL, DEFAULT_PAGER_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};

/// The environment variable that points to the config file.
pub const CONFIG_ENV_VAR: &str = "WIGLE_BOT_CONFIG";

/// Bot config.
///
/// Passed to the components that need it at startup; nothing
/// reads configuration from global state.
#[derive(Deserialize, Clone)]
pub struct Config {
    /// The encoded API name & token pair, as displayed on the
    /// WiGLE account page. Sent as HTTP Basic authorization.
    pub wigle_api_key: String,

    /// The origin of the stats API, f.e. `https://api.wigle.net`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// The seconds after which the controls of a ranking are disabled.
    #[serde(default = "default_pager_timeout_secs")]
    pub pager_timeout_secs: u64,

    /// The total time allowed for a single API request in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_pager_timeout_secs() -> u64 {
    DEFAULT_PAGER_TIMEOUT_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Config {
    /// Read the config file listed in the `WIGLE_BOT_CONFIG` environment variable.
    pub fn read_from_env() -> anyhow::Result<Config> {
        let f = match std::env::var(CONFIG_ENV_VAR) {
            Ok(f) => PathBuf::from(f),
            Err(_) => bail!("cannot locate config: use the '{}' env var", CONFIG_ENV_VAR),
        };
        ensure!(f.is_file(), "config file {:?} does not exist", f);

        let f_str = std::fs::read_to_string(&f)
            .with_context(|| format!("failed to read config file {:?}", f))?;
        Config::from_toml(&f_str)
    }

    /// Parse and check a TOML config.
    pub fn from_toml(repr: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(repr).context("failed to parse config")?;
        check_config(&config)?;
        Ok(config)
    }

    pub fn pager_timeout(&self) -> Duration {
        Duration::from_secs(self.pager_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Try to catch configuration errors early.
fn check_config(config: &Config) -> anyhow::Result<()> {
    ensure!(
        !config.wigle_api_key.trim().is_empty(),
        "config: 'wigle_api_key' must not be empty!"
    );
    ensure!(
        config.pager_timeout_secs > 0,
        "config: 'pager_timeout_secs' must be larger than zero!"
    );
    ensure!(
        config.request_timeout_secs > 0,
        "config: 'request_timeout_secs' must be larger than zero!"
    );
    Ok(())
}
