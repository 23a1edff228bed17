use crate::error::{self, ConfigError};
use anyhow::{anyhow, Result};
use serde_derive::Deserialize;
use std::fmt;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_url() -> String {
    "https://eservice.towngas.com".to_string()
}

#[derive(Deserialize, Clone)]
pub struct TownGasConfig {
    /// Display label of the sensor
    pub name: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_url")]
    pub url: String,
}

impl fmt::Debug for TownGasConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TownGasConfig")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"********")
            .field("timeout", &self.timeout)
            .field("url", &self.url)
            .finish()
    }
}

impl TownGasConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::invalid("timeout", "must be greater than zero"));
        }
        Ok(())
    }
}

pub(crate) fn load_towngas_config() -> error::Result<TownGasConfig> {
    let config = envy::prefixed("TOWNGAS_")
        .from_env::<TownGasConfig>()
        .map_err(|err| ConfigError::env_parse(format!("Failed to load TownGasConfig: {}", err)))?;
    config.validate()?;
    Ok(config)
}

fn default_interval_sec() -> u64 {
    300
}

fn default_min_update_interval_sec() -> u64 {
    3600
}

fn default_history_limit() -> usize {
    120
}

fn default_task_timeout_sec() -> u64 {
    300
}

#[derive(Deserialize, Debug)]
pub struct CollectorConfig {
    // how often the scheduler polls the collector
    #[serde(default = "default_interval_sec")]
    pub interval_sec: u64,
    // polls within this window of the last successful refresh are skipped
    #[serde(default = "default_min_update_interval_sec")]
    pub min_update_interval_sec: u64,
    // maximum number of readings and bills kept in memory
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_task_timeout_sec")]
    pub task_timeout_sec: u64,
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::invalid(
                "history_limit",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

pub fn load_collector_config() -> error::Result<CollectorConfig> {
    let config = envy::prefixed("COLLECTOR_")
        .from_env::<CollectorConfig>()
        .map_err(|err| ConfigError::env_parse(format!("Failed to load CollectorConfig: {}", err)))?;
    config.validate()?;
    Ok(config)
}

#[derive(Deserialize, Debug)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

pub fn load_influx_config() -> Result<InfluxConfig> {
    match envy::prefixed("INFLUXDB_").from_env::<InfluxConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load InfluxConfig: {}", err)),
    }
}
