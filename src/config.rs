//! Configuration loading: `Config::load`/`save` over nested sub-configs
//! with `Default` impls, covering the `sol.*` / `consumer.*` / `mysql.*`
//! keys the indexer needs.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sol: SolConfig,
    pub consumer: ConsumerConfig,
    #[serde(default)]
    pub mysql: MysqlConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolConfig {
    /// Ordered list of HTTP node endpoints. Round-robin.
    pub node_url: Vec<String>,
    /// Streaming socket URL.
    pub ws_url: String,
    /// Starting slot for recovery. `0` means "use lowest Failed".
    #[serde(default)]
    pub start_block: u64,
}

impl Default for SolConfig {
    fn default() -> Self {
        SolConfig {
            node_url: vec!["https://api.mainnet-beta.solana.com".to_string()],
            ws_url: "wss://api.mainnet-beta.solana.com".to_string(),
            start_block: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// Number of block workers.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    4
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        ConsumerConfig {
            concurrency: default_concurrency(),
        }
    }
}

/// DB connection params, consumed opaquely — the indexer's only wired-up
/// repository backend is SQLite, these fields are accepted so config
/// files from the original deployment still parse.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MysqlConfig {
    #[serde(default)]
    pub dsn: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sol.node_url.is_empty() {
            return Err(ConfigError::Invalid("sol.node_url must not be empty".into()));
        }
        if self.consumer.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "consumer.concurrency must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sol: SolConfig::default(),
            consumer: ConsumerConfig::default(),
            mysql: MysqlConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_node_url_list() {
        let mut cfg = Config::default();
        cfg.sol.node_url.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_concurrency() {
        let mut cfg = Config::default();
        cfg.consumer.concurrency = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = Config::default();
        let raw = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.sol.node_url, cfg.sol.node_url);
    }
}
