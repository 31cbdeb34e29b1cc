//! Indexer client configuration.
//!
//! Points at the public 0G Storage testnet indexer by default. Override via
//! the `INDEXER_RPC` environment variable or explicit construction for
//! staging/testing.

use url::Url;

/// Public 0G Storage testnet indexer (standard mode).
pub const DEFAULT_INDEXER_RPC: &str = "https://indexer-storage-testnet-standard.0g.ai";

/// Configuration for connecting to the storage indexer.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Base URL of the indexer gateway.
    pub rpc_url: Url,
}

impl IndexerConfig {
    pub fn new(rpc_url: Url) -> Self {
        Self { rpc_url }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `INDEXER_RPC` (default: [`DEFAULT_INDEXER_RPC`])
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// An empty value is treated the same as an absent one.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup("INDEXER_RPC")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_INDEXER_RPC.to_string());
        let rpc_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidUrl("INDEXER_RPC".to_string(), e.to_string()))?;
        if rpc_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                "INDEXER_RPC".to_string(),
                format!("{raw} cannot be used as a base URL"),
            ));
        }
        Ok(Self { rpc_url })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rpc_when_var_absent() {
        let cfg = IndexerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(
            cfg.rpc_url.as_str(),
            "https://indexer-storage-testnet-standard.0g.ai/"
        );
    }

    #[test]
    fn empty_var_falls_back_to_default() {
        let cfg = IndexerConfig::from_lookup(|_| Some(String::new())).unwrap();
        assert_eq!(cfg.rpc_url.host_str(), Some("indexer-storage-testnet-standard.0g.ai"));
    }

    #[test]
    fn explicit_rpc_overrides_default() {
        let cfg = IndexerConfig::from_lookup(|key| {
            (key == "INDEXER_RPC").then(|| "http://127.0.0.1:5678".to_string())
        })
        .unwrap();
        assert_eq!(cfg.rpc_url.as_str(), "http://127.0.0.1:5678/");
    }

    #[test]
    fn rejects_invalid_url() {
        let result = IndexerConfig::from_lookup(|_| Some("not a url".to_string()));
        match result {
            Err(ConfigError::InvalidUrl(var, _)) => assert_eq!(var, "INDEXER_RPC"),
            other => panic!("expected InvalidUrl, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_cannot_be_a_base_url() {
        let result = IndexerConfig::from_lookup(|_| Some("mailto:ops@example.com".to_string()));
        assert!(result.is_err());
    }
}
