//! # Application Configuration
//!
//! Built once at process start from the environment and carried in
//! [`AppState`](crate::state::AppState). Nothing reads the environment after
//! startup.
//!
//! Variables:
//! - `INDEXER_RPC`: indexer gateway URL (see [`IndexerConfig`])
//! - `PRIVATE_KEY`: required; startup fails without it
//! - `PORT`: listen port (default: 3000)
//! - `DOWNLOADS_DIR`: scratch directory (default: `downloads`)

use std::path::PathBuf;

use zeroize::Zeroizing;
use zgs_indexer_client::{IndexerConfig, RootHash};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DOWNLOADS_DIR: &str = "downloads";

/// Signing key for the storage network.
///
/// Validated at startup and held for the life of the process. The download
/// route does not use it. Zeroed on drop; `Debug` is redacted.
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<String>);

impl PrivateKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    pub fn expose_secret(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub indexer: IndexerConfig,
    pub private_key: PrivateKey,
    pub port: u16,
    /// Directory holding one scratch file per requested root hash.
    pub downloads_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as absent. An unparseable `PORT` falls back to
    /// [`DEFAULT_PORT`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let private_key = var("PRIVATE_KEY")
            .map(PrivateKey::new)
            .ok_or(ConfigError::MissingPrivateKey)?;

        let indexer = IndexerConfig::from_lookup(&lookup)?;

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let downloads_dir = var("DOWNLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOADS_DIR));

        Ok(Self {
            indexer,
            private_key,
            port,
            downloads_dir,
        })
    }

    /// Scratch location for `root_hash`: `{downloads_dir}/{root_hash}`.
    ///
    /// The root hash is joined as text, so leading separators do not escape
    /// the downloads directory the way an absolute path join would.
    pub fn scratch_path(&self, root_hash: &RootHash) -> PathBuf {
        self.downloads_dir
            .join(root_hash.as_str().trim_start_matches('/'))
    }
}

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Private key not found in environment variables")]
    MissingPrivateKey,
    #[error(transparent)]
    Indexer(#[from] zgs_indexer_client::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_applied_when_only_key_present() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PRIVATE_KEY", "0xdeadbeef")])).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.downloads_dir, PathBuf::from("downloads"));
        assert_eq!(
            cfg.indexer.rpc_url.as_str(),
            "https://indexer-storage-testnet-standard.0g.ai/"
        );
        assert_eq!(cfg.private_key.expose_secret(), "0xdeadbeef");
    }

    #[test]
    fn missing_private_key_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "8080")]));
        assert!(matches!(result, Err(ConfigError::MissingPrivateKey)));
    }

    #[test]
    fn empty_private_key_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[("PRIVATE_KEY", "")]));
        assert!(matches!(result, Err(ConfigError::MissingPrivateKey)));
    }

    #[test]
    fn missing_key_message_matches_startup_log() {
        assert_eq!(
            ConfigError::MissingPrivateKey.to_string(),
            "Private key not found in environment variables"
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("PRIVATE_KEY", "k"),
            ("PORT", "8081"),
            ("INDEXER_RPC", "http://127.0.0.1:5678"),
            ("DOWNLOADS_DIR", "/var/tmp/zgs"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.indexer.rpc_url.as_str(), "http://127.0.0.1:5678/");
        assert_eq!(cfg.downloads_dir, PathBuf::from("/var/tmp/zgs"));
    }

    #[test]
    fn unparseable_port_falls_back_to_default() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PRIVATE_KEY", "k"), ("PORT", "http")]))
            .unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_indexer_url_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("PRIVATE_KEY", "k"),
            ("INDEXER_RPC", "::not a url::"),
        ]));
        assert!(matches!(result, Err(ConfigError::Indexer(_))));
    }

    #[test]
    fn debug_redacts_private_key() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PRIVATE_KEY", "super-secret-key")]))
            .unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret-key"), "got: {rendered}");
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn scratch_path_is_named_by_root_hash() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PRIVATE_KEY", "k")])).unwrap();
        assert_eq!(
            cfg.scratch_path(&RootHash::new("0xabc123")),
            Path::new("downloads/0xabc123")
        );
    }

    #[test]
    fn scratch_path_keeps_leading_slash_inside_downloads() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PRIVATE_KEY", "k")])).unwrap();
        assert_eq!(
            cfg.scratch_path(&RootHash::new("/etc/passwd")),
            Path::new("downloads/etc/passwd")
        );
    }
}
