//! Indexer capability and its HTTP gateway implementation.
//!
//! [`IndexerClient::download`] streams the gateway response into a unique
//! part-file next to the destination and renames it into place once the
//! payload is complete (and verified, when requested). Concurrent downloads
//! to the same destination therefore never interleave bytes; the last
//! completed rename wins.
//!
//! The part-file is a [`tempfile::TempPath`]: it is unlinked on every exit
//! that does not persist it, including a dropped download future.

use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::config::{ConfigError, IndexerConfig};
use crate::error::IndexerError;
use crate::types::{FileInfo, FileInfoEnvelope, RootHash};

/// Retrieval capability offered by a storage indexer.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Materialize the file identified by `root_hash` at `dest`.
    ///
    /// With `verify` set, the retrieved content is checked against the
    /// metadata the indexer publishes for the file before `dest` is written.
    async fn download(
        &self,
        root_hash: &RootHash,
        dest: &Path,
        verify: bool,
    ) -> Result<(), IndexerError>;
}

/// Client for the 0G Storage indexer gateway.
///
/// No request timeout is configured: retrieval of large files from the
/// storage network may legitimately take arbitrarily long.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IndexerClient {
    pub fn new(config: IndexerConfig) -> Result<Self, IndexerError> {
        if config.rpc_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                "INDEXER_RPC".to_string(),
                format!("{} cannot be used as a base URL", config.rpc_url),
            )
            .into());
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("zgs-indexer-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IndexerError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.rpc_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch file metadata from the gateway.
    ///
    /// Calls `GET {base_url}/file/info/{rootHash}`. Returns `None` on 404.
    pub async fn file_info(&self, root_hash: &RootHash) -> Result<Option<FileInfo>, IndexerError> {
        let endpoint = format!("GET /file/info/{root_hash}");
        let url = self.endpoint_url(&["file", "info", root_hash.as_str()]);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| IndexerError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(IndexerError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        resp.json::<FileInfoEnvelope>()
            .await
            .map(FileInfoEnvelope::into_inner)
            .map_err(|e| IndexerError::Deserialization {
                endpoint,
                source: e,
            })
    }

    /// Stream `GET {base_url}/file?root={rootHash}` into `file`, which is
    /// open on `part`.
    ///
    /// Returns the number of bytes written.
    async fn fetch_into(
        &self,
        root_hash: &RootHash,
        mut file: tokio::fs::File,
        part: &Path,
    ) -> Result<u64, IndexerError> {
        let endpoint = "GET /file";
        let mut url = self.endpoint_url(&["file"]);
        url.query_pairs_mut().append_pair("root", root_hash.as_str());

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| IndexerError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(IndexerError::Retrieval("file not found".into()));
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(IndexerError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let mut written: u64 = 0;
        let mut body = resp.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| IndexerError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|e| IndexerError::io(part, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| IndexerError::io(part, e))?;
        file.sync_all().await.map_err(|e| IndexerError::io(part, e))?;

        Ok(written)
    }

    /// Build `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl Indexer for IndexerClient {
    async fn download(
        &self,
        root_hash: &RootHash,
        dest: &Path,
        verify: bool,
    ) -> Result<(), IndexerError> {
        let expected = if verify {
            let info = self.file_info(root_hash).await?.ok_or_else(|| {
                IndexerError::Retrieval("file not found".into())
            })?;
            check_metadata(root_hash, &info)?;
            info.size()
        } else {
            None
        };

        let (file, part) = part_file(dest)?;
        tracing::debug!(
            root_hash = %root_hash,
            part = %part.display(),
            "streaming file from indexer"
        );

        let written = self.fetch_into(root_hash, file, &part).await?;
        if let Some(size) = expected {
            if size != written {
                return Err(IndexerError::Verification(format!(
                    "expected {size} bytes for {root_hash}, received {written}"
                )));
            }
        }

        part.persist(dest).map_err(|e| IndexerError::io(dest, e.error))?;

        tracing::info!(
            root_hash = %root_hash,
            bytes = written,
            verified = verify,
            "file retrieved from indexer"
        );
        Ok(())
    }
}

/// Reject metadata that is incomplete or contradicts the requested file.
fn check_metadata(root_hash: &RootHash, info: &FileInfo) -> Result<(), IndexerError> {
    if info.tx.is_none() || info.finalized.is_none() {
        return Err(IndexerError::Verification(format!(
            "indexer returned no metadata for {root_hash}"
        )));
    }
    if info.finalized == Some(false) {
        return Err(IndexerError::Verification(format!(
            "file {root_hash} is not finalized"
        )));
    }
    if info.pruned == Some(true) {
        return Err(IndexerError::Verification(format!(
            "file {root_hash} has been pruned"
        )));
    }
    if let Some(reported) = info.data_merkle_root() {
        if !reported.eq_ignore_ascii_case(root_hash.as_str()) {
            return Err(IndexerError::Verification(format!(
                "indexer reported merkle root {reported} for {root_hash}"
            )));
        }
    }
    Ok(())
}

/// Create a unique hidden sibling of `dest` (`.{name}.XXXXXX.part`) and open
/// it for writing.
fn part_file(dest: &Path) -> Result<(tokio::fs::File, TempPath), IndexerError> {
    let name = dest.file_name().ok_or_else(|| {
        IndexerError::io(
            dest,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "destination has no file name",
            ),
        )
    })?;
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let prefix = format!(".{}.", name.to_string_lossy());
    let (file, path) = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|e| IndexerError::io(dir, e))?
        .into_parts();
    Ok((tokio::fs::File::from_std(file), path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileTx;

    fn client(base: &str) -> IndexerClient {
        IndexerClient::new(IndexerConfig::new(base.parse().unwrap())).unwrap()
    }

    #[test]
    fn endpoint_url_appends_to_base_path() {
        let c = client("http://127.0.0.1:5678/indexer");
        let url = c.endpoint_url(&["file", "info", "0xabc"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:5678/indexer/file/info/0xabc");
    }

    #[test]
    fn endpoint_url_handles_trailing_slash() {
        let c = client("http://127.0.0.1:5678/");
        let url = c.endpoint_url(&["file"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:5678/file");
    }

    #[test]
    fn endpoint_url_encodes_segments() {
        let c = client("http://127.0.0.1:5678");
        let url = c.endpoint_url(&["file", "info", "a/b c"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:5678/file/info/a%2Fb%20c");
    }

    #[tokio::test]
    async fn part_file_is_unique_hidden_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("0xabc");
        let (_fa, a) = part_file(&dest).unwrap();
        let (_fb, b) = part_file(&dest).unwrap();
        assert_ne!(a.to_path_buf(), b.to_path_buf());
        assert_eq!(a.parent(), Some(dir.path()));
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".0xabc."), "got: {name}");
        assert!(name.ends_with(".part"), "got: {name}");
    }

    #[tokio::test]
    async fn part_file_is_removed_when_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let (file, part) = part_file(&dir.path().join("0xabc")).unwrap();
        let path = part.to_path_buf();
        assert!(path.exists());
        drop(file);
        drop(part);
        assert!(!path.exists());
    }

    #[test]
    fn part_file_rejects_destination_without_name() {
        assert!(part_file(Path::new("downloads/..")).is_err());
    }

    #[test]
    fn metadata_check_accepts_matching_root_case_insensitively() {
        let info = FileInfo {
            tx: Some(FileTx {
                data_merkle_root: Some("0xABC".into()),
                ..FileTx::default()
            }),
            finalized: Some(true),
            ..FileInfo::default()
        };
        assert!(check_metadata(&RootHash::new("0xabc"), &info).is_ok());
    }

    #[test]
    fn metadata_check_rejects_unfinalized_file() {
        let info = FileInfo {
            tx: Some(FileTx::default()),
            finalized: Some(false),
            ..FileInfo::default()
        };
        let err = check_metadata(&RootHash::new("0xabc"), &info).unwrap_err();
        assert!(matches!(err, IndexerError::Verification(_)));
    }

    #[test]
    fn metadata_check_rejects_mismatched_root() {
        let info = FileInfo {
            tx: Some(FileTx {
                data_merkle_root: Some("0xdef".into()),
                ..FileTx::default()
            }),
            finalized: Some(true),
            ..FileInfo::default()
        };
        let err = check_metadata(&RootHash::new("0xabc"), &info).unwrap_err();
        assert!(err.to_string().contains("0xdef"), "got: {err}");
    }

    #[test]
    fn metadata_check_rejects_empty_metadata() {
        let err = check_metadata(&RootHash::new("0xabc"), &FileInfo::default()).unwrap_err();
        match err {
            IndexerError::Verification(msg) => {
                assert!(msg.contains("no metadata"), "got: {msg}")
            }
            other => panic!("expected Verification, got: {other:?}"),
        }
    }

    #[test]
    fn metadata_check_requires_finalized_flag() {
        let info = FileInfo {
            tx: Some(FileTx::default()),
            ..FileInfo::default()
        };
        assert!(check_metadata(&RootHash::new("0xabc"), &info).is_err());
    }

    #[test]
    fn rejects_cannot_be_a_base_url() {
        let config = IndexerConfig::new("mailto:ops@example.com".parse().unwrap());
        assert!(matches!(
            IndexerClient::new(config),
            Err(IndexerError::Config(_))
        ));
    }
}
