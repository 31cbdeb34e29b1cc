//! # Shared Types
//!
//! Identifier and metadata types exchanged with the indexer gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content-addressed identifier of a file stored in 0G Storage.
///
/// Carried verbatim. No format check is applied locally; the indexer is the
/// authority on which root hashes resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootHash(String);

impl RootHash {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RootHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RootHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for RootHash {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for RootHash {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// File metadata as reported by `GET /file/info/{rootHash}`.
///
/// Every field is optional and unknown fields are ignored, so the client
/// keeps working when the gateway adds or drops fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    #[serde(default)]
    pub tx: Option<FileTx>,
    /// Whether every segment of the file has been stored and proven.
    #[serde(default)]
    pub finalized: Option<bool>,
    #[serde(default)]
    pub pruned: Option<bool>,
    #[serde(default)]
    pub uploaded_seg_num: Option<u64>,
}

impl FileInfo {
    /// File size in bytes, if the gateway reported one.
    pub fn size(&self) -> Option<u64> {
        self.tx.as_ref().and_then(|tx| tx.size)
    }

    pub fn data_merkle_root(&self) -> Option<&str> {
        self.tx.as_ref().and_then(|tx| tx.data_merkle_root.as_deref())
    }
}

/// Submission transaction backing a stored file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTx {
    #[serde(default)]
    pub seq: Option<u64>,
    #[serde(default)]
    pub data_merkle_root: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// The gateway may return the metadata bare or wrapped in a `data` envelope.
///
/// An envelope whose `data` is `null` is how the gateway reports an unknown
/// file alongside a `200`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FileInfoEnvelope {
    Empty { data: () },
    Wrapped { data: FileInfo },
    Bare(FileInfo),
}

impl FileInfoEnvelope {
    pub(crate) fn into_inner(self) -> Option<FileInfo> {
        match self {
            Self::Empty { .. } => None,
            Self::Wrapped { data } => Some(data),
            Self::Bare(info) => Some(info),
        }
    }
}
