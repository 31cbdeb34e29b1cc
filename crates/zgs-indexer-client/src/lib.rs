//! # zgs-indexer-client -- Typed Rust client for the 0G Storage indexer
//!
//! The indexer locates the storage nodes holding a file's segments and
//! reassembles them. This crate treats that as an opaque capability and
//! exposes exactly one operation: materialize the file identified by a
//! root hash at a local path.
//!
//! ## Architecture
//!
//! - [`Indexer`] is the seam consumers depend on. The API layer holds an
//!   `Arc<dyn Indexer>` so tests can substitute an in-process fake.
//! - [`IndexerClient`] is the production implementation, speaking to the
//!   indexer's HTTP gateway.
//!
//! ## Gateway Paths
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/file?root={rootHash}` | Stream file content |
//! | GET    | `/file/info/{rootHash}` | File metadata (used for verification) |

pub mod config;
pub mod error;
pub mod indexer;
pub mod types;

pub use config::{ConfigError, IndexerConfig, DEFAULT_INDEXER_RPC};
pub use error::IndexerError;
pub use indexer::{Indexer, IndexerClient};
pub use types::{FileInfo, RootHash};
