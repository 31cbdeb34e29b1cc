//! # API Route Modules
//!
//! - `download`: `GET /download/{rootHash}`: retrieve a file from 0G Storage
//!   through the indexer and stream it back as an attachment.

pub mod download;
