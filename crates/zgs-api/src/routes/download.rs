//! # Download Route
//!
//! `GET /download/{rootHash}` asks the indexer to materialize the file in the
//! scratch directory, then streams it back as an attachment.
//!
//! The scratch file is named by root hash and is not removed after sending.
//! Concurrent requests for the same root hash share that path without
//! coordination; the indexer client's rename-into-place keeps each reader
//! on a whole file.

use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures_util::TryStreamExt;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use utoipa::ToSchema;
use zgs_indexer_client::RootHash;

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/download/:root_hash", get(download_file))
}

/// Raw file content, documented as `string` / `binary`.
#[derive(ToSchema)]
#[schema(value_type = String, format = Binary)]
pub struct BinaryFile(pub Vec<u8>);

/// Download a file
///
/// Download a file from 0G Storage using its root hash
#[utoipa::path(
    get,
    path = "/download/{rootHash}",
    params(
        ("rootHash" = String, Path, description = "The root hash of the file to download"),
    ),
    responses(
        (status = 200, description = "File downloaded successfully",
            content_type = "application/octet-stream", body = BinaryFile),
        (status = 500, description = "Server error", body = crate::error::ErrorBody),
    ),
    tag = "storage"
)]
pub async fn download_file(
    State(state): State<AppState>,
    Path(root_hash): Path<String>,
) -> Result<Response, AppError> {
    let root_hash = RootHash::new(root_hash);
    let output_path = state.config.scratch_path(&root_hash);

    if let Some(dir) = output_path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AppError::Internal(format!("failed to create {}: {e}", dir.display()))
        })?;
    }

    tracing::info!(root_hash = %root_hash, path = %output_path.display(), "download requested");
    state
        .indexer
        .download(&root_hash, &output_path, true)
        .await?;

    send_file(&output_path, &root_hash).await
}

/// Open `path` and build a streaming attachment response.
///
/// Failures here happen before any header is written and become a 500.
async fn send_file(path: &FsPath, root_hash: &RootHash) -> Result<Response, AppError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(AppError::SendFile)?;
    let len = file.metadata().await.map_err(AppError::SendFile)?.len();
    attachment(file, len, root_hash)
}

/// Stream `reader` as an `application/octet-stream` attachment named after
/// `root_hash`.
///
/// Read errors after the response is committed can only be logged; the
/// body stream errors out and hyper aborts the connection.
fn attachment<R>(reader: R, len: u64, root_hash: &RootHash) -> Result<Response, AppError>
where
    R: AsyncRead + Send + 'static,
{
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{root_hash}\""))
        .map_err(|e| {
            AppError::Internal(format!("cannot encode filename \"{root_hash}\" as a header: {e}"))
        })?;

    let root = root_hash.to_string();
    let stream = ReaderStream::new(reader).inspect_err(move |e| {
        tracing::error!(root_hash = %root, error = %e, "send file error after response committed");
    });

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            ),
            (header::CONTENT_LENGTH, HeaderValue::from(len)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}
