use axum::{
    Json,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use futures_util::stream::{self, Stream};
use tokio::{fs::File, io::AsyncReadExt};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::image_dto::*,
        handlers::{fetch, paginate},
        pagination::ListRequest,
    },
    error::{AppError, Result},
};

const CHUNK_SIZE: usize = 64 * 1024;

/// List images, optionally filtered by `scan`
///
/// GET /api/v1/images
pub async fn list_images(
    State(state): State<AppState>,
    list: ListRequest,
) -> Result<impl IntoResponse> {
    let (count, window, images) =
        paginate(state.repos.images.as_ref(), &list, &state.pagination).await?;
    debug!("Listing images: count={}, offset={}", count, window.offset);

    let results: Vec<ImageResponse> = images.into_iter().map(Into::into).collect();
    Ok(Json(list.page(count, window, results)))
}

/// Stream an image file. The announced `Content-Length` is the size stored
/// on the row.
///
/// GET /api/v1/images/:id/download
pub async fn download_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let image = fetch(state.repos.images.as_ref(), &id).await?;
    let path = image.path();
    debug!("Downloading image {} from {}", id, path.display());

    let is_file = tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(AppError::FileMissing(path.display().to_string()));
    }

    let file = File::open(path).await?;
    state.metrics.record_download(image.size);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, image.size)
        .header(header::CONTENT_DISPOSITION, content_disposition(&image.name))
        .body(Body::from_stream(chunks(file)))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Read the file in fixed-size chunks; the handle closes when the stream is
/// dropped.
fn chunks(file: File) -> impl Stream<Item = std::io::Result<Bytes>> + Send + 'static {
    stream::try_unfold(file, next_chunk)
}

async fn next_chunk(mut file: File) -> std::io::Result<Option<(Bytes, File)>> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let n = file.read(&mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    buf.truncate(n);
    Ok(Some((Bytes::from(buf), file)))
}

fn content_disposition(filename: &str) -> String {
    let printable = filename.chars().all(|c| c.is_ascii_graphic() || c == ' ');
    if printable {
        format!(
            "inline; filename=\"{}\"",
            filename.replace('\\', "\\\\").replace('"', "\\\"")
        )
    } else {
        format!(
            "inline; filename*=utf-8''{}",
            urlencoding::encode(filename)
        )
    }
}
