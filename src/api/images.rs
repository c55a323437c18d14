use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{image_id, ImageStore, InMemoryImageStore, MatchService, StoredImage};

/// Response from an image upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// SHA-256 of the uploaded bytes; the image's address in later calls
    pub id: String,
    pub width: u32,
    pub height: u32,
}

/// Metadata of a stored image
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageInfo {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&StoredImage> for ImageInfo {
    fn from(image: &StoredImage) -> Self {
        Self {
            id: image.id.clone(),
            width: image.width(),
            height: image.height(),
            uploaded_at: image.uploaded_at,
        }
    }
}

/// Upload a photograph
///
/// The body is raw PNG bytes. Identical uploads share one id.
#[utoipa::path(
    post,
    path = "/api/images",
    request_body(content = Vec<u8>, content_type = "image/png"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Body is not a decodable PNG"),
        (status = 413, description = "Body or image dimensions over the configured limits"),
    ),
    tag = "Images"
)]
pub async fn handle_upload(
    State(store): State<Arc<InMemoryImageStore>>,
    State(service): State<Arc<MatchService>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let id = image_id(&body);
    let size_bytes = body.len();

    let pixels = service.decode(body).await.map_err(|e| {
        tracing::warn!(error = %e, size_bytes, "Rejected upload");
        e
    })?;
    let stored = store.insert(StoredImage::new(id, pixels)).await?;

    tracing::info!(
        id = %stored.id,
        width = stored.width(),
        height = stored.height(),
        size_bytes,
        "Image uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: stored.id.clone(),
            width: stored.width(),
            height: stored.height(),
        }),
    ))
}

/// Get image metadata
#[utoipa::path(
    get,
    path = "/api/images/{id}",
    responses(
        (status = 200, description = "Image metadata", body = ImageInfo),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id returned by the upload"),
    ),
    tag = "Images"
)]
pub async fn handle_get_image(
    State(store): State<Arc<InMemoryImageStore>>,
    Path(id): Path<String>,
) -> Result<Json<ImageInfo>, ApiError> {
    let image = find_image(&store, &id).await?;
    Ok(Json(ImageInfo::from(&image)))
}

/// Look up an image or fail with 404
pub(crate) async fn find_image(
    store: &InMemoryImageStore,
    id: &str,
) -> Result<StoredImage, ApiError> {
    store.get(id).await?.ok_or_else(|| {
        tracing::debug!(id = %id, "Image not found");
        ApiError::NotFound
    })
}
