use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use shade_engine::MatchReport;
use std::sync::Arc;
use utoipa::ToSchema;

use super::images::find_image;
use crate::error::ApiError;
use crate::models::Session;
use crate::services::{InMemoryImageStore, MatchService};

/// Result of matching a session
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchResponse {
    /// Index into `shades` of the closest shade, or -1
    pub index: i64,
    pub matched: bool,
    /// Mean ΔE2000 per shade; null for shades with no usable pixels
    pub distances: Vec<Option<f64>>,
}

impl From<&MatchReport> for MatchResponse {
    fn from(report: &MatchReport) -> Self {
        Self {
            index: report.sentinel_index(),
            matched: report.best.is_some(),
            distances: report.distances.clone(),
        }
    }
}

/// Find the shade closest to the teeth
///
/// All tooth rectangles are sampled together; every shade rectangle is a
/// separate candidate.
#[utoipa::path(
    post,
    path = "/api/images/{id}/match",
    request_body = Session,
    responses(
        (status = 200, description = "Match result", body = MatchResponse),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id returned by the upload"),
    ),
    tag = "Matching"
)]
pub async fn handle_match(
    State(store): State<Arc<InMemoryImageStore>>,
    State(service): State<Arc<MatchService>>,
    Path(id): Path<String>,
    Json(session): Json<Session>,
) -> Result<Json<MatchResponse>, ApiError> {
    let image = find_image(&store, &id).await?;

    tracing::info!(
        id = %id,
        teeth = session.teeth.len(),
        shades = session.shades.len(),
        "Match request received"
    );

    let report = service.find_match(image.pixels, session).await?;
    Ok(Json(MatchResponse::from(&report)))
}

/// Render the session over the image
///
/// Teeth are outlined in blue, shades in red, and the matched shade gets an
/// inner green outline.
#[utoipa::path(
    post,
    path = "/api/images/{id}/annotate",
    request_body = Session,
    responses(
        (status = 200, description = "Annotated PNG", content_type = "image/png"),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id returned by the upload"),
    ),
    tag = "Matching"
)]
pub async fn handle_annotate(
    State(store): State<Arc<InMemoryImageStore>>,
    State(service): State<Arc<MatchService>>,
    Path(id): Path<String>,
    Json(session): Json<Session>,
) -> Result<Response, ApiError> {
    let image = find_image(&store, &id).await?;
    let (report, png_bytes) = service.annotate(image.pixels, session).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, png_bytes.len().to_string()),
            (
                header::HeaderName::from_static("x-match-index"),
                report.sentinel_index().to_string(),
            ),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}
