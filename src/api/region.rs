use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use shade_engine::{Growth, Point};
use std::sync::Arc;
use utoipa::ToSchema;

use super::images::find_image;
use crate::error::ApiError;
use crate::models::Selection;
use crate::services::{InMemoryImageStore, MatchService};

/// Request body for one-click region selection
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegionRequest {
    pub x: u32,
    pub y: u32,
    /// Overrides the configured ΔE2000 tolerance for this request
    #[serde(default)]
    pub tolerance: Option<f64>,
}

/// Result of region growing
#[derive(Debug, Serialize, ToSchema)]
pub struct RegionResponse {
    /// Bounding rectangle; 0x0 at the seed when nothing was selected
    pub rect: Selection,
    pub found: bool,
    /// One of `region`, `runaway`, `too_small`, `out_of_bounds`
    pub outcome: String,
}

impl From<Growth> for RegionResponse {
    fn from(growth: Growth) -> Self {
        Self {
            rect: growth.rect().into(),
            found: growth.is_region(),
            outcome: growth.kind().to_string(),
        }
    }
}

/// Grow a selection from a clicked pixel
///
/// A response with `found: false` means the click should not create a
/// selection: it landed on background, on noise, or outside the image.
#[utoipa::path(
    post,
    path = "/api/images/{id}/region",
    request_body = RegionRequest,
    responses(
        (status = 200, description = "Region result", body = RegionResponse),
        (status = 400, description = "Invalid tolerance"),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id returned by the upload"),
    ),
    tag = "Matching"
)]
pub async fn handle_region(
    State(store): State<Arc<InMemoryImageStore>>,
    State(service): State<Arc<MatchService>>,
    Path(id): Path<String>,
    Json(request): Json<RegionRequest>,
) -> Result<Json<RegionResponse>, ApiError> {
    let image = find_image(&store, &id).await?;
    let seed = Point::new(request.x, request.y);

    let growth = service
        .grow_region(image.pixels, seed, request.tolerance)
        .await?;
    Ok(Json(RegionResponse::from(growth)))
}
