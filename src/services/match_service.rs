use axum::body::Bytes;
use shade_engine::{Growth, MatchReport, PixelBuffer, PixelSource, Point, ShadeMatcher};
use std::sync::Arc;

use crate::error::{ApiError, ImageError};
use crate::models::{AnnotateStyle, AppConfig, LimitsConfig, Session};
use crate::rendering::{decode_png, render_annotated, Annotation};

/// Runs decoding, matching, region growing and annotation.
///
/// The async methods move the CPU-bound engine work onto the blocking pool;
/// the `*_blocking` variants are what the CLI calls directly.
#[derive(Debug, Clone)]
pub struct MatchService {
    matcher: ShadeMatcher,
    limits: LimitsConfig,
    style: AnnotateStyle,
}

impl MatchService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            matcher: config.matcher(),
            limits: config.limits.clone(),
            style: config.annotate.style(),
        }
    }

    pub fn matcher(&self) -> &ShadeMatcher {
        &self.matcher
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Reject bodies over the configured upload limit
    pub fn check_upload_size(&self, size: usize) -> Result<(), ApiError> {
        if size > self.limits.max_image_bytes {
            return Err(ApiError::PayloadTooLarge {
                size,
                max: self.limits.max_image_bytes,
            });
        }
        Ok(())
    }

    pub fn decode_blocking(&self, bytes: &[u8]) -> Result<PixelBuffer, ImageError> {
        decode_png(bytes, self.limits.max_pixels)
    }

    pub fn match_blocking(&self, image: &PixelBuffer, session: &Session) -> MatchReport {
        self.matcher
            .find_best_match(&session.target(), &session.candidates(), image)
    }

    /// Grow a region, optionally with a one-off tolerance
    pub fn region_blocking(
        &self,
        image: &PixelBuffer,
        seed: Point,
        tolerance: Option<f64>,
    ) -> Result<Growth, ApiError> {
        let matcher = match tolerance {
            Some(t) => {
                let matcher = self.matcher.clone().tolerance(t);
                matcher
                    .validate()
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                matcher
            }
            None => self.matcher.clone(),
        };
        Ok(matcher.grow_region(seed, image))
    }

    /// Match, then outline the session over the image
    pub fn annotate_blocking(
        &self,
        image: &PixelBuffer,
        session: &Session,
    ) -> Result<(MatchReport, Vec<u8>), ImageError> {
        let report = self.match_blocking(image, session);
        let annotation = Annotation {
            teeth: session.target(),
            shades: session.candidates().into_iter().flatten().collect(),
            winner: report.best,
        };
        let png = render_annotated(image, &annotation, &self.style)?;
        Ok((report, png))
    }

    /// Decode an upload on the blocking pool
    pub async fn decode(&self, bytes: Bytes) -> Result<PixelBuffer, ApiError> {
        self.check_upload_size(bytes.len())?;
        let service = self.clone();
        let decoded = tokio::task::spawn_blocking(move || service.decode_blocking(&bytes))
            .await
            .map_err(|e| ApiError::Internal(format!("Task error: {e}")))??;

        tracing::debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Decoded upload"
        );
        Ok(decoded)
    }

    pub async fn find_match(
        &self,
        image: Arc<PixelBuffer>,
        session: Session,
    ) -> Result<MatchReport, ApiError> {
        let service = self.clone();
        let report =
            tokio::task::spawn_blocking(move || service.match_blocking(&image, &session))
                .await
                .map_err(|e| ApiError::Internal(format!("Task error: {e}")))?;

        tracing::info!(
            index = report.sentinel_index(),
            candidates = report.distances.len(),
            distance = ?report.best_distance(),
            "Match computed"
        );
        Ok(report)
    }

    pub async fn grow_region(
        &self,
        image: Arc<PixelBuffer>,
        seed: Point,
        tolerance: Option<f64>,
    ) -> Result<Growth, ApiError> {
        let service = self.clone();
        let growth =
            tokio::task::spawn_blocking(move || service.region_blocking(&image, seed, tolerance))
                .await
                .map_err(|e| ApiError::Internal(format!("Task error: {e}")))??;

        match growth {
            Growth::Region(rect) => tracing::info!(
                x = seed.x,
                y = seed.y,
                width = rect.width,
                height = rect.height,
                "Region grown"
            ),
            other => tracing::info!(
                x = seed.x,
                y = seed.y,
                outcome = other.kind(),
                "No region selected"
            ),
        }
        Ok(growth)
    }

    pub async fn annotate(
        &self,
        image: Arc<PixelBuffer>,
        session: Session,
    ) -> Result<(MatchReport, Vec<u8>), ApiError> {
        let service = self.clone();
        let (report, png) =
            tokio::task::spawn_blocking(move || service.annotate_blocking(&image, &session))
                .await
                .map_err(|e| ApiError::Internal(format!("Task error: {e}")))??;

        tracing::info!(
            index = report.sentinel_index(),
            size_bytes = png.len(),
            "Annotated image rendered"
        );
        Ok((report, png))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Selection;
    use crate::rendering::encode_png;
    use shade_engine::{Rect, Srgb};

    fn service_with(yaml: &str) -> MatchService {
        MatchService::new(&AppConfig::from_yaml(yaml).unwrap())
    }

    fn two_shade_image() -> PixelBuffer {
        let mut image = PixelBuffer::filled(90, 30, Srgb::new(15, 15, 15));
        image.fill_rect(Rect::new(0, 0, 30, 30), Srgb::new(226, 214, 187));
        image.fill_rect(Rect::new(30, 0, 30, 30), Srgb::new(170, 120, 90));
        image.fill_rect(Rect::new(60, 0, 30, 30), Srgb::new(224, 212, 190));
        image
    }

    fn sel(x: i64, y: i64, width: i64, height: i64) -> Selection {
        Selection {
            x,
            y,
            width,
            height,
        }
    }

    fn session() -> Session {
        Session {
            teeth: vec![sel(5, 5, 20, 20)],
            shades: vec![sel(35, 5, 20, 20), sel(65, 5, 20, 20)],
        }
    }

    #[test]
    fn test_upload_limit() {
        let service = service_with("limits:\n  max_image_bytes: 10\n");
        assert!(service.check_upload_size(10).is_ok());
        assert!(matches!(
            service.check_upload_size(11),
            Err(ApiError::PayloadTooLarge { size: 11, max: 10 })
        ));
    }

    #[tokio::test]
    async fn test_decode_rejects_large_body() {
        let service = service_with("limits:\n  max_image_bytes: 4\n");
        let result = service.decode(Bytes::from_static(b"12345")).await;
        assert!(matches!(result, Err(ApiError::PayloadTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_decode_roundtrip() {
        let service = MatchService::new(&AppConfig::default());
        let png = encode_png(&two_shade_image()).unwrap();
        let decoded = service.decode(Bytes::from(png)).await.unwrap();
        assert_eq!(decoded, two_shade_image());
    }

    #[tokio::test]
    async fn test_find_match_picks_closest_shade() {
        let service = MatchService::new(&AppConfig::default());
        let report = service
            .find_match(Arc::new(two_shade_image()), session())
            .await
            .unwrap();
        assert_eq!(report.best, Some(1));
        assert_eq!(report.distances.len(), 2);
    }

    #[tokio::test]
    async fn test_region_with_tolerance_override() {
        let service = service_with("region:\n  min_region_size: 100\n");
        let growth = service
            .grow_region(Arc::new(two_shade_image()), Point::new(10, 10), Some(1.0))
            .await
            .unwrap();
        assert_eq!(growth, Growth::Region(Rect::new(0, 0, 29, 29)));
    }

    #[tokio::test]
    async fn test_region_rejects_negative_tolerance() {
        let service = MatchService::new(&AppConfig::default());
        let result = service
            .grow_region(Arc::new(two_shade_image()), Point::new(10, 10), Some(-3.0))
            .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_annotate_blocking_returns_png_and_report() {
        let service = MatchService::new(&AppConfig::default());
        let (report, png) = service
            .annotate_blocking(&two_shade_image(), &session())
            .unwrap();
        assert_eq!(report.best, Some(1));
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
