//! Draws session rectangles over an image for inspection.

use shade_engine::{PixelBuffer, PixelSource, Rect, Srgb};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::ImageError;
use crate::models::AnnotateStyle;
use crate::rendering::png_codec::encode_rgb_png;

/// What to draw: target regions, candidate regions and the winning candidate.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub teeth: Vec<Rect>,
    pub shades: Vec<Rect>,
    pub winner: Option<usize>,
}

/// Outline the annotation over `image` and return the result as a PNG.
///
/// Teeth are outlined first, then shades; the winner gets a second outline
/// inset by two pixels so both strokes stay visible.
pub fn render_annotated(
    image: &PixelBuffer,
    annotation: &Annotation,
    style: &AnnotateStyle,
) -> Result<Vec<u8>, ImageError> {
    let mut pixmap = to_pixmap(image)?;
    let stroke = Stroke {
        width: style.stroke_width,
        ..Stroke::default()
    };

    for rect in &annotation.teeth {
        outline(&mut pixmap, *rect, style.teeth, &stroke);
    }
    for rect in &annotation.shades {
        outline(&mut pixmap, *rect, style.shade, &stroke);
    }
    if let Some(rect) = annotation.winner.and_then(|i| annotation.shades.get(i)) {
        if rect.width > 4 && rect.height > 4 {
            let inset = Rect::new(rect.x + 2, rect.y + 2, rect.width - 4, rect.height - 4);
            outline(&mut pixmap, inset, style.winner, &stroke);
        }
    }

    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();
    encode_rgb_png(pixmap.width(), pixmap.height(), &rgb)
}

fn to_pixmap(image: &PixelBuffer) -> Result<Pixmap, ImageError> {
    let mut pixmap = Pixmap::new(image.width(), image.height()).ok_or_else(|| {
        ImageError::Encode(format!(
            "cannot allocate {}x{} canvas",
            image.width(),
            image.height()
        ))
    })?;
    // opaque pixels, so premultiplied and straight alpha agree
    for (dst, src) in pixmap.data_mut().chunks_exact_mut(4).zip(image.pixels()) {
        dst.copy_from_slice(&[src.r, src.g, src.b, 255]);
    }
    Ok(pixmap)
}

fn outline(pixmap: &mut Pixmap, rect: Rect, color: Srgb, stroke: &Stroke) {
    let Some(sk_rect) = tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    ) else {
        return;
    };
    let path = PathBuilder::from_rect(sk_rect);

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = false;

    pixmap.stroke_path(&path, &paint, stroke, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::png_codec::decode_png;

    const WHITE: Srgb = Srgb::new(255, 255, 255);

    fn annotate(annotation: &Annotation) -> PixelBuffer {
        let image = PixelBuffer::filled(40, 40, WHITE);
        let png = render_annotated(&image, annotation, &AnnotateStyle::default()).unwrap();
        decode_png(&png, u64::MAX).unwrap()
    }

    #[test]
    fn test_outlines_use_style_colors() {
        let style = AnnotateStyle::default();
        let out = annotate(&Annotation {
            teeth: vec![Rect::new(5, 5, 10, 10)],
            shades: vec![Rect::new(20, 5, 15, 15)],
            winner: Some(0),
        });

        assert_eq!(out.pixel(5, 10), style.teeth);
        assert_eq!(out.pixel(20, 10), style.shade);
        assert_eq!(out.pixel(22, 10), style.winner);
        // interiors untouched
        assert_eq!(out.pixel(10, 10), WHITE);
        assert_eq!(out.pixel(27, 12), WHITE);
    }

    #[test]
    fn test_no_winner_no_green() {
        let style = AnnotateStyle::default();
        let out = annotate(&Annotation {
            teeth: vec![],
            shades: vec![Rect::new(20, 5, 15, 15)],
            winner: None,
        });
        assert!(!out.pixels().contains(&style.winner));
    }

    #[test]
    fn test_empty_rects_are_skipped() {
        let out = annotate(&Annotation {
            teeth: vec![Rect::new(5, 5, 0, 10)],
            shades: vec![],
            winner: Some(3),
        });
        assert!(out.pixels().iter().all(|&p| p == WHITE));
    }

    #[test]
    fn test_keeps_dimensions() {
        let image = PixelBuffer::filled(13, 7, WHITE);
        let png = render_annotated(&image, &Annotation::default(), &AnnotateStyle::default())
            .unwrap();
        let out = decode_png(&png, u64::MAX).unwrap();
        assert_eq!((out.width(), out.height()), (13, 7));
    }
}
