//! PNG decoding into engine pixel buffers, and 8-bit RGB encoding.

use std::io::Cursor;

use shade_engine::{PixelBuffer, PixelSource, Srgb};

use crate::error::ImageError;

/// Decode PNG bytes to 8-bit sRGB.
///
/// Palette, low bit depth and 16-bit images are normalized to 8 bits per
/// channel; alpha is dropped. Images with more than `max_pixels` pixels are
/// rejected before the pixel data is read.
pub fn decode_png(bytes: &[u8], max_pixels: u64) -> Result<PixelBuffer, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width as u64 * height as u64 > max_pixels {
        return Err(ImageError::TooLarge {
            width,
            height,
            max: max_pixels,
        });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    let data = &buf[..frame.buffer_size()];

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::UnsupportedFormat(format!(
            "bit depth {:?}",
            frame.bit_depth
        )));
    }

    let pixels: Vec<Srgb> = match frame.color_type {
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .map(|p| Srgb::new(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|p| Srgb::new(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::Grayscale => data.iter().map(|&v| Srgb::new(v, v, v)).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .map(|p| Srgb::new(p[0], p[0], p[0]))
            .collect(),
        png::ColorType::Indexed => {
            return Err(ImageError::UnsupportedFormat(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    PixelBuffer::new(frame.width, frame.height, pixels)
        .ok_or_else(|| ImageError::Decode("pixel data does not match dimensions".to_string()))
}

/// Encode packed 8-bit RGB data as a PNG.
pub fn encode_rgb_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode a pixel buffer as an RGB PNG.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, ImageError> {
    encode_rgb_png(image.width(), image.height(), &image.to_rgb_bytes())
}
