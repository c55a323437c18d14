//! Test fixtures and constants.

use shade_engine::{PixelBuffer, Rect, Srgb};
use shadematch::rendering::encode_png;

/// Colors used in the synthetic photographs
pub mod colors {
    use shade_engine::Srgb;

    /// Dark mouth background
    pub const BACKGROUND: Srgb = Srgb::new(25, 15, 20);

    /// The tooth being matched
    pub const TOOTH: Srgb = Srgb::new(226, 214, 187);

    /// A shade tab far from the tooth
    pub const SHADE_DARK: Srgb = Srgb::new(178, 140, 105);

    /// A shade tab barely distinguishable from the tooth
    pub const SHADE_CLOSE: Srgb = Srgb::new(225, 214, 188);
}

/// Layout of [`shade_board`]: x offsets of the tooth and the two shade tabs
pub const TOOTH_X: u32 = 10;
pub const DARK_X: u32 = 80;
pub const CLOSE_X: u32 = 150;
pub const PATCH: u32 = 50;

/// A 220x80 photograph: a tooth and two shade tabs on a dark background
pub fn shade_board() -> PixelBuffer {
    let mut image = PixelBuffer::filled(220, 80, colors::BACKGROUND);
    image.fill_rect(Rect::new(TOOTH_X, 15, PATCH, PATCH), colors::TOOTH);
    image.fill_rect(Rect::new(DARK_X, 15, PATCH, PATCH), colors::SHADE_DARK);
    image.fill_rect(Rect::new(CLOSE_X, 15, PATCH, PATCH), colors::SHADE_CLOSE);
    image
}

pub fn shade_board_png() -> Vec<u8> {
    encode_png(&shade_board()).unwrap()
}

/// A solid image of the given size
pub fn solid_png(width: u32, height: u32, color: Srgb) -> Vec<u8> {
    encode_png(&PixelBuffer::filled(width, height, color)).unwrap()
}

/// Session JSON for [`shade_board`]; every rectangle catches some background
pub fn board_session_json() -> String {
    serde_json::json!({
        "teeth": [{ "x": TOOTH_X - 3, "y": 12, "width": PATCH + 6, "height": PATCH + 6 }],
        "shades": [
            { "x": DARK_X - 3, "y": 12, "width": PATCH + 6, "height": PATCH + 6 },
            { "x": CLOSE_X - 3, "y": 12, "width": PATCH + 6, "height": PATCH + 6 }
        ]
    })
    .to_string()
}
