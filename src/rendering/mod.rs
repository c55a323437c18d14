pub mod annotate;
pub mod png_codec;

pub use annotate::{render_annotated, Annotation};
pub use png_codec::{decode_png, encode_png, encode_rgb_png};
