pub mod image_store;
pub mod match_service;

pub use image_store::{image_id, ImageStore, InMemoryImageStore, StoredImage, DEFAULT_MAX_IMAGES};
pub use match_service::MatchService;
