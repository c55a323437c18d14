pub mod images;
pub mod matching;
pub mod region;

pub use images::{__path_handle_get_image, __path_handle_upload};
pub use images::{handle_get_image, handle_upload, ImageInfo, UploadResponse};
pub use matching::{__path_handle_annotate, __path_handle_match};
pub use matching::{handle_annotate, handle_match, MatchResponse};
pub use region::{handle_region, RegionRequest, RegionResponse, __path_handle_region};
