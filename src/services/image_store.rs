use crate::error::ApiError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use shade_engine::{PixelBuffer, PixelSource};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A decoded upload
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// SHA-256 of the uploaded bytes, hex encoded
    pub id: String,
    pub pixels: Arc<PixelBuffer>,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredImage {
    pub fn new(id: String, pixels: PixelBuffer) -> Self {
        Self {
            id,
            pixels: Arc::new(pixels),
            uploaded_at: Utc::now(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Content address of an upload
pub fn image_id(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Trait for decoded image storage
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an image. Re-uploading identical bytes keeps the first entry.
    async fn insert(&self, image: StoredImage) -> Result<StoredImage, ApiError>;

    /// Find an image by id
    async fn get(&self, id: &str) -> Result<Option<StoredImage>, ApiError>;
}

/// Default number of decoded images kept in memory
pub const DEFAULT_MAX_IMAGES: usize = 32;

struct Images {
    by_id: HashMap<String, StoredImage>,
    /// Ids by insertion time (oldest first)
    insertion_order: VecDeque<String>,
}

/// In-memory image storage, bounded to `max_images` entries.
///
/// Inserting past capacity evicts the oldest upload first.
pub struct InMemoryImageStore {
    images: Arc<RwLock<Images>>,
    max_images: usize,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_IMAGES)
    }

    /// A store holding at most `max_images` images (at least one)
    pub fn with_capacity(max_images: usize) -> Self {
        Self {
            images: Arc::new(RwLock::new(Images {
                by_id: HashMap::new(),
                insertion_order: VecDeque::new(),
            })),
            max_images: max_images.max(1),
        }
    }

    pub async fn count(&self) -> usize {
        self.images.read().await.by_id.len()
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn insert(&self, image: StoredImage) -> Result<StoredImage, ApiError> {
        let mut images = self.images.write().await;
        if let Some(existing) = images.by_id.get(&image.id) {
            return Ok(existing.clone());
        }

        while images.by_id.len() >= self.max_images {
            let Some(oldest) = images.insertion_order.pop_front() else {
                break;
            };
            images.by_id.remove(&oldest);
            tracing::debug!(
                id = %oldest,
                store_size = images.by_id.len(),
                "Image store: evicted oldest image"
            );
        }

        images.insertion_order.push_back(image.id.clone());
        images.by_id.insert(image.id.clone(), image.clone());
        Ok(image)
    }

    async fn get(&self, id: &str) -> Result<Option<StoredImage>, ApiError> {
        let images = self.images.read().await;
        Ok(images.by_id.get(id).cloned())
    }
}
