use serde::Deserialize;
use shade_engine::{
    MatchOptions, ShadeMatcher, Srgb, Weights, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_REGION_SIZE,
    DEFAULT_PRUNE_THRESHOLD, DEFAULT_TOLERANCE,
};
use std::path::Path;

use crate::services::DEFAULT_MAX_IMAGES;

/// Application configuration loaded from the YAML file named by `CONFIG_FILE`
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub matching: MatchingConfig,
    pub region: RegionConfig,
    pub limits: LimitsConfig,
    pub annotate: AnnotateConfig,
}

/// Sampling and comparison settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MatchingConfig {
    /// ΔE2000 distance from the sample median at which pixels are pruned
    pub prune_threshold: f64,
    pub weights: WeightsConfig,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
            weights: WeightsConfig::default(),
        }
    }
}

/// CIEDE2000 parametric weights (kL, kC, kH)
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct WeightsConfig {
    pub lightness: f64,
    pub chroma: f64,
    pub hue: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            lightness: 1.0,
            chroma: 1.0,
            hue: 1.0,
        }
    }
}

impl From<WeightsConfig> for Weights {
    fn from(w: WeightsConfig) -> Self {
        Weights {
            lightness: w.lightness,
            chroma: w.chroma,
            hue: w.hue,
        }
    }
}

/// One-click region growing settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RegionConfig {
    pub tolerance: f64,
    pub min_region_size: usize,
    pub max_iterations: usize,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_region_size: DEFAULT_MIN_REGION_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Upload limits
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted upload body
    pub max_image_bytes: usize,
    /// Largest accepted decoded image (width * height)
    pub max_pixels: u64,
    /// Decoded images kept in memory; the oldest upload is evicted first
    pub max_images: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 32 * 1024 * 1024,
            max_pixels: 40_000_000,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

/// Annotation colors as hex strings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnnotateConfig {
    pub teeth_color: String,
    pub shade_color: String,
    pub winner_color: String,
    pub stroke_width: f32,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            teeth_color: "#0000ff".to_string(),
            shade_color: "#ff0000".to_string(),
            winner_color: "#008000".to_string(),
            stroke_width: 2.0,
        }
    }
}

/// Parsed annotation style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotateStyle {
    pub teeth: Srgb,
    pub shade: Srgb,
    pub winner: Srgb,
    pub stroke_width: f32,
}

impl Default for AnnotateStyle {
    fn default() -> Self {
        Self {
            teeth: Srgb::new(0, 0, 255),
            shade: Srgb::new(255, 0, 0),
            winner: Srgb::new(0, 128, 0),
            stroke_width: 2.0,
        }
    }
}

impl AnnotateConfig {
    /// Parse the configured colors. Falls back to the default style when any
    /// color is malformed or the stroke width is not positive.
    pub fn style(&self) -> AnnotateStyle {
        let parse = || -> Result<AnnotateStyle, shade_engine::EngineError> {
            Ok(AnnotateStyle {
                teeth: self.teeth_color.parse()?,
                shade: self.shade_color.parse()?,
                winner: self.winner_color.parse()?,
                stroke_width: self.stroke_width,
            })
        };
        match parse() {
            Ok(style) if style.stroke_width.is_finite() && style.stroke_width > 0.0 => style,
            Ok(style) => {
                tracing::warn!(
                    stroke_width = style.stroke_width,
                    "Invalid annotate stroke width, using defaults"
                );
                AnnotateStyle::default()
            }
            Err(e) => {
                tracing::warn!(%e, "Invalid annotate color, using defaults");
                AnnotateStyle::default()
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional YAML file.
    ///
    /// Missing, unreadable, or unparsable files fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        prune_threshold = config.matching.prune_threshold,
                        tolerance = config.region.tolerance,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from the file named by `CONFIG_FILE`
    pub fn from_env() -> Self {
        let path = std::env::var("CONFIG_FILE").ok();
        Self::load(path.as_deref().map(Path::new))
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Engine options assembled from the matching and region sections
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            prune_threshold: self.matching.prune_threshold,
            tolerance: self.region.tolerance,
            min_region_size: self.region.min_region_size,
            max_iterations: self.region.max_iterations,
            weights: self.matching.weights.into(),
        }
    }

    /// Build a matcher from the configured options.
    ///
    /// Out-of-range options fall back to the engine defaults.
    pub fn matcher(&self) -> ShadeMatcher {
        match ShadeMatcher::from_options(self.match_options()) {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::warn!(%e, "Invalid engine options, using defaults");
                ShadeMatcher::new()
            }
        }
    }
}
