pub mod config;
pub mod session;

pub use config::{
    AnnotateConfig, AnnotateStyle, AppConfig, LimitsConfig, MatchingConfig, RegionConfig,
    WeightsConfig,
};
pub use session::{Selection, Session};
