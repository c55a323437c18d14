//! Public API for the shade-engine crate.
//!
//! This module provides the high-level API: the [`ShadeMatcher`] builder,
//! its [`MatchOptions`], and the [`EngineError`] error type.

mod builder;
mod error;

pub use builder::{MatchOptions, ShadeMatcher};
pub use error::EngineError;
