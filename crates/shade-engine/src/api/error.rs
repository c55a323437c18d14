//! Unified error type for the shade-engine public API.

use crate::color::ParseColorError;
use std::fmt;

/// Unified error type for the shade-engine public API.
///
/// # Example
///
/// ```
/// use shade_engine::{EngineError, Srgb};
///
/// fn parse(hex: &str) -> Result<Srgb, EngineError> {
///     Ok(hex.parse::<Srgb>()?)
/// }
///
/// assert!(parse("#00ff00").is_ok());
/// assert!(parse("nope").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A matcher option is out of range (negative, zero, or not finite)
    InvalidOption { name: &'static str, value: f64 },
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidOption { name, value } => {
                write!(f, "invalid value for {}: {}", name, value)
            }
            EngineError::ParseColor(err) => write!(f, "color parse error: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidOption { .. } => None,
            EngineError::ParseColor(err) => Some(err),
        }
    }
}

impl From<ParseColorError> for EngineError {
    fn from(err: ParseColorError) -> Self {
        EngineError::ParseColor(err)
    }
}
