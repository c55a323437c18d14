use serde::{Deserialize, Serialize};
use shade_engine::Rect;
use utoipa::ToSchema;

/// A rectangle in image pixel coordinates.
///
/// Width and height may be negative, as left behind when an edge is dragged
/// past the opposite one; they are normalized before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Selection {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Selection {
    pub fn to_rect(&self) -> Rect {
        Rect::from_signed(self.x, self.y, self.width, self.height)
    }
}

impl From<Rect> for Selection {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x as i64,
            y: rect.y as i64,
            width: rect.width as i64,
            height: rect.height as i64,
        }
    }
}

/// The rectangles drawn over one image
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Session {
    /// Regions on the tooth being matched; sampled together as one target
    #[serde(default)]
    pub teeth: Vec<Selection>,
    /// One region per shade-guide tab; each is a separate candidate
    #[serde(default)]
    pub shades: Vec<Selection>,
}

impl Session {
    /// Parse a session from YAML or JSON
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Normalized target rectangles
    pub fn target(&self) -> Vec<Rect> {
        self.teeth.iter().map(Selection::to_rect).collect()
    }

    /// Normalized candidate groups, one per shade
    pub fn candidates(&self) -> Vec<Vec<Rect>> {
        self.shades.iter().map(|s| vec![s.to_rect()]).collect()
    }
}
