//! Bounding rectangles reported by the rendering layer

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a rendered element, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Rectangle with only the vertical extent known
    pub fn vertical(top: f64, height: f64) -> Self {
        Self {
            top,
            height,
            ..Self::default()
        }
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True when this rectangle's top edge is strictly below `other`'s bottom edge
    pub fn is_below(&self, other: &Rect) -> bool {
        self.top > other.bottom()
    }
}
