use serde::{Deserialize, Serialize};

/// Tooltips sit this many pixels above the pointer.
pub const TOOLTIP_OFFSET_PX: f64 = 40.0;

/// Pointer position in page pixels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Hover label for a country feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub text: String,
    /// Top-left anchor of the tooltip box.
    pub position: ScreenPoint,
}

impl Tooltip {
    pub fn at_pointer(text: impl Into<String>, pointer: ScreenPoint) -> Self {
        Self {
            text: text.into(),
            position: ScreenPoint::new(pointer.x, pointer.y - TOOLTIP_OFFSET_PX),
        }
    }
}
