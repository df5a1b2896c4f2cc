use scene::visibility::FeatureVisibility;
use serde::{Serialize, Serializer};

/// Opaque sRGB color, written as `#rrggbb` for the rendering host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const fn from_hex(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

pub const DEFAULT_FILL: Color = Color::from_hex(0x2a4365);
pub const DEFAULT_HOVER_FILL: Color = Color::from_hex(0x60a5fa);
pub const SELECTED_FILL: Color = Color::from_hex(0x3b82f6);
pub const SELECTED_HOVER_FILL: Color = Color::from_hex(0x2563eb);
pub const PRESSED_FILL: Color = Color::from_hex(0x1d4ed8);
pub const STROKE: Color = Color::from_hex(0x1a202c);

pub const STROKE_WIDTH: f32 = 0.5;
pub const SELECTED_STROKE_WIDTH: f32 = 1.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Default,
    Pointer,
}

/// Paint instructions for one country feature.
///
/// `pointer_events == false` means the host must not deliver hover or click
/// events for the feature at all.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct FeatureStyle {
    pub fill: Color,
    pub hover_fill: Color,
    pub pressed_fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    pub opacity: f32,
    pub cursor: Cursor,
    pub pointer_events: bool,
}

impl FeatureStyle {
    pub fn for_visibility(v: FeatureVisibility) -> Self {
        if v.selected {
            return Self {
                fill: SELECTED_FILL,
                hover_fill: SELECTED_HOVER_FILL,
                pressed_fill: PRESSED_FILL,
                stroke: STROKE,
                stroke_width: SELECTED_STROKE_WIDTH,
                opacity: 1.0,
                cursor: Cursor::Pointer,
                pointer_events: true,
            };
        }
        if v.visible {
            return Self {
                fill: DEFAULT_FILL,
                hover_fill: DEFAULT_HOVER_FILL,
                pressed_fill: PRESSED_FILL,
                stroke: STROKE,
                stroke_width: STROKE_WIDTH,
                opacity: 1.0,
                cursor: Cursor::Pointer,
                pointer_events: true,
            };
        }
        Self {
            opacity: 0.0,
            ..Self::inert()
        }
    }

    /// Features with no country behind them: drawn, but never reacting.
    pub fn inert() -> Self {
        Self {
            fill: DEFAULT_FILL,
            hover_fill: DEFAULT_FILL,
            pressed_fill: DEFAULT_FILL,
            stroke: STROKE,
            stroke_width: STROKE_WIDTH,
            opacity: 1.0,
            cursor: Cursor::Default,
            pointer_events: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Cursor, DEFAULT_FILL, FeatureStyle, SELECTED_FILL};
    use scene::visibility::FeatureVisibility;

    #[test]
    fn color_formats() {
        assert_eq!(SELECTED_FILL.to_hex(), "#3b82f6");
        assert_eq!(Color::from_hex(0xff0000ff).to_hex(), "#0000ff");
        assert_eq!(serde_json::to_string(&DEFAULT_FILL).unwrap(), "\"#2a4365\"");
    }

    #[test]
    fn selected_gets_highlight() {
        let s = FeatureStyle::for_visibility(FeatureVisibility {
            selected: true,
            visible: true,
        });
        assert_eq!(s.fill, SELECTED_FILL);
        assert_eq!(s.stroke_width, 1.0);
        assert!(s.pointer_events);
    }

    #[test]
    fn hidden_features_capture_no_pointer() {
        let s = FeatureStyle::for_visibility(FeatureVisibility {
            selected: false,
            visible: false,
        });
        assert_eq!(s.opacity, 0.0);
        assert!(!s.pointer_events);
        assert_eq!(s.cursor, Cursor::Default);
    }

    #[test]
    fn inert_style_does_not_change_on_hover() {
        let s = FeatureStyle::inert();
        assert_eq!(s.fill, s.hover_fill);
        assert!(!s.pointer_events);
        assert_eq!(s.opacity, 1.0);
    }
}
