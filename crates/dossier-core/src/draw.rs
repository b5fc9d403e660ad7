//! Draw commands. All painting reduces to these primitives.

use crate::widget::TextStyle;
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for outlines and lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Box style for rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// A box with only a fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// A box with only a stroke.
    #[must_use]
    pub const fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }
}

/// Drawing primitive.
///
/// Clip regions are recorded inline as `PushClip`/`PopClip` pairs so that a
/// command list can be replayed on any backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Top-left position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Start clipping to bounds
    PushClip {
        /// Clip bounds
        bounds: Rect,
    },

    /// End the innermost clip
    PopClip,
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Text content, for `Text` commands.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_style_default() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.width, 1.0);
    }

    #[test]
    fn test_filled_rect() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        match cmd {
            DrawCommand::Rect { style, radius, .. } => {
                assert_eq!(style.fill, Some(Color::WHITE));
                assert!(style.stroke.is_none());
                assert_eq!(radius, CornerRadius::ZERO);
            }
            _ => panic!("Expected Rect command"),
        }
    }

    #[test]
    fn test_text_accessor() {
        let cmd = DrawCommand::Text {
            content: "hi".into(),
            position: Point::ORIGIN,
            style: TextStyle::default(),
        };
        assert_eq!(cmd.text(), Some("hi"));
        assert_eq!(DrawCommand::PopClip.text(), None);
    }

    #[test]
    fn test_draw_command_serializes() {
        let cmd = DrawCommand::PushClip {
            bounds: Rect::new(0.0, 0.0, 100.0, 320.0),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("PushClip"));
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
