//! Core types and traits for Dossier panel widgets.
//!
//! This crate provides foundational types used throughout Dossier:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Events: [`Event`], plus [`TapRecognizer`] for double taps
//! - The [`Widget`], [`Canvas`] and [`Brick`] traits
//! - [`RecordingCanvas`] for tests and serialization
//! - [`TextSelection`] and [`Clipboard`] for select-and-copy

mod brick;
mod canvas;
mod clipboard;
mod color;
mod constraints;
pub mod draw;
mod event;
mod gesture;
mod geometry;
mod selection;
pub mod widget;

pub use brick::{Brick, BrickAssertion, BrickVerification};
pub use canvas::RecordingCanvas;
pub use clipboard::{Clipboard, ClipboardData, ClipboardFormat};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::DrawCommand;
pub use event::{Event, Key, MouseButton};
pub use gesture::{GestureConfig, TapRecognizer};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use selection::TextSelection;
pub use widget::{
    AccessibleRole, Canvas, FontFamily, FontStyle, FontWeight, LayoutResult, TextStyle, TypeId,
    Widget,
};

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_reexports_compose() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_clip(Rect::from_size(Size::new(10.0, 10.0)));
        canvas.draw_text("x", Point::ORIGIN, &TextStyle::default());
        canvas.pop_clip();
        assert_eq!(canvas.command_count(), 3);
    }
}
