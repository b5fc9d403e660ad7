//! Text widget for labels and list rows.

use dossier_core::{
    escape_html,
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, Event,
    Rect, Size, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Single-line styled text.
#[derive(Clone, Serialize, Deserialize)]
pub struct Text {
    content: String,
    color: Color,
    font_size: f32,
    font_weight: FontWeight,
    underline: bool,
    role: AccessibleRole,
    test_id_value: Option<String>,
    #[serde(skip)]
    bounds: Rect,
}

impl Text {
    /// Create new text widget.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: Color::TEXT_DEFAULT,
            font_size: 14.0,
            font_weight: FontWeight::Normal,
            underline: false,
            role: AccessibleRole::Generic,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Set text color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set font weight.
    #[must_use]
    pub const fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Draw as a link.
    #[must_use]
    pub const fn link(mut self) -> Self {
        self.color = Color::ACCENT_PRIMARY;
        self.underline = true;
        self.role = AccessibleRole::Link;
        self
    }

    /// Set the accessible role.
    #[must_use]
    pub const fn role(mut self, role: AccessibleRole) -> Self {
        self.role = role;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            size: self.font_size,
            color: self.color,
            weight: self.font_weight,
            underline: self.underline,
            ..TextStyle::default()
        }
    }

    fn estimate_size(&self) -> Size {
        let char_width = self.font_size * 0.6;
        let line_height = self.font_size * 1.2;
        Size::new(self.content.chars().count() as f32 * char_width, line_height)
    }
}

impl Widget for Text {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.estimate_size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.content.is_empty() {
            return;
        }
        canvas.draw_text(&self.content, self.bounds.origin(), &self.style());
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.content)
    }

    fn accessible_role(&self) -> AccessibleRole {
        self.role
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Text {
    fn brick_name(&self) -> &'static str {
        "Text"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::TextVisible,
            !self.content.is_empty(),
            "Text content is empty",
        );
        verification
    }

    fn to_html(&self) -> String {
        let test_id = self.test_id_value.as_deref().unwrap_or("text");
        format!(
            r#"<span class="brick-text" data-testid="{}">{}</span>"#,
            escape_html(test_id),
            escape_html(&self.content)
        )
    }

    fn to_css(&self) -> String {
        format!(
            r".brick-text {{
    color: {};
    font-size: {}px;
    font-weight: {};
    line-height: 1.2;
    display: inline-block;
}}",
            self.color.to_hex(),
            self.font_size,
            self.font_weight.css_value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::draw::DrawCommand;
    use dossier_core::{Point, RecordingCanvas};

    #[test]
    fn test_text_new() {
        let t = Text::new("Hello");
        assert_eq!(t.content(), "Hello");
        assert_eq!(t.font_size, 14.0);
        assert_eq!(Widget::accessible_name(&t), Some("Hello"));
    }

    #[test]
    fn test_text_builder() {
        let t = Text::new("Test")
            .color(Color::WHITE)
            .font_size(24.0)
            .font_weight(FontWeight::Bold)
            .with_test_id("my-text");

        assert_eq!(t.color, Color::WHITE);
        assert_eq!(t.font_size, 24.0);
        assert_eq!(t.font_weight, FontWeight::Bold);
        assert_eq!(Widget::test_id(&t), Some("my-text"));
    }

    #[test]
    fn test_text_measure() {
        let t = Text::new("Hello").font_size(10.0);
        let size = t.measure(Constraints::unbounded());
        assert!((size.width - 30.0).abs() < 1e-4);
        assert!((size.height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_text_measure_is_constrained() {
        let t = Text::new("a long label that will not fit");
        let size = t.measure(Constraints::width(50.0));
        assert_eq!(size.width, 50.0);
    }

    #[test]
    fn test_text_paint_position_from_layout() {
        let mut text = Text::new("Hello World").font_weight(FontWeight::Bold);
        text.layout(Rect::new(10.0, 20.0, 200.0, 30.0));

        let mut canvas = RecordingCanvas::new();
        text.paint(&mut canvas);

        assert_eq!(canvas.command_count(), 1);
        match &canvas.commands()[0] {
            DrawCommand::Text {
                content,
                position,
                style,
            } => {
                assert_eq!(content, "Hello World");
                assert_eq!(*position, Point::new(10.0, 20.0));
                assert_eq!(style.weight, FontWeight::Bold);
            }
            _ => panic!("Expected Text command"),
        }
    }

    #[test]
    fn test_text_paint_empty() {
        let text = Text::new("");
        let mut canvas = RecordingCanvas::new();
        text.paint(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_text_link_style() {
        let t = Text::new("Learn more").link();
        assert!(t.style().underline);
        assert_eq!(Widget::accessible_role(&t), AccessibleRole::Link);
    }

    #[test]
    fn test_text_verify() {
        assert!(Text::new("x").verify().is_valid());
        assert!(!Text::new("").can_render());
    }

    #[test]
    fn test_text_html_escapes() {
        let t = Text::new("a<b").with_test_id("t");
        assert_eq!(
            t.to_html(),
            r#"<span class="brick-text" data-testid="t">a&lt;b</span>"#
        );
    }

    #[test]
    fn test_text_event_returns_none() {
        let mut t = Text::new("x");
        assert!(t.event(&Event::FocusIn).is_none());
    }
}
