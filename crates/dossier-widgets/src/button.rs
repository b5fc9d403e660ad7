//! Push button used for disclosure and "show more" controls.

use dossier_core::{
    escape_html,
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints,
    CornerRadius, Event, Key, MouseButton, Point, Rect, Size, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Button widget with label and click handling.
#[derive(Clone, Serialize, Deserialize)]
pub struct Button {
    label: String,
    background: Color,
    background_hover: Color,
    background_pressed: Color,
    text_color: Color,
    corner_radius: CornerRadius,
    padding: f32,
    font_size: f32,
    disabled: bool,
    test_id_value: Option<String>,
    #[serde(skip)]
    hovered: bool,
    #[serde(skip)]
    pressed: bool,
    #[serde(skip)]
    bounds: Rect,
}

/// Message emitted when button is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonClicked;

impl Button {
    /// Create a new primary button with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            background: Color::ACCENT_PRIMARY,
            background_hover: Color::from_hex("#3f35c4").unwrap_or(Color::ACCENT_PRIMARY),
            background_pressed: Color::from_hex("#3228a8").unwrap_or(Color::ACCENT_PRIMARY),
            text_color: Color::WHITE,
            corner_radius: CornerRadius::uniform(8.0),
            padding: 12.0,
            font_size: 14.0,
            disabled: false,
            test_id_value: None,
            hovered: false,
            pressed: false,
            bounds: Rect::default(),
        }
    }

    /// Compact variant for inline controls.
    #[must_use]
    pub fn small(label: impl Into<String>) -> Self {
        Self::new(label).padding(6.0).font_size(12.0)
    }

    /// Set background color.
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set padding.
    #[must_use]
    pub const fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Set font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Current label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn current_background(&self) -> Color {
        if self.disabled {
            let gray = (self.background.r + self.background.g + self.background.b) / 3.0;
            Color::rgb(gray, gray, gray)
        } else if self.pressed {
            self.background_pressed
        } else if self.hovered {
            self.background_hover
        } else {
            self.background
        }
    }

    fn estimate_text_size(&self) -> Size {
        let char_width = self.font_size * 0.6;
        let width = self.label.chars().count() as f32 * char_width;
        let height = self.font_size * 1.2;
        Size::new(width, height)
    }
}

impl Widget for Button {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let text_size = self.estimate_text_size();
        let size = Size::new(
            self.padding.mul_add(2.0, text_size.width),
            self.padding.mul_add(2.0, text_size.height),
        );
        constraints.constrain(size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.current_background());

        let text_size = self.estimate_text_size();
        let text_pos = Point::new(
            self.bounds.x + (self.bounds.width - text_size.width) / 2.0,
            self.bounds.y + (self.bounds.height - text_size.height) / 2.0,
        );

        let style = TextStyle {
            size: self.font_size,
            color: if self.disabled {
                Color::rgb(0.7, 0.7, 0.7)
            } else {
                self.text_color
            },
            weight: FontWeight::Medium,
            ..Default::default()
        };

        canvas.draw_text(&self.label, text_pos, &style);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }

        match event {
            Event::MouseEnter => {
                self.hovered = true;
                None
            }
            Event::MouseLeave => {
                self.hovered = false;
                self.pressed = false;
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.bounds.contains_point(position) {
                    self.pressed = true;
                }
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = self.pressed;
                self.pressed = false;

                if was_pressed && self.bounds.contains_point(position) {
                    Some(Box::new(ButtonClicked))
                } else {
                    None
                }
            }
            Event::KeyDown { key } if key.is_activation() => {
                self.pressed = true;
                None
            }
            Event::KeyUp { key } if key.is_activation() => {
                let was_pressed = self.pressed;
                self.pressed = false;
                was_pressed.then(|| Box::new(ButtonClicked) as Box<dyn Any + Send>)
            }
            Event::KeyUp { key: Key::Escape } => {
                self.pressed = false;
                None
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Button {
    fn brick_name(&self) -> &'static str {
        "Button"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[
            BrickAssertion::TextVisible,
            BrickAssertion::ContrastRatio(4.5),
            BrickAssertion::Focusable,
        ]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::TextVisible,
            !self.label.trim().is_empty(),
            "Button label is empty",
        );
        let contrast = self.background.contrast_ratio(&self.text_color);
        verification.check(
            BrickAssertion::ContrastRatio(4.5),
            contrast >= 4.5,
            format!("Label contrast {contrast:.2} is below 4.5"),
        );
        verification.check(
            BrickAssertion::Focusable,
            !self.disabled,
            "Disabled buttons cannot take focus",
        );
        verification
    }

    fn to_html(&self) -> String {
        let test_id = self
            .test_id_value
            .as_deref()
            .map(|id| format!(r#" data-testid="{}""#, escape_html(id)))
            .unwrap_or_default();
        let disabled = if self.disabled { " disabled" } else { "" };
        format!(
            r#"<button type="button" class="brick-button"{test_id}{disabled}>{}</button>"#,
            escape_html(&self.label)
        )
    }

    fn to_css(&self) -> String {
        format!(
            r".brick-button {{
    background: {};
    color: {};
    font-size: {}px;
    font-weight: {};
    padding: {}px;
    border: none;
    border-radius: {}px;
    cursor: pointer;
}}
.brick-button:hover {{
    background: {};
}}",
            self.background.to_hex(),
            self.text_color.to_hex(),
            self.font_size,
            FontWeight::Medium.css_value(),
            self.padding,
            self.corner_radius.top_left,
            self.background_hover.to_hex(),
        )
    }
}
