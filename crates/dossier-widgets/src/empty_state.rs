//! Placeholder shown where content is missing.

use crate::markdown::{Document, TextLayout, LINE_HEIGHT_EM};
use crate::text::Text;
use dossier_core::{
    escape_html,
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, Event,
    MouseButton, Point, Rect, Size, TypeId, Widget,
};
use std::any::Any;
use tracing::debug;

const PADDING: f32 = 16.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 14.0;
const GAP: f32 = 8.0;

/// Emitted when the learn-more link is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkActivated {
    /// Link target
    pub url: String,
}

/// Title, short body and an optional "Learn more" link.
pub struct EmptyState {
    title: String,
    body: Document,
    url: Option<String>,
    link: Vec<Box<dyn Widget>>,
    body_layout: TextLayout,
    link_pressed: bool,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl EmptyState {
    /// Create an empty state. The body may contain inline markup.
    #[must_use]
    pub fn new(title: impl Into<String>, body: &str) -> Self {
        Self {
            title: title.into(),
            body: Document::parse(body),
            url: None,
            link: Vec::new(),
            body_layout: TextLayout::default(),
            link_pressed: false,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Add a "Learn more" link.
    #[must_use]
    pub fn learn_more(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self.link = vec![Box::new(
            Text::new("Learn more")
                .font_size(BODY_SIZE)
                .link()
                .with_test_id("empty-state-learn-more"),
        )];
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body as plain text.
    #[must_use]
    pub fn body_text(&self) -> String {
        self.body.plain_text()
    }

    /// Link target, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn title_height() -> f32 {
        TITLE_SIZE * LINE_HEIGHT_EM
    }

    fn link_height(&self) -> f32 {
        if self.link.is_empty() {
            0.0
        } else {
            GAP + BODY_SIZE * LINE_HEIGHT_EM
        }
    }

    fn height_for(&self, body: &TextLayout) -> f32 {
        PADDING.mul_add(2.0, Self::title_height() + GAP + body.height + self.link_height())
    }

    fn link_contains(&self, position: &Point) -> bool {
        self.link
            .iter()
            .any(|link| link.bounds().contains_point(position))
    }

    fn activate(&self) -> Option<Box<dyn Any + Send>> {
        let url = self.url.clone()?;
        debug!(%url, "learn more activated");
        Some(Box::new(LinkActivated { url }))
    }
}

impl Widget for EmptyState {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = constraints.available_width(400.0);
        let body = self.body.layout(width - PADDING * 2.0, BODY_SIZE);
        constraints.constrain(Size::new(width, self.height_for(&body)))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.body_layout = self.body.layout(bounds.width - PADDING * 2.0, BODY_SIZE);

        let link_y = bounds.y + PADDING + Self::title_height() + GAP + self.body_layout.height + GAP;
        for link in &mut self.link {
            let size = link.measure(Constraints::unbounded());
            link.layout(Rect::new(bounds.x + PADDING, link_y, size.width, size.height));
        }

        LayoutResult {
            size: Size::new(bounds.width, self.height_for(&self.body_layout)),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let title_style = TextStyle {
            size: TITLE_SIZE,
            weight: FontWeight::Bold,
            ..TextStyle::default()
        };
        canvas.draw_text(
            &self.title,
            Point::new(self.bounds.x + PADDING, self.bounds.y + PADDING),
            &title_style,
        );

        let body_top = self.bounds.y + PADDING + Self::title_height() + GAP;
        for line in &self.body_layout.lines {
            let style = TextStyle {
                color: Color::TEXT_LIGHT,
                ..line.style.clone()
            };
            canvas.draw_text(
                &line.text,
                Point::new(
                    self.bounds.x + PADDING + line.position.x,
                    body_top + line.position.y,
                ),
                &style,
            );
        }

        for link in &self.link {
            link.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                self.link_pressed = self.link_contains(position);
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = std::mem::take(&mut self.link_pressed);
                if was_pressed && self.link_contains(position) {
                    self.activate()
                } else {
                    None
                }
            }
            Event::KeyUp { key } if key.is_activation() => self.activate(),
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.link
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.link
    }

    fn is_interactive(&self) -> bool {
        self.url.is_some()
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Region
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for EmptyState {
    fn brick_name(&self) -> &'static str {
        "EmptyState"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::TextVisible,
            !self.title.is_empty(),
            "Empty state has no title",
        );
        verification
    }

    fn to_html(&self) -> String {
        let test_id = self.test_id_value.as_deref().unwrap_or("empty-state");
        let link = self
            .url
            .as_deref()
            .map(|url| {
                format!(
                    r#"<a class="brick-link" href="{}" target="_blank" rel="noreferrer">Learn more</a>"#,
                    escape_html(url)
                )
            })
            .unwrap_or_default();
        format!(
            r#"<section class="brick-empty-state" data-testid="{}"><h3>{}</h3>{}{link}</section>"#,
            escape_html(test_id),
            escape_html(&self.title),
            self.body.to_html()
        )
    }

    fn to_css(&self) -> String {
        format!(
            r".brick-empty-state {{
    padding: {PADDING}px;
}}
.brick-empty-state h3 {{
    margin: 0 0 {GAP}px;
    font-size: {TITLE_SIZE}px;
}}
.brick-empty-state p {{
    color: {};
    font-size: {BODY_SIZE}px;
}}",
            Color::TEXT_LIGHT.to_hex()
        )
    }
}
