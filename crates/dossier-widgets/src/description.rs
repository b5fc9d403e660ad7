//! Collapsible description panel.
//!
//! Shows an asset's markdown description. Text is dedented first, so a
//! description copied out of an indented docstring renders flush-left. When
//! the rendered content is taller than the configured maximum, the panel is
//! clipped and a "Show more" button toggles between the clipped and full
//! views. Double-clicking the panel selects all of its text.
//!
//! ```
//! use dossier_core::{Rect, Widget};
//! use dossier_widgets::Description;
//!
//! let mut description = Description::new("    Indented\n    docstring").max_height(100.0);
//! description.layout(Rect::new(0.0, 0.0, 400.0, 100.0));
//! assert_eq!(description.normalized_text(), "Indented\ndocstring");
//! assert!(!description.has_more());
//! ```

use crate::button::{Button, ButtonClicked};
use crate::dedent::remove_leading_spaces;
use crate::markdown::{Document, TextLayout, CHAR_WIDTH_EM};
use dossier_core::{
    escape_html,
    widget::{AccessibleRole, LayoutResult},
    Brick, BrickAssertion, BrickVerification, Canvas, Clipboard, ClipboardData, Color,
    Constraints, Event, Key, Point, Rect, Size, TextSelection, TypeId, Widget,
};
use dossier_yaml::{DisplayConfig, FontSize, DEFAULT_MAX_HEIGHT};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{debug, trace};

/// Test ID of the show-more/show-less button.
pub const TOGGLE_TEST_ID: &str = "description-toggle";

const SELECTION_COLOR: Color = Color {
    r: 0.31,
    g: 0.263,
    b: 0.867,
    a: 0.2,
};

/// Overflow and expansion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureState {
    /// Content is taller than the maximum height
    pub has_more: bool,
    /// User asked for the full content
    pub expanded: bool,
}

impl DisclosureState {
    /// Content is cut off at the maximum height.
    #[must_use]
    pub const fn is_clipped(&self) -> bool {
        self.has_more && !self.expanded
    }

    /// Label of the toggle button, if one is shown.
    #[must_use]
    pub const fn toggle_label(&self) -> Option<&'static str> {
        match (self.has_more, self.expanded) {
            (false, _) => None,
            (true, false) => Some("Show more"),
            (true, true) => Some("Show less"),
        }
    }
}

/// Emitted when the toggle button is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionToggled {
    /// State after the toggle
    pub expanded: bool,
}

/// Emitted when a double tap selects the whole description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSelected {
    /// Selected plain text
    pub text: String,
}

/// Markdown description with a show-more disclosure.
pub struct Description {
    description: Option<String>,
    normalized: String,
    document: Document,
    plain_text: String,
    config: DisplayConfig,
    state: DisclosureState,
    text_layout: TextLayout,
    toggle_button: Vec<Box<dyn Widget>>,
    toggle_label: Option<&'static str>,
    toggle_hovered: bool,
    selection: Option<TextSelection>,
    focused: bool,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl Description {
    /// Create a description from raw, possibly indented, markdown.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self::optional(Some(description.into()))
    }

    /// Create a description that may be absent.
    #[must_use]
    pub fn optional(description: Option<String>) -> Self {
        let mut widget = Self {
            description: None,
            normalized: String::new(),
            document: Document::default(),
            plain_text: String::new(),
            config: DisplayConfig::default(),
            state: DisclosureState::default(),
            text_layout: TextLayout::default(),
            toggle_button: Vec::new(),
            toggle_label: None,
            toggle_hovered: false,
            selection: None,
            focused: false,
            test_id_value: None,
            bounds: Rect::default(),
        };
        widget.replace_text(description);
        widget
    }

    /// A description with nothing to show.
    #[must_use]
    pub fn empty() -> Self {
        Self::optional(None)
    }

    /// Set the collapse threshold in pixels.
    #[must_use]
    pub const fn max_height(mut self, max_height: f32) -> Self {
        self.config.max_height = max_height;
        self
    }

    /// Set the body font size.
    #[must_use]
    pub fn font_size(mut self, size: impl Into<FontSize>) -> Self {
        self.config.font_size = size.into();
        self
    }

    /// Apply display settings.
    #[must_use]
    pub fn with_config(mut self, config: DisplayConfig) -> Self {
        self.config = config;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Replace the text. Expansion survives; selection does not.
    pub fn set_description(&mut self, description: Option<String>) {
        self.replace_text(description);
        if self.bounds.width > 0.0 {
            self.layout(self.bounds);
        } else {
            self.state.has_more = false;
            self.sync_toggle();
        }
    }

    /// Raw text as supplied.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Text after indentation removal.
    #[must_use]
    pub fn normalized_text(&self) -> &str {
        &self.normalized
    }

    /// Parsed markdown.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Rendered text without markup.
    #[must_use]
    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    /// Display settings.
    #[must_use]
    pub const fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Current disclosure state.
    #[must_use]
    pub const fn state(&self) -> DisclosureState {
        self.state
    }

    /// Whether the full content is shown.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.state.expanded
    }

    /// Whether the content overflows the maximum height, as of the last layout.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.state.has_more
    }

    /// No text was supplied. Whitespace-only text still counts as present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.as_deref().map_or(true, str::is_empty)
    }

    /// Effective collapse threshold. Non-positive values fall back to the default.
    #[must_use]
    pub fn collapse_height(&self) -> f32 {
        let max = self.config.max_height;
        if max.is_finite() && max > 0.0 {
            max
        } else {
            DEFAULT_MAX_HEIGHT
        }
    }

    /// Natural height of the laid-out content.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.text_layout.height
    }

    /// Height actually shown.
    #[must_use]
    pub fn visible_height(&self) -> f32 {
        if self.state.is_clipped() {
            self.collapse_height()
        } else {
            self.text_layout.height
        }
    }

    /// Lines from the last layout, relative to the widget origin.
    #[must_use]
    pub fn text_layout(&self) -> &TextLayout {
        &self.text_layout
    }

    /// Flip between collapsed and expanded. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.state.expanded = !self.state.expanded;
        debug!(expanded = self.state.expanded, "description toggled");
        self.sync_toggle();
        self.place_toggle();
        self.state.expanded
    }

    /// Select the whole rendered text. Returns the selected text.
    pub fn select_all(&mut self) -> Option<String> {
        if self.plain_text.is_empty() {
            return None;
        }
        let selection = TextSelection::all(&self.plain_text);
        self.selection = Some(selection);
        debug!(chars = selection.len(), "description selected");
        Some(selection.slice(&self.plain_text).to_string())
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> Option<TextSelection> {
        self.selection
    }

    /// Selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        self.selection
            .filter(|s| !s.is_empty())
            .map(|s| s.slice(&self.plain_text))
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Copy the selection to a clipboard. Returns false if nothing is selected.
    ///
    /// A full selection also carries the HTML rendering.
    pub fn copy_selection(&self, clipboard: &mut Clipboard) -> bool {
        let (Some(selection), Some(text)) = (self.selection, self.selected_text()) else {
            return false;
        };
        let mut data = ClipboardData::text(text);
        if selection == TextSelection::all(&self.plain_text) {
            data = data.with_html(&self.document.to_html());
        }
        clipboard.write(data);
        debug!(chars = selection.len(), "description copied");
        true
    }

    fn replace_text(&mut self, description: Option<String>) {
        self.normalized = description
            .as_deref()
            .map(|text| remove_leading_spaces(text).into_owned())
            .unwrap_or_default();
        self.document = Document::parse(&self.normalized);
        self.plain_text = self.document.plain_text();
        self.description = description;
        self.selection = None;
    }

    fn font_px(&self) -> f32 {
        self.config.font_px()
    }

    fn sync_toggle(&mut self) {
        match self.state.toggle_label() {
            None => {
                self.toggle_button.clear();
                self.toggle_label = None;
                self.toggle_hovered = false;
            }
            Some(label) if self.toggle_label != Some(label) => {
                self.toggle_button = vec![Box::new(Button::new(label).with_test_id(TOGGLE_TEST_ID))];
                self.toggle_label = Some(label);
                self.toggle_hovered = false;
            }
            Some(_) => {}
        }
    }

    fn place_toggle(&mut self) {
        let bottom = self.bounds.y + self.visible_height();
        let bounds = self.bounds;
        for button in &mut self.toggle_button {
            let size = button.measure(Constraints::unbounded());
            button.layout(Rect::new(
                bounds.x + (bounds.width - size.width) / 2.0,
                bottom - size.height,
                size.width,
                size.height,
            ));
        }
    }

    fn toggle_contains(&self, position: &Point) -> bool {
        self.toggle_button
            .iter()
            .any(|button| button.bounds().contains_point(position))
    }

    fn route_to_toggle(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let clicked = self
            .toggle_button
            .first_mut()
            .and_then(|button| button.event(event))
            .is_some_and(|message| message.is::<ButtonClicked>());
        if clicked {
            let expanded = self.toggle();
            Some(Box::new(DescriptionToggled { expanded }))
        } else {
            None
        }
    }

    fn natural_width(&self, layout: &TextLayout) -> f32 {
        layout
            .lines
            .iter()
            .map(|line| {
                line.text.chars().count() as f32 * line.style.size * CHAR_WIDTH_EM
                    + line.position.x
            })
            .fold(0.0, f32::max)
            .min(layout.width)
    }
}

impl Default for Description {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Option<String>> for Description {
    fn from(description: Option<String>) -> Self {
        Self::optional(description)
    }
}

impl Widget for Description {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        if self.is_empty() {
            return constraints.constrain(Size::ZERO);
        }
        let width = constraints.available_width(f32::INFINITY);
        let layout = self.document.layout(width, self.font_px());
        let clipped = layout.height > self.collapse_height() && !self.state.expanded;
        let height = if clipped {
            self.collapse_height()
        } else {
            layout.height
        };
        let width = if width.is_finite() {
            width
        } else {
            self.natural_width(&layout)
        };
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;

        if self.is_empty() {
            self.text_layout = TextLayout::default();
            self.state.has_more = false;
            self.sync_toggle();
            return LayoutResult::default();
        }

        self.text_layout = self.document.layout(bounds.width, self.font_px());
        let has_more = self.text_layout.height > self.collapse_height();
        trace!(
            content_height = self.text_layout.height,
            max_height = self.collapse_height(),
            has_more,
            "description measured"
        );
        self.state.has_more = has_more;
        self.sync_toggle();
        self.place_toggle();

        LayoutResult {
            size: Size::new(bounds.width, self.visible_height()),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.is_empty() {
            return;
        }

        let clipped = self.state.is_clipped();
        let clip_height = self.collapse_height();
        if clipped {
            canvas.push_clip(self.bounds.with_height(clip_height));
        }

        for line in &self.text_layout.lines {
            if clipped && line.position.y >= clip_height {
                break;
            }
            let origin = Point::new(
                self.bounds.x + line.position.x,
                self.bounds.y + line.position.y,
            );
            if self.selection.is_some_and(|s| !s.is_empty()) {
                let width = line.text.chars().count() as f32 * line.style.size * CHAR_WIDTH_EM;
                canvas.fill_rect(
                    Rect::new(origin.x, origin.y, width, line.height),
                    SELECTION_COLOR,
                );
            }
            canvas.draw_text(&line.text, origin, &line.style);
        }

        if clipped {
            canvas.pop_clip();
        }

        for button in &self.toggle_button {
            button.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.is_empty() {
            return None;
        }

        match event {
            Event::GestureTap { position, count } if self.bounds.contains_point(position) => {
                if *count >= 2 {
                    self.select_all()
                        .map(|text| Box::new(ContentSelected { text }) as Box<dyn Any + Send>)
                } else {
                    None
                }
            }
            Event::MouseMove { position } => {
                let inside = self.toggle_contains(position);
                let crossing = if inside == self.toggle_hovered {
                    None
                } else if inside {
                    Some(Event::MouseEnter)
                } else {
                    Some(Event::MouseLeave)
                };
                self.toggle_hovered = inside;
                crossing.and_then(|e| self.route_to_toggle(&e))
            }
            Event::MouseLeave => {
                self.toggle_hovered = false;
                self.route_to_toggle(event)
            }
            Event::MouseDown { .. } | Event::MouseUp { .. } => self.route_to_toggle(event),
            Event::FocusIn => {
                self.focused = true;
                None
            }
            Event::FocusOut => {
                self.focused = false;
                None
            }
            Event::KeyDown { key: Key::Escape } => {
                self.selection = None;
                None
            }
            Event::KeyDown { .. } | Event::KeyUp { .. } if self.focused => {
                self.route_to_toggle(event)
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.toggle_button
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.toggle_button
    }

    fn is_interactive(&self) -> bool {
        !self.is_empty()
    }

    fn is_focusable(&self) -> bool {
        self.state.has_more
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

impl Brick for Description {
    fn brick_name(&self) -> &'static str {
        "Description"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::TextVisible,
            !self.document.is_empty(),
            "Description is empty",
        );
        verification
    }

    fn to_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let test_id = self.test_id_value.as_deref().unwrap_or("description");
        let clip = if self.state.is_clipped() {
            format!(r#" style="max-height: {}px""#, self.collapse_height())
        } else {
            String::new()
        };
        let toggle = self
            .state
            .toggle_label()
            .map(|label| {
                format!(
                    r#"<div class="dossier-description-toggle"><button type="button" class="brick-button" data-testid="{TOGGLE_TEST_ID}">{label}</button></div>"#
                )
            })
            .unwrap_or_default();
        format!(
            r#"<div class="dossier-description" data-testid="{}" data-expanded="{}"{clip}>{toggle}<div class="dossier-description-content">{}</div></div>"#,
            escape_html(test_id),
            self.state.expanded,
            self.document.to_html()
        )
    }

    fn to_css(&self) -> String {
        let font_size = self.config.font_size.to_css();
        format!(
            r".dossier-description {{
    position: relative;
    overflow: hidden;
    font-size: {font_size};
}}
.dossier-description p:last-child {{
    margin-bottom: 0;
}}
.dossier-description code,
.dossier-description pre {{
    font-size: {font_size};
}}
.dossier-description-content {{
    overflow-x: auto;
}}
.dossier-description-toggle {{
    position: absolute;
    padding: 0 14px;
    bottom: 0;
    left: 50%;
    transform: translate(-50%);
}}"
        )
    }
}
