//! Code location listing with a filter field.

use crate::text::Text;
use dossier_core::{
    escape_html,
    widget::{AccessibleRole, FontWeight, LayoutResult},
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, Event, Key,
    Rect, Size, TypeId, Widget,
};
use std::any::Any;
use tracing::debug;

/// Above this many entries the header shows a filter field.
pub const SEARCH_THRESHOLD: usize = 10;

/// Placeholder of the filter field.
pub const SEARCH_PLACEHOLDER: &str = "Filter code locations by name\u{2026}";

const HEADER_FONT: f32 = 14.0;
const ROW_FONT: f32 = 14.0;
const ROW_GAP: f32 = 4.0;
const HEADER_HEIGHT: f32 = 64.0;
const PADDING_X: f32 = 24.0;

/// Emitted when the filter query changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLocationsFiltered {
    /// Query as typed
    pub query: String,
    /// Entries matching it
    pub matches: usize,
}

/// Header and rows of the code locations page.
pub struct CodeLocationsHeader {
    entries: Vec<String>,
    query: String,
    loading: bool,
    children: Vec<Box<dyn Widget>>,
    focused: bool,
    bounds: Rect,
}

impl CodeLocationsHeader {
    /// Create from location names.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut header = Self {
            entries: entries.into_iter().map(Into::into).collect(),
            query: String::new(),
            loading: false,
            children: Vec::new(),
            focused: false,
            bounds: Rect::default(),
        };
        header.rebuild();
        header
    }

    /// Mark the entries as still loading.
    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    /// Update the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.rebuild();
    }

    /// Replace the entries. The query is kept.
    pub fn set_entries(&mut self, entries: Vec<String>) {
        self.entries = entries;
        self.rebuild();
    }

    /// Replace the query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.rebuild();
    }

    /// Current query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Unfiltered number of entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the filter field replaces the subtitle.
    #[must_use]
    pub fn show_search(&self) -> bool {
        self.entry_count() > SEARCH_THRESHOLD
    }

    /// Entries whose name contains the query, ignoring case.
    #[must_use]
    pub fn filtered(&self) -> Vec<&str> {
        let query = self.query.to_lowercase();
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|entry| entry.to_lowercase().contains(&query))
            .collect()
    }

    /// Subtitle shown when there is no filter field.
    #[must_use]
    pub fn subtitle(&self) -> String {
        match self.entry_count() {
            _ if self.loading => "Code locations".to_string(),
            0 => "Code locations".to_string(),
            1 => "1 code location".to_string(),
            n => format!("{n} code locations"),
        }
    }

    /// Count label next to the filter field.
    #[must_use]
    pub fn count_label(&self) -> Option<String> {
        self.show_search()
            .then(|| format!("{} code locations", self.entry_count()))
    }

    fn rebuild(&mut self) {
        let mut children: Vec<Box<dyn Widget>> = Vec::new();
        if self.show_search() {
            let (shown, color) = if self.query.is_empty() {
                (SEARCH_PLACEHOLDER, Color::TEXT_LIGHT)
            } else {
                (self.query.as_str(), Color::TEXT_DEFAULT)
            };
            children.push(Box::new(
                Text::new(shown)
                    .font_size(HEADER_FONT)
                    .color(color)
                    .role(AccessibleRole::SearchBox)
                    .with_test_id("code-locations-search"),
            ));
            if let Some(label) = self.count_label() {
                children.push(Box::new(
                    Text::new(label)
                        .font_size(HEADER_FONT)
                        .with_test_id("code-locations-count"),
                ));
            }
        } else {
            children.push(Box::new(
                Text::new(self.subtitle())
                    .font_size(HEADER_FONT)
                    .font_weight(FontWeight::Semibold)
                    .role(AccessibleRole::Heading)
                    .with_test_id("code-locations-subtitle"),
            ));
        }
        let rows: Vec<Box<dyn Widget>> = self
            .filtered()
            .into_iter()
            .map(|entry| {
                Box::new(
                    Text::new(entry)
                        .font_size(ROW_FONT)
                        .role(AccessibleRole::ListItem),
                ) as Box<dyn Widget>
            })
            .collect();
        children.extend(rows);
        self.children = children;
        if self.bounds.width > 0.0 {
            self.layout(self.bounds);
        }
    }

    fn header_len(&self) -> usize {
        if self.show_search() {
            2
        } else {
            1
        }
    }

    fn edited(&mut self) -> Option<Box<dyn Any + Send>> {
        self.rebuild();
        let matches = self.filtered().len();
        debug!(query = %self.query, matches, "code locations filtered");
        Some(Box::new(CodeLocationsFiltered {
            query: self.query.clone(),
            matches,
        }))
    }

    fn rows_height(&self) -> f32 {
        let rows = self.children.len().saturating_sub(self.header_len());
        rows as f32 * (ROW_FONT * 1.2 + ROW_GAP)
    }
}

impl Widget for CodeLocationsHeader {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = constraints.available_width(400.0 + PADDING_X * 2.0);
        constraints.constrain(Size::new(width, HEADER_HEIGHT + self.rows_height()))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let header_len = self.header_len();
        let line = HEADER_FONT * 1.2;
        let header_y = bounds.y + (HEADER_HEIGHT - line) / 2.0;

        for (i, child) in self.children.iter_mut().enumerate() {
            let size = child.measure(Constraints::unbounded());
            let rect = match i {
                0 => Rect::new(bounds.x + PADDING_X, header_y, size.width, size.height),
                1 if header_len == 2 => Rect::new(
                    bounds.right() - PADDING_X - size.width,
                    header_y,
                    size.width,
                    size.height,
                ),
                _ => {
                    let row = (i - header_len) as f32;
                    Rect::new(
                        bounds.x + PADDING_X,
                        bounds.y + HEADER_HEIGHT + row * (ROW_FONT * 1.2 + ROW_GAP),
                        size.width,
                        size.height,
                    )
                }
            };
            child.layout(rect);
        }

        LayoutResult {
            size: Size::new(bounds.width, HEADER_HEIGHT + self.rows_height()),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.show_search() {
            if let Some(field) = self.children.first() {
                canvas.stroke_rect(field.bounds().inset(-6.0), Color::TEXT_LIGHT, 1.0);
            }
        }
        for child in &self.children {
            child.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if !self.show_search() {
            return None;
        }
        match event {
            Event::FocusIn => {
                self.focused = true;
                None
            }
            Event::FocusOut => {
                self.focused = false;
                None
            }
            Event::TextInput { text } if self.focused => {
                self.query.push_str(text);
                self.edited()
            }
            Event::KeyDown {
                key: Key::Backspace,
            } if self.focused && !self.query.is_empty() => {
                self.query.pop();
                self.edited()
            }
            Event::KeyDown { key: Key::Escape } if self.focused && !self.query.is_empty() => {
                self.query.clear();
                self.edited()
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn is_interactive(&self) -> bool {
        self.show_search()
    }

    fn is_focusable(&self) -> bool {
        self.show_search()
    }

    fn accessible_name(&self) -> Option<&str> {
        Some("Code locations")
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Region
    }

    fn test_id(&self) -> Option<&str> {
        Some("code-locations")
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for CodeLocationsHeader {
    fn brick_name(&self) -> &'static str {
        "CodeLocationsHeader"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(BrickAssertion::TextVisible, !self.children.is_empty(), "No header");
        verification
    }

    fn to_html(&self) -> String {
        let header = if self.show_search() {
            format!(
                r#"<input type="search" data-testid="code-locations-search" placeholder="{}" value="{}"><div data-testid="code-locations-count">{}</div>"#,
                escape_html(SEARCH_PLACEHOLDER),
                escape_html(&self.query),
                self.count_label().unwrap_or_default()
            )
        } else {
            format!(
                r#"<h4 id="repository-locations" data-testid="code-locations-subtitle">{}</h4>"#,
                self.subtitle()
            )
        };
        let rows: String = self
            .filtered()
            .iter()
            .map(|entry| format!("<li>{}</li>", escape_html(entry)))
            .collect();
        format!(
            r#"<div class="dossier-code-locations" data-testid="code-locations"><header>{header}</header><ul>{rows}</ul></div>"#
        )
    }

    fn to_css(&self) -> String {
        format!(
            r".dossier-code-locations header {{
    display: flex;
    justify-content: space-between;
    align-items: center;
    height: {HEADER_HEIGHT}px;
    padding: 16px {PADDING_X}px;
}}
.dossier-code-locations input[type=search] {{
    width: 400px;
}}"
        )
    }
}
