//! List that shows its first few rows and hides the rest behind a button.

use crate::button::{Button, ButtonClicked};
use crate::text::Text;
use dossier_core::{
    escape_html,
    widget::{AccessibleRole, LayoutResult},
    Brick, BrickAssertion, BrickVerification, Canvas, Constraints, Event, Rect, Size,
    TypeId, Widget,
};
use dossier_yaml::AssetKey;
use std::any::Any;
use tracing::debug;

/// Rows shown before the list is expanded.
pub const DISPLAYED_BY_DEFAULT: usize = 20;

/// Test ID of the show-more/show-less button.
pub const LIST_TOGGLE_TEST_ID: &str = "truncated-list-toggle";

const ROW_FONT: f32 = 14.0;
const ROW_GAP: f32 = 4.0;

/// Emitted when the number of visible rows changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedListChanged {
    /// Rows now visible
    pub displayed: usize,
}

/// Sorted list with a "Show N more" / "Show less" toggle.
pub struct TruncatedList {
    items: Vec<String>,
    displayed_by_default: usize,
    displayed: usize,
    rows: Vec<Box<dyn Widget>>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl TruncatedList {
    /// Create a list. Items are sorted.
    #[must_use]
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        items.sort();
        Self::from_sorted(items)
    }

    /// List of asset keys, ordered segment by segment and shown by display name.
    #[must_use]
    pub fn from_assets(assets: &[AssetKey]) -> Self {
        let mut keys = assets.to_vec();
        keys.sort();
        Self::from_sorted(keys.iter().map(AssetKey::display_name).collect())
    }

    fn from_sorted(items: Vec<String>) -> Self {
        let mut list = Self {
            items,
            displayed_by_default: DISPLAYED_BY_DEFAULT,
            displayed: DISPLAYED_BY_DEFAULT,
            rows: Vec::new(),
            test_id_value: None,
            bounds: Rect::default(),
        };
        list.rebuild();
        list
    }

    /// Set how many rows are shown collapsed.
    #[must_use]
    pub fn displayed_by_default(mut self, count: usize) -> Self {
        self.displayed_by_default = count;
        self.displayed = count;
        self.rebuild();
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// All items, sorted.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of visible rows.
    #[must_use]
    pub fn displayed_count(&self) -> usize {
        self.displayed.min(self.items.len())
    }

    /// Visible items.
    #[must_use]
    pub fn visible_items(&self) -> &[String] {
        self.items.get(..self.displayed_count()).unwrap_or_default()
    }

    /// Number of hidden rows.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.items.len() - self.displayed_count()
    }

    /// Label of the toggle, if one is shown.
    #[must_use]
    pub fn toggle_label(&self) -> Option<String> {
        let hidden = self.hidden_count();
        if hidden > 0 {
            Some(format!("Show {hidden} more"))
        } else if self.items.len() > self.displayed_by_default {
            Some("Show less".to_string())
        } else {
            None
        }
    }

    /// Reveal every row.
    pub fn show_all(&mut self) {
        self.displayed = usize::MAX;
        self.rebuild();
    }

    /// Back to the default number of rows.
    pub fn show_less(&mut self) {
        self.displayed = self.displayed_by_default;
        self.rebuild();
    }

    fn toggle(&mut self) -> usize {
        if self.hidden_count() > 0 {
            self.show_all();
        } else {
            self.show_less();
        }
        let displayed = self.displayed_count();
        debug!(displayed, total = self.items.len(), "truncated list toggled");
        displayed
    }

    fn rebuild(&mut self) {
        let mut rows: Vec<Box<dyn Widget>> = self
            .visible_items()
            .iter()
            .map(|item| Box::new(Text::new(item.as_str()).font_size(ROW_FONT)) as Box<dyn Widget>)
            .collect();
        if let Some(label) = self.toggle_label() {
            rows.push(Box::new(Button::small(label).with_test_id(LIST_TOGGLE_TEST_ID)));
        }
        self.rows = rows;
        if self.bounds.width > 0.0 {
            self.layout(self.bounds);
        }
    }

    fn stacked_height(&self, constraints: Constraints) -> f32 {
        let heights: Vec<f32> = self
            .rows
            .iter()
            .map(|row| row.measure(constraints).height)
            .collect();
        let gaps = heights.len().saturating_sub(1) as f32 * ROW_GAP;
        heights.iter().sum::<f32>() + gaps
    }
}

impl Widget for TruncatedList {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = constraints.available_width(
            self.rows
                .iter()
                .map(|row| row.measure(Constraints::unbounded()).width)
                .fold(0.0, f32::max),
        );
        constraints.constrain(Size::new(width, self.stacked_height(constraints)))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let mut y = bounds.y;
        for row in &mut self.rows {
            let size = row.measure(Constraints::width(bounds.width));
            row.layout(Rect::new(bounds.x, y, size.width, size.height));
            y += size.height + ROW_GAP;
        }
        let height = (y - bounds.y - ROW_GAP).max(0.0);
        LayoutResult {
            size: Size::new(bounds.width, height),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for row in &self.rows {
            row.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let clicked = self
            .rows
            .iter_mut()
            .filter(|row| row.test_id() == Some(LIST_TOGGLE_TEST_ID))
            .filter_map(|row| row.event(event))
            .any(|message| message.is::<ButtonClicked>());
        if clicked {
            let displayed = self.toggle();
            Some(Box::new(TruncatedListChanged { displayed }))
        } else {
            None
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.rows
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.rows
    }

    fn is_interactive(&self) -> bool {
        self.toggle_label().is_some()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::List
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for TruncatedList {
    fn brick_name(&self) -> &'static str {
        "TruncatedList"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification
    }

    fn to_html(&self) -> String {
        let test_id = self.test_id_value.as_deref().unwrap_or("truncated-list");
        let items: String = self
            .visible_items()
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect();
        let toggle = self
            .toggle_label()
            .map(|label| {
                format!(
                    r#"<button type="button" class="brick-button" data-testid="{LIST_TOGGLE_TEST_ID}">{label}</button>"#
                )
            })
            .unwrap_or_default();
        format!(
            r#"<div class="brick-truncated-list" data-testid="{}"><ul>{items}</ul>{toggle}</div>"#,
            escape_html(test_id)
        )
    }

    fn to_css(&self) -> String {
        format!(
            r".brick-truncated-list ul {{
    list-style: none;
    margin: 0;
    padding: 0;
}}
.brick-truncated-list li {{
    font-size: {ROW_FONT}px;
    margin-bottom: {ROW_GAP}px;
}}"
        )
    }
}
