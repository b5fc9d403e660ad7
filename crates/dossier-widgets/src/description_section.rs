//! Description slot of the asset overview.

use crate::description::Description;
use crate::empty_state::EmptyState;
use dossier_core::{
    widget::{AccessibleRole, LayoutResult},
    Brick, BrickAssertion, BrickVerification, Canvas, Constraints, Event, Rect, Size,
    TypeId, Widget,
};
use dossier_yaml::{DisplayConfig, PanelManifest};
use std::any::Any;

/// Title of the placeholder shown without a description.
pub const NO_DESCRIPTION_TITLE: &str = "No description found";

/// Body of the placeholder shown without a description.
pub const NO_DESCRIPTION_BODY: &str =
    "You can add a description to any asset by adding a `description` argument to it.";

/// Where the placeholder's link points.
pub const NO_DESCRIPTION_DOCS_URL: &str =
    "https://docs.dagster.io/_apidocs/assets#software-defined-assets";

/// Overview description, or a placeholder when there is none.
pub struct DescriptionSection {
    content: Vec<Box<dyn Widget>>,
    has_description: bool,
    bounds: Rect,
}

impl DescriptionSection {
    /// Build with the overview's 260px collapse height.
    #[must_use]
    pub fn new(description: Option<String>) -> Self {
        Self::with_config(description, DisplayConfig::overview())
    }

    /// Build with explicit display settings.
    #[must_use]
    pub fn with_config(description: Option<String>, config: DisplayConfig) -> Self {
        let description = Description::optional(description)
            .with_config(config)
            .with_test_id("asset-description");
        let has_description = !description.is_empty();
        let content: Box<dyn Widget> = if has_description {
            Box::new(description)
        } else {
            Box::new(
                EmptyState::new(NO_DESCRIPTION_TITLE, NO_DESCRIPTION_BODY)
                    .learn_more(NO_DESCRIPTION_DOCS_URL)
                    .with_test_id("asset-description-empty"),
            )
        };
        Self {
            content: vec![content],
            has_description,
            bounds: Rect::default(),
        }
    }

    /// Build from a panel manifest.
    #[must_use]
    pub fn from_manifest(manifest: &PanelManifest) -> Self {
        Self::with_config(manifest.description.clone(), manifest.display_config())
    }

    /// Whether a description (rather than the placeholder) is shown.
    #[must_use]
    pub const fn has_description(&self) -> bool {
        self.has_description
    }
}

impl Widget for DescriptionSection {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        self.content
            .first()
            .map_or(Size::ZERO, |child| child.measure(constraints))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.content
            .first_mut()
            .map(|child| child.layout(bounds))
            .unwrap_or_default()
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for child in &self.content {
            child.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        self.content.first_mut().and_then(|child| child.event(event))
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.content
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.content
    }

    fn is_interactive(&self) -> bool {
        self.content.iter().any(|child| child.is_interactive())
    }

    fn accessible_name(&self) -> Option<&str> {
        Some("Description")
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Region
    }

    fn test_id(&self) -> Option<&str> {
        Some("description-section")
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for DescriptionSection {
    fn brick_name(&self) -> &'static str {
        "DescriptionSection"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible]
    }

    fn verify(&self) -> BrickVerification {
        self.content
            .first()
            .map(|child| child.verify())
            .unwrap_or_default()
    }

    fn to_html(&self) -> String {
        let inner: String = self.content.iter().map(|child| child.to_html()).collect();
        format!(r#"<div class="dossier-description-section" data-testid="description-section">{inner}</div>"#)
    }

    fn to_css(&self) -> String {
        self.content
            .iter()
            .map(|child| child.to_css())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
