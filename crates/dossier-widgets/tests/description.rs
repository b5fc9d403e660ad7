//! Description panel driven through the test harness.

use dossier_core::{ClipboardFormat, Clipboard, Key, Point, Widget};
use dossier_test::Harness;
use dossier_widgets::{
    CodeLocationsFiltered, CodeLocationsHeader, ContentSelected, Description,
    DescriptionSection, DescriptionToggled, LinkActivated, TruncatedList, TruncatedListChanged,
};

const TOGGLE: &str = "[data-testid='description-toggle']";

fn paragraphs(n: usize) -> String {
    (0..n)
        .map(|i| format!("    Paragraph number {i}."))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn tall() -> Description {
    Description::new(paragraphs(12)).font_size(10.0).max_height(100.0)
}

#[test]
fn short_description_has_no_toggle() {
    let harness = Harness::new(Description::new("Just one line.")).viewport(600.0, 400.0);
    harness.assert_not_exists(TOGGLE);
    assert!(!harness.root().has_more());
    assert!(harness.paint().clips().is_empty());
}

#[test]
fn missing_description_renders_nothing() {
    let harness = Harness::new(Description::empty());
    assert!(harness.paint().is_empty());
    assert_eq!(harness.html(), "");
    assert_eq!(harness.root().bounds().height, 0.0);
}

#[test]
fn tall_description_collapses_and_expands() {
    let mut harness = Harness::new(tall()).viewport(600.0, 400.0);
    harness.assert_text(TOGGLE, "Show more");
    assert_eq!(harness.root().bounds().height, 100.0);
    assert!(harness.html().contains("max-height: 100px"));

    harness.click(TOGGLE);
    assert_eq!(
        harness.last_message::<DescriptionToggled>(),
        Some(&DescriptionToggled { expanded: true })
    );
    harness.assert_text(TOGGLE, "Show less");
    assert!(harness.root().bounds().height > 100.0);
    assert!(harness.paint().clips().is_empty());
    assert!(!harness.html().contains("max-height"));

    harness.click(TOGGLE);
    harness.assert_text(TOGGLE, "Show more");
    assert_eq!(harness.root().bounds().height, 100.0);
    assert_eq!(harness.message_count::<DescriptionToggled>(), 2);
}

#[test]
fn keyboard_activates_toggle_when_focused() {
    let mut harness = Harness::new(tall()).viewport(600.0, 400.0);
    harness.press_key(Key::Enter);
    assert!(!harness.root().is_expanded());

    harness.send(dossier_core::Event::FocusIn).press_key(Key::Space);
    assert!(harness.root().is_expanded());
}

#[test]
fn wider_viewport_removes_overflow() {
    let text = "word ".repeat(60);
    let mut harness = Harness::new(Description::new(text).font_size(10.0).max_height(30.0))
        .viewport(200.0, 400.0);
    harness.assert_exists(TOGGLE);

    harness = harness.viewport(4000.0, 400.0);
    harness.assert_not_exists(TOGGLE);
}

#[test]
fn double_click_selects_and_copies() {
    let mut harness =
        Harness::new(Description::new("    Select *all*\n    of this.")).viewport(600.0, 400.0);
    harness.double_click_at(Point::new(5.0, 5.0));

    let selected = harness.last_message::<ContentSelected>().cloned();
    assert_eq!(
        selected,
        Some(ContentSelected {
            text: "Select all of this.".to_string()
        })
    );

    let mut clipboard = Clipboard::new();
    assert!(harness.root().copy_selection(&mut clipboard));
    assert_eq!(clipboard.read_text(), Some("Select all of this."));
    assert_eq!(
        clipboard.read().get(&ClipboardFormat::Html),
        Some("<p>Select <em>all</em> of this.</p>")
    );
}

#[test]
fn double_click_outside_selects_nothing() {
    let mut harness = Harness::new(Description::new("text")).viewport(600.0, 400.0);
    harness.double_click_at(Point::new(590.0, 390.0));
    assert_eq!(harness.message_count::<ContentSelected>(), 0);
    assert!(harness.root().selection().is_none());
}

#[test]
fn section_falls_back_to_empty_state() {
    let mut harness = Harness::new(DescriptionSection::new(None)).viewport(600.0, 400.0);
    harness
        .assert_exists("EmptyState")
        .assert_not_exists("Description")
        .assert_text("[aria-label='No description found']", "No description found");

    harness.click("[data-testid='empty-state-learn-more']");
    let link = harness.last_message::<LinkActivated>().cloned();
    assert!(link.is_some_and(|l| l.url.contains("software-defined-assets")));
}

#[test]
fn section_toggle_is_reachable() {
    let text = (0..40)
        .map(|i| format!("Line {i}"))
        .collect::<Vec<_>>()
        .join("\n\n");
    let mut harness = Harness::new(DescriptionSection::new(Some(text))).viewport(600.0, 800.0);
    assert_eq!(harness.root().bounds().height, 260.0);
    harness.assert_exists("Description").assert_text(TOGGLE, "Show more");
    harness.click(TOGGLE);
    harness.assert_text(TOGGLE, "Show less");
}

#[test]
fn related_assets_list_expands() {
    let names: Vec<String> = (0..25).map(|i| format!("asset_{i:02}")).collect();
    let mut harness = Harness::new(TruncatedList::new(names)).viewport(400.0, 2000.0);
    harness
        .assert_count("Text", 20)
        .assert_text("[data-testid='truncated-list-toggle']", "Show 5 more");

    harness.click("[data-testid='truncated-list-toggle']");
    assert_eq!(
        harness.last_message::<TruncatedListChanged>(),
        Some(&TruncatedListChanged { displayed: 25 })
    );
    harness
        .assert_count("Text", 25)
        .assert_text("[data-testid='truncated-list-toggle']", "Show less");

    harness.click("[data-testid='truncated-list-toggle']");
    harness.assert_count("Text", 20);
}

#[test]
fn code_locations_filter() {
    let entries: Vec<String> = (0..15).map(|i| format!("location_{i}")).collect();
    let mut harness = Harness::new(CodeLocationsHeader::new(entries)).viewport(800.0, 800.0);
    harness
        .assert_exists("[role='searchbox']")
        .assert_text("[data-testid='code-locations-count']", "15 code locations")
        .assert_count("[role='listitem']", 15);

    harness.type_text("[role='searchbox']", "_1");
    assert_eq!(
        harness.last_message::<CodeLocationsFiltered>(),
        Some(&CodeLocationsFiltered {
            query: "_1".to_string(),
            matches: 6,
        })
    );
    harness
        .assert_text("[role='searchbox']", "_1")
        .assert_count("[role='listitem']", 6)
        .assert_text("[data-testid='code-locations-count']", "15 code locations");
}

#[test]
fn code_locations_subtitle_without_search() {
    let harness = Harness::new(CodeLocationsHeader::new(["only"]));
    harness
        .assert_not_exists("[role='searchbox']")
        .assert_text("[data-testid='code-locations-subtitle']", "1 code location");
}
