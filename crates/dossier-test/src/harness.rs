//! Test harness for Dossier widgets.

use dossier_core::{
    Constraints, Event, Key, MouseButton, Point, RecordingCanvas, Rect, TapRecognizer, Widget,
};
use std::any::Any;
use std::collections::VecDeque;
use std::time::Instant;

use crate::selector::Selector;

/// Drives a widget through layout, events and paint the way a host would.
///
/// The root is laid out at the viewport width with unbounded height, and is
/// laid out again after every batch of events so that derived state (such as
/// whether content overflows) is always current.
pub struct Harness<W: Widget> {
    root: W,
    event_queue: VecDeque<Event>,
    messages: Vec<Box<dyn Any + Send>>,
    taps: TapRecognizer,
    viewport: Rect,
}

impl<W: Widget> Harness<W> {
    /// Create a new harness with a root widget.
    pub fn new(root: W) -> Self {
        let mut harness = Self {
            root,
            event_queue: VecDeque::new(),
            messages: Vec::new(),
            taps: TapRecognizer::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
        };
        harness.relayout();
        harness
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    /// The root widget.
    pub fn root(&self) -> &W {
        &self.root
    }

    /// Measure and lay out the root at the viewport width.
    fn relayout(&mut self) {
        let size = self.root.measure(Constraints::width(self.viewport.width));
        self.root.layout(Rect::new(
            self.viewport.x,
            self.viewport.y,
            self.viewport.width,
            size.height,
        ));
    }

    // === Event Simulation ===

    /// Click the centre of the widget matching the selector.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        if let Some(bounds) = self.query_bounds(selector) {
            let center = bounds.center();
            self.event_queue
                .push_back(Event::MouseMove { position: center });
            self.push_press(center);
            self.process_events();
        }
        self
    }

    /// Double-click the centre of the widget matching the selector.
    ///
    /// Raw mouse events go through a [`TapRecognizer`]; the widget receives
    /// both the raw events and the recognised taps.
    pub fn double_click(&mut self, selector: &str) -> &mut Self {
        if let Some(bounds) = self.query_bounds(selector) {
            self.double_click_at(bounds.center());
        }
        self
    }

    /// Double-click at a point.
    pub fn double_click_at(&mut self, position: Point) -> &mut Self {
        let now = Instant::now();
        self.taps.reset();
        for _ in 0..2 {
            for event in [
                Event::MouseDown {
                    position,
                    button: MouseButton::Left,
                },
                Event::MouseUp {
                    position,
                    button: MouseButton::Left,
                },
            ] {
                let tap = self.taps.process_at(&event, now);
                self.event_queue.push_back(event);
                if let Some(tap) = tap {
                    self.event_queue.push_back(tap);
                }
            }
        }
        self.process_events();
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Simulate typing text into a widget.
    pub fn type_text(&mut self, selector: &str, text: &str) -> &mut Self {
        if self.exists(selector) {
            self.event_queue.push_back(Event::FocusIn);
            for c in text.chars() {
                self.event_queue.push_back(Event::TextInput {
                    text: c.to_string(),
                });
            }
            self.process_events();
        }
        self
    }

    /// Deliver a single event.
    pub fn send(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    // === Messages ===

    /// Most recent message of type `T`.
    #[must_use]
    pub fn last_message<T: 'static>(&self) -> Option<&T> {
        self.messages
            .iter()
            .rev()
            .find_map(|m| m.downcast_ref::<T>())
    }

    /// Number of messages of type `T`.
    #[must_use]
    pub fn message_count<T: 'static>(&self) -> usize {
        self.messages.iter().filter(|m| m.is::<T>()).count()
    }

    // === Queries ===

    /// Query for a widget matching the selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<&dyn Widget> {
        let sel = Selector::parse(selector).ok()?;
        find_widget(&self.root, &sel)
    }

    /// Query for all widgets matching the selector.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<&dyn Widget> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        find_all_widgets(&self.root, &sel, &mut results);
        results
    }

    /// Accessible name of the matching widget, or empty.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .and_then(|w| w.accessible_name())
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Check if a widget exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// Paint the root into a fresh recording canvas.
    #[must_use]
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    /// HTML rendering of the root.
    #[must_use]
    pub fn html(&self) -> String {
        self.root.to_html()
    }

    // === Assertions ===

    /// Assert that a widget exists.
    ///
    /// # Panics
    ///
    /// Panics if the widget does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected widget matching '{selector}' to exist"
        );
        self
    }

    /// Assert that a widget does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the widget exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected widget matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching widgets.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} widgets matching '{selector}' but found {actual}"
        );
        self
    }

    // === Internal ===

    fn push_press(&mut self, position: Point) {
        self.event_queue.push_back(Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
    }

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(message) = self.root.event(&event) {
                self.messages.push(message);
            }
        }
        self.relayout();
    }

    fn query_bounds(&self, selector: &str) -> Option<Rect> {
        self.query(selector).map(|w| w.bounds())
    }
}

fn find_widget<'a>(widget: &'a dyn Widget, selector: &Selector) -> Option<&'a dyn Widget> {
    if selector.matches(widget) {
        return Some(widget);
    }
    widget
        .children()
        .iter()
        .find_map(|child| find_widget(child.as_ref(), selector))
}

fn find_all_widgets<'a>(
    widget: &'a dyn Widget,
    selector: &Selector,
    results: &mut Vec<&'a dyn Widget>,
) {
    if selector.matches(widget) {
        results.push(widget);
    }
    for child in widget.children() {
        find_all_widgets(child.as_ref(), selector, results);
    }
}
