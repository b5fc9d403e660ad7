//! Tap recognition from raw mouse events.
//!
//! A press and release close together in space make a tap. Taps that follow
//! each other within `double_tap_ms` and `tap_slop` pixels increase the tap
//! count, so the second one is reported as a double tap.

use crate::event::{Event, MouseButton};
use crate::geometry::Point;
use std::time::{Duration, Instant};

/// Configuration for tap recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Maximum movement between press and release, and between taps, in pixels.
    pub tap_slop: u32,
    /// Maximum time between taps for a double tap.
    pub double_tap_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: 10,
            double_tap_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LastTap {
    position: Point,
    time: Instant,
    count: u8,
}

/// Turns `MouseDown`/`MouseUp` pairs into [`Event::GestureTap`] events.
#[derive(Debug, Default)]
pub struct TapRecognizer {
    config: GestureConfig,
    press: Option<Point>,
    last_tap: Option<LastTap>,
}

impl TapRecognizer {
    /// Create a recognizer with default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recognizer with custom config.
    #[must_use]
    pub const fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
            last_tap: None,
        }
    }

    /// Get the current configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Process an event using the current time.
    pub fn process(&mut self, event: &Event) -> Option<Event> {
        self.process_at(event, Instant::now())
    }

    /// Process an event observed at `now`.
    pub fn process_at(&mut self, event: &Event, now: Instant) -> Option<Event> {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                self.press = Some(*position);
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let press = self.press.take()?;
                if press.distance(position) > self.slop() {
                    return None;
                }
                Some(self.tap(*position, now))
            }
            Event::MouseLeave => {
                self.press = None;
                None
            }
            _ => None,
        }
    }

    /// Forget any pending press and tap history.
    pub fn reset(&mut self) {
        self.press = None;
        self.last_tap = None;
    }

    fn slop(&self) -> f32 {
        self.config.tap_slop as f32
    }

    fn tap(&mut self, position: Point, now: Instant) -> Event {
        let window = Duration::from_millis(self.config.double_tap_ms);

        let count = match self.last_tap {
            Some(last)
                if now.saturating_duration_since(last.time) < window
                    && position.distance(&last.position) < self.slop() =>
            {
                last.count.saturating_add(1)
            }
            _ => 1,
        };

        self.last_tap = Some(LastTap {
            position,
            time: now,
            count,
        });

        Event::GestureTap { position, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(rec: &mut TapRecognizer, at: Point, now: Instant) -> Option<Event> {
        rec.process_at(
            &Event::MouseDown {
                position: at,
                button: MouseButton::Left,
            },
            now,
        );
        rec.process_at(
            &Event::MouseUp {
                position: at,
                button: MouseButton::Left,
            },
            now,
        )
    }

    #[test]
    fn test_default_config() {
        let config = GestureConfig::default();
        assert_eq!(config.double_tap_ms, 300);
        assert_eq!(config.tap_slop, 10);
    }

    #[test]
    fn test_single_tap() {
        let mut rec = TapRecognizer::new();
        let p = Point::new(5.0, 5.0);
        let tap = click(&mut rec, p, Instant::now());
        assert_eq!(tap, Some(Event::GestureTap { position: p, count: 1 }));
    }

    #[test]
    fn test_double_tap_within_window() {
        let mut rec = TapRecognizer::new();
        let p = Point::new(5.0, 5.0);
        let t0 = Instant::now();
        click(&mut rec, p, t0);
        let tap = click(&mut rec, p, t0 + Duration::from_millis(120));
        assert_eq!(tap, Some(Event::GestureTap { position: p, count: 2 }));
    }

    #[test]
    fn test_slow_second_tap_starts_over() {
        let mut rec = TapRecognizer::new();
        let p = Point::new(5.0, 5.0);
        let t0 = Instant::now();
        click(&mut rec, p, t0);
        let tap = click(&mut rec, p, t0 + Duration::from_millis(400));
        assert_eq!(tap, Some(Event::GestureTap { position: p, count: 1 }));
    }

    #[test]
    fn test_distant_second_tap_starts_over() {
        let mut rec = TapRecognizer::new();
        let t0 = Instant::now();
        click(&mut rec, Point::new(0.0, 0.0), t0);
        let tap = click(&mut rec, Point::new(50.0, 0.0), t0 + Duration::from_millis(50));
        assert!(matches!(tap, Some(Event::GestureTap { count: 1, .. })));
    }

    #[test]
    fn test_drag_is_not_a_tap() {
        let mut rec = TapRecognizer::new();
        let now = Instant::now();
        rec.process_at(
            &Event::MouseDown {
                position: Point::new(0.0, 0.0),
                button: MouseButton::Left,
            },
            now,
        );
        let up = rec.process_at(
            &Event::MouseUp {
                position: Point::new(40.0, 0.0),
                button: MouseButton::Left,
            },
            now,
        );
        assert!(up.is_none());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut rec = TapRecognizer::new();
        let up = rec.process(&Event::MouseUp {
            position: Point::ORIGIN,
            button: MouseButton::Left,
        });
        assert!(up.is_none());
    }

    #[test]
    fn test_right_button_ignored() {
        let mut rec = TapRecognizer::new();
        let now = Instant::now();
        rec.process_at(
            &Event::MouseDown {
                position: Point::ORIGIN,
                button: MouseButton::Right,
            },
            now,
        );
        let up = rec.process_at(
            &Event::MouseUp {
                position: Point::ORIGIN,
                button: MouseButton::Right,
            },
            now,
        );
        assert!(up.is_none());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut rec = TapRecognizer::new();
        let p = Point::ORIGIN;
        let t0 = Instant::now();
        click(&mut rec, p, t0);
        rec.reset();
        let tap = click(&mut rec, p, t0 + Duration::from_millis(10));
        assert!(matches!(tap, Some(Event::GestureTap { count: 1, .. })));
    }
}
