//! Layout constraints for widgets.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Layout constraints that specify minimum and maximum sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum width
    pub min_width: f32,
    /// Maximum width
    pub max_width: f32,
    /// Minimum height
    pub min_height: f32,
    /// Maximum height
    pub max_height: f32,
}

impl Constraints {
    /// Create new constraints.
    #[must_use]
    pub const fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Fixed width, unbounded height. The usual shape for a scrolling column.
    #[must_use]
    pub const fn width(width: f32) -> Self {
        Self::new(0.0, width, 0.0, f32::INFINITY)
    }

    /// Create unbounded constraints.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(0.0, f32::INFINITY, 0.0, f32::INFINITY)
    }

    /// Constrain a size to fit within these constraints.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min_width, self.max_width),
            size.height.clamp(self.min_height, self.max_height),
        )
    }

    /// Check if width is bounded (not infinite).
    #[must_use]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    /// Width to lay text out against: `max_width` if bounded, else `fallback`.
    #[must_use]
    pub fn available_width(&self, fallback: f32) -> f32 {
        if self.has_bounded_width() {
            self.max_width
        } else {
            fallback
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_width() {
        let c = Constraints::width(640.0);
        assert_eq!(c.max_width, 640.0);
        assert_eq!(c.max_height, f32::INFINITY);
    }

    #[test]
    fn test_constraints_constrain() {
        let c = Constraints::new(50.0, 150.0, 50.0, 150.0);
        assert_eq!(c.constrain(Size::new(100.0, 100.0)), Size::new(100.0, 100.0));
        assert_eq!(c.constrain(Size::new(10.0, 10.0)), Size::new(50.0, 50.0));
        assert_eq!(c.constrain(Size::new(200.0, 200.0)), Size::new(150.0, 150.0));
    }

    #[test]
    fn test_constraints_available_width() {
        assert_eq!(Constraints::width(300.0).available_width(800.0), 300.0);
        assert_eq!(Constraints::unbounded().available_width(800.0), 800.0);
    }

    #[test]
    fn test_constraints_default_is_unbounded() {
        let c = Constraints::default();
        assert!(!c.has_bounded_width());
        assert_eq!(c.min_width, 0.0);
    }
}
