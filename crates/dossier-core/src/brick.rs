//! Brick contract: every widget carries verifiable assertions and a
//! deterministic HTML/CSS rendition.
//!
//! A widget whose assertions fail must not be painted. Hosts call
//! [`Brick::can_render`] before `paint`.

/// Brick assertion that must be verified at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum BrickAssertion {
    /// Text content must be visible (not hidden, not zero-opacity)
    TextVisible,

    /// WCAG 2.1 AA contrast ratio requirement (4.5:1 for normal text)
    ContrastRatio(f32),

    /// Element must be focusable for accessibility
    Focusable,
}

/// Result of verifying brick assertions.
#[derive(Debug, Clone, Default)]
pub struct BrickVerification {
    /// All assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// All assertions that failed with reasons
    pub failed: Vec<(BrickAssertion, String)>,
}

impl BrickVerification {
    /// Record an assertion outcome.
    pub fn check(&mut self, assertion: BrickAssertion, ok: bool, reason: impl Into<String>) {
        if ok {
            self.passed.push(assertion);
        } else {
            self.failed.push((assertion, reason.into()));
        }
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Core Brick trait. `Widget` requires it.
pub trait Brick: Send + Sync {
    /// Get the brick's unique type name
    fn brick_name(&self) -> &'static str;

    /// Get all assertions for this brick
    fn assertions(&self) -> &[BrickAssertion];

    /// Verify all assertions against current state.
    fn verify(&self) -> BrickVerification;

    /// HTML for this brick. Same state, same output.
    fn to_html(&self) -> String;

    /// Scoped CSS rules for this brick.
    fn to_css(&self) -> String;

    /// Check if this brick can be rendered (all assertions pass)
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_verification_check() {
        let mut v = BrickVerification::default();
        assert!(v.is_valid());
        v.check(BrickAssertion::TextVisible, true, "");
        assert!(v.is_valid());
        assert_eq!(v.passed, vec![BrickAssertion::TextVisible]);

        v.check(BrickAssertion::Focusable, false, "disabled");
        assert!(!v.is_valid());
        assert_eq!(v.failed, vec![(BrickAssertion::Focusable, "disabled".to_string())]);
    }
}
