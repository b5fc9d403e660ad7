//! Display configuration for description panels.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Height, in pixels, past which a description is collapsed.
pub const DEFAULT_MAX_HEIGHT: f32 = 320.0;

/// Height used by the asset overview's description section.
pub const OVERVIEW_MAX_HEIGHT: f32 = 260.0;

/// Default description font size.
pub const DEFAULT_FONT_SIZE: &str = "0.8rem";

/// Pixels per `rem`/`em` when resolving relative font sizes.
pub const ROOT_FONT_PX: f32 = 16.0;

/// Font size given either as a number of pixels or as a CSS length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSize {
    /// Pixels
    Px(f32),
    /// CSS length, used verbatim (`"0.8rem"`, `"13px"`, ...)
    Css(String),
}

impl FontSize {
    /// CSS value: numbers get a `px` suffix, strings pass through.
    ///
    /// Zero, negative or non-finite pixels and blank strings fall back to
    /// [`DEFAULT_FONT_SIZE`].
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Px(px) if px.is_finite() && *px > 0.0 => format!("{px}px"),
            Self::Css(value) if !value.trim().is_empty() => value.clone(),
            _ => DEFAULT_FONT_SIZE.to_string(),
        }
    }

    /// Resolve to pixels against a root font size.
    ///
    /// Understands `px`, `rem`, `em`, `%` and bare numbers. Returns `None`
    /// for anything else (`"small"`, `"calc(...)"`).
    #[must_use]
    pub fn to_px(&self, root_px: f32) -> Option<f32> {
        let px = match self {
            Self::Px(px) => *px,
            Self::Css(value) => {
                let value = value.trim();
                let (number, scale) = if let Some(n) = value.strip_suffix("rem") {
                    (n, root_px)
                } else if let Some(n) = value.strip_suffix("em") {
                    (n, root_px)
                } else if let Some(n) = value.strip_suffix("px") {
                    (n, 1.0)
                } else if let Some(n) = value.strip_suffix('%') {
                    (n, root_px / 100.0)
                } else {
                    (value, 1.0)
                };
                number.trim().parse::<f32>().ok()? * scale
            }
        };
        (px.is_finite() && px > 0.0).then_some(px)
    }

    fn validate(&self) -> Result<(), ParseError> {
        match self {
            Self::Px(px) if !px.is_finite() || *px <= 0.0 => Err(ParseError::invalid(
                "font_size",
                format!("must be a positive number of pixels, got {px}"),
            )),
            Self::Css(value) if value.trim().is_empty() => {
                Err(ParseError::invalid("font_size", "must not be empty"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::Css(DEFAULT_FONT_SIZE.to_string())
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<f32> for FontSize {
    fn from(px: f32) -> Self {
        Self::Px(px)
    }
}

impl From<&str> for FontSize {
    fn from(value: &str) -> Self {
        Self::Css(value.to_string())
    }
}

/// Caller-supplied display settings for a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Collapse threshold in pixels
    pub max_height: f32,
    /// Body font size
    pub font_size: FontSize,
}

impl DisplayConfig {
    /// Settings used by the asset overview panel.
    #[must_use]
    pub fn overview() -> Self {
        Self {
            max_height: OVERVIEW_MAX_HEIGHT,
            ..Self::default()
        }
    }

    /// Reject settings the widgets cannot honor.
    pub fn validate(&self) -> Result<(), ParseError> {
        if !self.max_height.is_finite() || self.max_height <= 0.0 {
            return Err(ParseError::invalid(
                "max_height",
                format!("must be a positive number of pixels, got {}", self.max_height),
            ));
        }
        self.font_size.validate()
    }

    /// Font size in pixels, falling back to the default when the configured
    /// value can't be resolved.
    #[must_use]
    pub fn font_px(&self) -> f32 {
        self.font_size
            .to_px(ROOT_FONT_PX)
            .unwrap_or(0.8 * ROOT_FONT_PX)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
            font_size: FontSize::default(),
        }
    }
}
