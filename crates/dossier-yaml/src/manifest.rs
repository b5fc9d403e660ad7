//! Panel manifests describing an asset and how its description is shown.

use crate::config::DisplayConfig;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hierarchical asset identifier, e.g. `["warehouse", "orders"]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey {
    /// Path segments
    pub path: Vec<String>,
}

impl AssetKey {
    /// Create a key from path segments.
    #[must_use]
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Segments joined with `/`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.join("/")
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// A description panel to render.
///
/// ```yaml
/// asset: [warehouse, orders]
/// description: |
///     Orders placed through the storefront.
///
///     Refreshed hourly.
/// display:
///   max_height: 200
///   font_size: 14
/// related_assets:
///   - [warehouse, customers]
/// code_locations:
///   - analytics@prod
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelManifest {
    /// Asset the panel belongs to
    #[serde(default)]
    pub asset: Option<AssetKey>,
    /// Markdown description, possibly indented
    #[serde(default)]
    pub description: Option<String>,
    /// Display overrides; the overview defaults apply when absent
    #[serde(default)]
    pub display: Option<DisplayConfig>,
    /// Assets linked from the panel
    #[serde(default)]
    pub related_assets: Vec<AssetKey>,
    /// Code location names
    #[serde(default)]
    pub code_locations: Vec<String>,
}

impl PanelManifest {
    /// Parse and validate a manifest.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check structural rules serde can't express.
    pub fn validate(&self) -> Result<(), ParseError> {
        if let Some(asset) = &self.asset {
            validate_key("asset", asset)?;
        }
        if let Some(display) = &self.display {
            display.validate().map_err(|err| match err {
                ParseError::InvalidValue { field, message } => ParseError::InvalidValue {
                    field: format!("display.{field}"),
                    message,
                },
                other => other,
            })?;
        }
        for (i, key) in self.related_assets.iter().enumerate() {
            validate_key(&format!("related_assets[{i}]"), key)?;
        }
        for (i, name) in self.code_locations.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ParseError::invalid(
                    &format!("code_locations[{i}]"),
                    "code location name must not be empty",
                ));
            }
        }
        Ok(())
    }

    /// Display settings, falling back to the overview defaults.
    #[must_use]
    pub fn display_config(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_else(DisplayConfig::overview)
    }
}

fn validate_key(field: &str, key: &AssetKey) -> Result<(), ParseError> {
    if key.path.is_empty() {
        return Err(ParseError::invalid(field, "asset key must have at least one segment"));
    }
    if key.path.iter().any(|segment| segment.is_empty()) {
        return Err(ParseError::invalid(field, "asset key segments must not be empty"));
    }
    Ok(())
}
