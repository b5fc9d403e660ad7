//! YAML configuration for Dossier description panels.
//!
//! A [`PanelManifest`] names an asset, carries its markdown description and
//! optionally overrides the [`DisplayConfig`] used to show it.

mod config;
mod error;
mod manifest;

pub use config::{
    DisplayConfig, FontSize, DEFAULT_FONT_SIZE, DEFAULT_MAX_HEIGHT, OVERVIEW_MAX_HEIGHT,
    ROOT_FONT_PX,
};
pub use error::ParseError;
pub use manifest::{AssetKey, PanelManifest};
