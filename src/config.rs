//! Engine configuration.
//!
//! The page frame and interaction defaults are inputs, not baked-in
//! constants: hosts serving non-A4 documents configure the page size
//! here. Configs serialize to JSON so hosts can persist them alongside
//! their own settings.

use serde::{Deserialize, Serialize};

use crate::constants::{handle as handle_const, rect as rect_const};
use crate::geometry::PageFrame;

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Placement engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    /// PDF page dimensions in points
    #[serde(default)]
    pub page: PageFrame,

    /// Width of a freshly selected rectangle, in pixels
    #[serde(default = "default_width")]
    pub default_width: f32,

    /// Height of a freshly selected rectangle, in pixels
    #[serde(default = "default_height")]
    pub default_height: f32,

    /// Side length of the resize handle hit region, in pixels
    #[serde(default = "default_handle_size")]
    pub handle_size: f32,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_width() -> f32 {
    rect_const::DEFAULT_WIDTH
}

fn default_height() -> f32 {
    rect_const::DEFAULT_HEIGHT
}

fn default_handle_size() -> f32 {
    handle_const::SIZE
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            page: PageFrame::A4,
            default_width: rect_const::DEFAULT_WIDTH,
            default_height: rect_const::DEFAULT_HEIGHT,
            handle_size: handle_const::SIZE,
        }
    }
}

impl PlacementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default rectangle size as a (width, height) pair.
    pub fn default_size(&self) -> (f32, f32) {
        (self.default_width, self.default_height)
    }

    /// Export configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
