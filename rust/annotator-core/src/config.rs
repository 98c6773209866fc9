//! Configuration types and defaults for the annotation engine
//!
//! Loaded from the project settings the UI already holds; every field has a
//! default so a partial object (or none at all) is valid.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::palette::DEFAULT_PALETTE;

// =============================================================================
// Overlap Policy
// =============================================================================

/// What counts as a collision between an existing span and a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Sharing a boundary counts: `[0,5)` blocks `[5,10)`.
    /// Zero-gap neighbours on one task are indistinguishable once rendered.
    #[default]
    Inclusive,
    /// Only shared code units count
    Strict,
}

impl OverlapPolicy {
    /// Does `[a_start, a_end)` collide with `[b_start, b_end)`?
    #[inline]
    pub fn collides(self, a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> bool {
        match self {
            OverlapPolicy::Inclusive => a_start <= b_end && a_end >= b_start,
            OverlapPolicy::Strict => a_start < b_end && a_end > b_start,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Colors handed to tasks without one, by task position. Default: `DEFAULT_PALETTE`
    pub palette: Vec<String>,
    /// Collision rule for new spans. Default: `Inclusive`
    pub overlap: OverlapPolicy,
    /// Texts longer than this (UTF-16 units) are not segmented. Default: None
    pub max_text_len: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            overlap: OverlapPolicy::Inclusive,
            max_text_len: None,
        }
    }
}

impl EngineConfig {
    /// Only shared code units block a new span
    pub fn strict() -> Self {
        Self {
            overlap: OverlapPolicy::Strict,
            ..Self::default()
        }
    }

    /// Parse from a JSON value; missing fields take defaults.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| EngineError::Config(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
