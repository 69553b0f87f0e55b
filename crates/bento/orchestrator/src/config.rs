//! Configuration settings for the bento gallery engine.
//!
//! This module defines the reorder debounce period, the responsive column
//! breakpoints and the track metrics used for pixel geometry. Configuration can
//! be loaded from environment variables, parsed from JSON editor settings, or
//! constructed programmatically.

use anyhow::{Context as _, Result, anyhow};
use bento_catalog::Breakpoints;
use core::str::FromStr;
use core::time::Duration;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;

/// Runtime configuration for one gallery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BentoConfig {
    /// Quiet period in milliseconds before a drag reorder is emitted
    pub debounce_ms: u64,
    /// Container widths at which the column count changes
    pub breakpoints: Breakpoints,
    /// Height of one grid row in pixels
    pub row_height_px: f32,
    /// Space between adjacent tracks in pixels
    pub gap_px: f32,
}

impl Default for BentoConfig {
    #[inline]
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            breakpoints: Breakpoints::default(),
            row_height_px: 200.0,
            gap_px: 16.0,
        }
    }
}

impl BentoConfig {
    /// Construct a configuration with explicit values.
    ///
    /// # Arguments
    ///
    /// * `debounce_ms` - Reorder quiet period in milliseconds
    /// * `breakpoints` - Responsive column tiers
    /// * `row_height_px` - Row height (negative values are treated as zero)
    /// * `gap_px` - Track gap (negative values are treated as zero)
    #[inline]
    #[must_use]
    pub fn new(
        debounce_ms: u64,
        breakpoints: Breakpoints,
        row_height_px: f32,
        gap_px: f32,
    ) -> Self {
        Self {
            debounce_ms,
            breakpoints,
            row_height_px: row_height_px.max(0.0),
            gap_px: gap_px.max(0.0),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `BENTO_DEBOUNCE_MS`: reorder quiet period (default: 300)
    /// - `BENTO_TABLET_MIN_PX`: first two-column width (default: 640)
    /// - `BENTO_DESKTOP_MIN_PX`: first four-column width (default: 960)
    /// - `BENTO_ROW_HEIGHT_PX`: row height (default: 200)
    /// - `BENTO_GAP_PX`: track gap (default: 16)
    ///
    /// Unparseable values keep their defaults. Breakpoints that end up
    /// inconsistent are replaced by the default tiers.
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debounce_ms = env_parse("BENTO_DEBOUNCE_MS").unwrap_or(defaults.debounce_ms);
        let mut breakpoints = Breakpoints {
            tablet_min_px: env_parse("BENTO_TABLET_MIN_PX")
                .unwrap_or(defaults.breakpoints.tablet_min_px),
            desktop_min_px: env_parse("BENTO_DESKTOP_MIN_PX")
                .unwrap_or(defaults.breakpoints.desktop_min_px),
            ..defaults.breakpoints
        };
        if let Err(reason) = breakpoints.validate() {
            warn!(target: "bento_grid", "ignoring breakpoint overrides: {reason}");
            breakpoints = defaults.breakpoints;
        }
        let row_height_px = env_parse("BENTO_ROW_HEIGHT_PX")
            .filter(|px: &f32| px.is_finite())
            .unwrap_or(defaults.row_height_px);
        let gap_px = env_parse("BENTO_GAP_PX")
            .filter(|px: &f32| px.is_finite())
            .unwrap_or(defaults.gap_px);
        Self::new(debounce_ms, breakpoints, row_height_px, gap_px)
    }

    /// Parse configuration from a JSON object. Missing fields keep their
    /// defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the values are inconsistent.
    #[inline]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("failed to parse bento configuration")?;
        config
            .breakpoints
            .validate()
            .map_err(|reason| anyhow!("invalid breakpoints: {reason}"))?;
        if !(config.row_height_px.is_finite() && config.row_height_px >= 0.0) {
            return Err(anyhow!("row_height_px must be a non-negative number"));
        }
        if !(config.gap_px.is_finite() && config.gap_px >= 0.0) {
            return Err(anyhow!("gap_px must be a non-negative number"));
        }
        Ok(config)
    }

    /// Get the reorder quiet period as a `Duration`.
    #[inline]
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|val| val.trim().parse::<T>().ok())
}
