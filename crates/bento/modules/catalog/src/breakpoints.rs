//! Responsive column tiers.
//!
//! The gallery uses three tiers (mobile, tablet, desktop). There are no
//! intermediate tiers.

use log::trace;
use serde::{Deserialize, Serialize};

/// Pixel thresholds and the column count of each responsive tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Smallest width (px) that counts as tablet
    pub tablet_min_px: f32,
    /// Smallest width (px) that counts as desktop
    pub desktop_min_px: f32,
    /// Columns below `tablet_min_px`
    pub mobile_columns: usize,
    /// Columns from `tablet_min_px` up to `desktop_min_px`
    pub tablet_columns: usize,
    /// Columns from `desktop_min_px` upward
    pub desktop_columns: usize,
}

impl Default for Breakpoints {
    #[inline]
    fn default() -> Self {
        Self {
            tablet_min_px: 640.0,
            desktop_min_px: 960.0,
            mobile_columns: 1,
            tablet_columns: 2,
            desktop_columns: 4,
        }
    }
}

impl Breakpoints {
    /// Resolve the column count for a container width in pixels.
    ///
    /// Unmeasured (zero), negative and non-finite widths fall into the mobile
    /// tier so downstream packing always receives at least one column.
    #[inline]
    #[must_use]
    pub fn columns_for(&self, container_width_px: f32) -> usize {
        let columns = if !container_width_px.is_finite() || container_width_px < self.tablet_min_px
        {
            self.mobile_columns
        } else if container_width_px < self.desktop_min_px {
            self.tablet_columns
        } else {
            self.desktop_columns
        };
        trace!(target: "bento_catalog", "width {container_width_px}px -> {columns} columns");
        columns.max(1)
    }

    /// Check that the tiers are ordered and every tier has a column.
    ///
    /// # Errors
    /// Returns a description of the first inconsistency found.
    #[inline]
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tablet_min_px.is_finite() && self.desktop_min_px.is_finite()) {
            return Err("breakpoint widths must be finite".to_owned());
        }
        if self.tablet_min_px <= 0.0 || self.tablet_min_px >= self.desktop_min_px {
            return Err(format!(
                "expected 0 < tablet_min_px < desktop_min_px, got {} and {}",
                self.tablet_min_px, self.desktop_min_px
            ));
        }
        if self.mobile_columns == 0 || self.tablet_columns == 0 || self.desktop_columns == 0 {
            return Err("every tier needs at least one column".to_owned());
        }
        if self.mobile_columns > self.tablet_columns || self.tablet_columns > self.desktop_columns {
            return Err(format!(
                "column tiers must not decrease with width, got {}/{}/{}",
                self.mobile_columns, self.tablet_columns, self.desktop_columns
            ));
        }
        Ok(())
    }
}

/// Resolve columns using the default tiers: below 640px one column, below
/// 960px two columns, otherwise four.
#[inline]
#[must_use]
pub fn columns_for(container_width_px: f32) -> usize {
    Breakpoints::default().columns_for(container_width_px)
}
