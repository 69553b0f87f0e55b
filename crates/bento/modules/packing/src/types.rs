//! Block and placement type definitions.

use bento_catalog::{Footprint, Shape, footprint_for};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Stable reference to an image (its URL or storage key).
///
/// Used to correlate blocks and placements back to the canonical image list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap an image URL or key.
    #[inline]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The underlying reference string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    #[inline]
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for ImageRef {
    #[inline]
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

/// An image with its desired shape and the footprint it takes on the current grid.
///
/// Blocks are rebuilt on every packing pass and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Image this block renders
    pub identity: ImageRef,
    /// Shape the user asked for
    pub shape: Shape,
    /// Cells covered, already clamped to the column count
    pub footprint: Footprint,
}

impl Block {
    /// Build a block whose footprint is clamped to `columns`.
    #[inline]
    #[must_use]
    pub fn new(identity: ImageRef, shape: Shape, columns: usize) -> Self {
        Self {
            identity,
            shape,
            footprint: footprint_for(shape, columns),
        }
    }
}

/// Area covered by a placement, as half-open row and column ranges (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellArea {
    /// First row covered
    pub row_start: usize,
    /// Row after the last one covered
    pub row_end: usize,
    /// First column covered
    pub col_start: usize,
    /// Column after the last one covered
    pub col_end: usize,
}

impl CellArea {
    /// Check if this area shares at least one cell with another.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.row_start < other.row_end
            && self.row_end > other.row_start
            && self.col_start < other.col_end
            && self.col_end > other.col_start
    }
}

/// Resolved origin and size of one block, in grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Image placed here
    pub identity: ImageRef,
    /// Column of the top-left cell
    pub x: usize,
    /// Row of the top-left cell
    pub y: usize,
    /// Columns spanned
    pub width: usize,
    /// Rows spanned
    pub height: usize,
}

impl Placement {
    /// Create a placement from an origin and a footprint.
    #[inline]
    #[must_use]
    pub const fn new(identity: ImageRef, x: usize, y: usize, footprint: Footprint) -> Self {
        Self {
            identity,
            x,
            y,
            width: footprint.width,
            height: footprint.height,
        }
    }

    /// Cells covered by this placement.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> CellArea {
        CellArea {
            row_start: self.y,
            row_end: self.y + self.height,
            col_start: self.x,
            col_end: self.x + self.width,
        }
    }
}
