//! Mapping between grid cells and container pixels.
//!
//! Columns share the container width equally after gaps; rows have a fixed
//! height. Spans include the gaps between the tracks they cover.

use crate::types::{ImageRef, Placement};
use bento_catalog::Footprint;
use serde::{Deserialize, Serialize};

/// Pixel rectangle relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

/// Position of a dragged block as reported by the interaction layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPosition {
    /// Image being dragged
    pub identity: ImageRef,
    /// Left edge of the block (px)
    pub x_px: f32,
    /// Top edge of the block (px)
    pub y_px: f32,
    /// Cells the block covers
    pub width: usize,
    /// Rows the block covers
    pub height: usize,
}

/// Track sizes for one container width and column count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Number of columns
    columns: usize,
    /// Width of one column track
    column_width: f32,
    /// Height of one row track
    row_height: f32,
    /// Space between adjacent tracks
    gap: f32,
}

impl GridMetrics {
    /// Derive column width from the container width.
    ///
    /// A container too narrow for its gaps gets zero-width columns.
    #[inline]
    #[must_use]
    pub fn new(container_width_px: f32, columns: usize, row_height_px: f32, gap_px: f32) -> Self {
        let columns = columns.max(1);
        let gap = gap_px.max(0.0);
        let gaps = gap * (columns - 1) as f32;
        let column_width = ((container_width_px - gaps) / columns as f32).max(0.0);
        Self {
            columns,
            column_width,
            row_height: row_height_px.max(0.0),
            gap,
        }
    }

    /// Width of one column track.
    #[inline]
    #[must_use]
    pub const fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Pixel rectangle covered by a placement.
    #[inline]
    #[must_use]
    pub fn rect_for(&self, placement: &Placement) -> PixelRect {
        let (x, width) = span(placement.x, placement.width, self.column_width, self.gap);
        let (y, height) = span(placement.y, placement.height, self.row_height, self.gap);
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    /// Total pixel height of a grid with `rows` rows.
    #[inline]
    #[must_use]
    pub fn content_height(&self, rows: usize) -> f32 {
        span(0, rows, self.row_height, self.gap).1
    }

    /// Cell (column, row) containing a pixel point.
    ///
    /// Points left of or above the grid snap to the first column or row; points
    /// right of the grid snap to the last column.
    #[inline]
    #[must_use]
    pub fn cell_at(&self, x_px: f32, y_px: f32) -> (usize, usize) {
        let col = track_index(x_px, self.column_width + self.gap).min(self.columns - 1);
        let row = track_index(y_px, self.row_height + self.gap);
        (col, row)
    }

    /// Snap a dragged block to the cell under its top-left corner.
    ///
    /// The column is clamped so the block stays inside the grid.
    #[inline]
    #[must_use]
    pub fn snap(&self, position: &DragPosition) -> Placement {
        let footprint = Footprint::new(
            position.width.clamp(1, self.columns),
            position.height.max(1),
        );
        let (col, row) = self.cell_at(position.x_px, position.y_px);
        let col = col.min(self.columns - footprint.width);
        Placement::new(position.identity.clone(), col, row, footprint)
    }
}

/// Start offset and length of `count` tracks beginning at track `start`.
fn span(start: usize, count: usize, track: f32, gap: f32) -> (f32, f32) {
    let offset = start as f32 * (track + gap);
    let length = if count == 0 {
        0.0
    } else {
        (count as f32).mul_add(track, (count - 1) as f32 * gap)
    };
    (offset, length)
}

/// Track containing `position_px` when tracks repeat every `pitch` pixels.
fn track_index(position_px: f32, pitch: f32) -> usize {
    if pitch <= 0.0 || !position_px.is_finite() || position_px <= 0.0 {
        return 0;
    }
    (position_px / pitch).floor() as usize
}
