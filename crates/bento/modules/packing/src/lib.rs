//! Bento grid packing.
//!
//! Blocks are placed in input order into a grid with a fixed number of columns
//! and an unbounded number of rows. Each block takes the first free origin in
//! row-major scan order (smallest row, then smallest column), which makes the
//! result a pure function of the block order and the column count.

// Block and placement types
mod types;
pub use types::{Block, CellArea, ImageRef, Placement};

// Cell occupancy bookkeeping
mod occupancy;
pub use occupancy::Occupancy;

// Packing algorithm
mod placement;
pub use placement::pack;

// Invariant checks over a finished pass
mod validate;
pub use validate::{PlacementViolation, grid_rows, validate_placements};

// Cell to pixel mapping
mod geometry;
pub use geometry::{DragPosition, GridMetrics, PixelRect};
