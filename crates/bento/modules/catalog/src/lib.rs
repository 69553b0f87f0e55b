//! Shape catalog and responsive column resolution for bento galleries.
//!
//! A bento gallery lets every image carry a symbolic [`Shape`]. The catalog
//! turns that shape into a [`Footprint`] measured in grid cells, clamped to the
//! number of columns the container currently offers. The column count itself is
//! derived from the observed container width through [`Breakpoints`].

// Symbolic shapes and their cell footprints
mod shape;
pub use shape::{Footprint, ParseShapeError, Shape, footprint_for};

// Container width to column count
mod breakpoints;
pub use breakpoints::{Breakpoints, columns_for};
