//! Symbolic image shapes and the grid footprint each one occupies.

use core::error::Error;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Layout intent a user assigns to an image.
///
/// Every image has exactly one shape; images without an explicit choice are
/// [`Shape::Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// One cell wide, one cell tall
    #[default]
    Square,
    /// One cell wide, two cells tall
    Vertical,
    /// Two cells wide, one cell tall
    Horizontal,
}

impl Shape {
    /// Every shape, in picker order.
    pub const ALL: [Self; 3] = [Self::Square, Self::Vertical, Self::Horizontal];

    /// Wire name used by editor state.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Shape {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Returned when a shape tag is not one of the known wire names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShapeError {
    tag: String,
}

impl fmt::Display for ParseShapeError {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown shape `{}` (expected square, vertical or horizontal)",
            self.tag
        )
    }
}

impl Error for ParseShapeError {}

impl FromStr for Shape {
    type Err = ParseShapeError;

    #[inline]
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(tag.trim()))
            .ok_or_else(|| ParseShapeError {
                tag: tag.to_owned(),
            })
    }
}

/// Size of a block in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    /// Columns spanned (at least 1)
    pub width: usize,
    /// Rows spanned (at least 1)
    pub height: usize,
}

impl Footprint {
    /// Create a footprint from a column and row span.
    #[inline]
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Footprint of `shape` on a grid with `columns` columns.
///
/// Horizontal blocks degrade to a single cell when only one column is
/// available, so the returned width never exceeds `columns.max(1)`.
#[inline]
#[must_use]
pub fn footprint_for(shape: Shape, columns: usize) -> Footprint {
    let columns = columns.max(1);
    match shape {
        Shape::Square => Footprint::new(1, 1),
        Shape::Vertical => Footprint::new(1, 2),
        Shape::Horizontal => Footprint::new(2.min(columns), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every shape maps to its documented footprint on a wide grid.
    #[test]
    fn test_footprints_on_wide_grid() {
        assert_eq!(footprint_for(Shape::Square, 4), Footprint::new(1, 1));
        assert_eq!(footprint_for(Shape::Vertical, 4), Footprint::new(1, 2));
        assert_eq!(footprint_for(Shape::Horizontal, 4), Footprint::new(2, 1));
    }

    /// A horizontal block on a single column collapses to one cell.
    #[test]
    fn test_horizontal_clamped_to_single_column() {
        assert_eq!(footprint_for(Shape::Horizontal, 1), Footprint::new(1, 1));
        assert_eq!(footprint_for(Shape::Horizontal, 0), Footprint::new(1, 1));
        assert_eq!(footprint_for(Shape::Horizontal, 2), Footprint::new(2, 1));
    }

    /// Footprints never exceed the column count.
    #[test]
    fn test_footprint_width_within_columns() {
        for columns in 1..=6 {
            for shape in Shape::ALL {
                let footprint = footprint_for(shape, columns);
                assert!(footprint.width <= columns);
                assert!(footprint.width >= 1 && footprint.height >= 1);
            }
        }
    }

    #[test]
    fn test_default_shape_is_square() {
        assert_eq!(Shape::default(), Shape::Square);
    }

    /// Wire names parse case-insensitively and reject unknown tags.
    #[test]
    fn test_parse_shape_tags() {
        assert_eq!("vertical".parse::<Shape>(), Ok(Shape::Vertical));
        assert_eq!(" Horizontal ".parse::<Shape>(), Ok(Shape::Horizontal));
        let err = "diagonal".parse::<Shape>().err();
        assert!(err.is_some_and(|err| err.to_string().contains("diagonal")));
    }

    /// Serde uses the same lower-case names as `Display`.
    #[test]
    fn test_serde_names_match_display() {
        for shape in Shape::ALL {
            let json = serde_json::to_string(&shape).unwrap_or_default();
            assert_eq!(json, format!("\"{shape}\""));
        }
    }
}
