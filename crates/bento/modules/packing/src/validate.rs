//! Checks over a finished packing pass.

use crate::types::{ImageRef, Placement};
use core::error::Error;
use core::fmt;

/// First invariant broken by a set of placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementViolation {
    /// A placement extends past the last column or has an empty span.
    OutOfBounds {
        /// Offending image
        identity: ImageRef,
        /// Column count the placement was checked against
        columns: usize,
    },
    /// Two placements share at least one cell.
    Overlap {
        /// Placement that appears first
        first: ImageRef,
        /// Placement that appears later
        second: ImageRef,
    },
}

impl fmt::Display for PlacementViolation {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { identity, columns } => {
                write!(formatter, "`{identity}` does not fit in {columns} columns")
            }
            Self::Overlap { first, second } => {
                write!(formatter, "`{first}` overlaps `{second}`")
            }
        }
    }
}

impl Error for PlacementViolation {}

/// Verify the bounds and no-overlap invariants of a packing pass.
///
/// # Errors
/// Returns the first violation found, scanning placements in order.
#[inline]
pub fn validate_placements(
    placements: &[Placement],
    columns: usize,
) -> Result<(), PlacementViolation> {
    for (index, placed) in placements.iter().enumerate() {
        if placed.width == 0 || placed.height == 0 || placed.x + placed.width > columns {
            return Err(PlacementViolation::OutOfBounds {
                identity: placed.identity.clone(),
                columns,
            });
        }
        let area = placed.area();
        if let Some(other) = placements[index + 1..]
            .iter()
            .find(|other| other.area().overlaps(&area))
        {
            return Err(PlacementViolation::Overlap {
                first: placed.identity.clone(),
                second: other.identity.clone(),
            });
        }
    }
    Ok(())
}

/// Number of rows the placements reach (the grid's height in cells).
#[inline]
#[must_use]
pub fn grid_rows(placements: &[Placement]) -> usize {
    placements
        .iter()
        .map(|placed| placed.y + placed.height)
        .max()
        .unwrap_or(0)
}
