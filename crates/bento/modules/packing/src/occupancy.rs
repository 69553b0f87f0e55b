//! Occupancy map over a fixed column count and a growing number of rows.

use bento_catalog::Footprint;

/// Which cells of the grid are taken.
///
/// Rows are allocated lazily as the scan reaches them, so the grid behaves as
/// if it were unbounded downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    /// Number of columns (fixed for the lifetime of the map)
    columns: usize,
    /// Row-major cell flags, `columns` entries per row
    cells: Vec<bool>,
}

impl Occupancy {
    /// Create an empty map with `columns` columns.
    #[inline]
    #[must_use]
    pub const fn new(columns: usize) -> Self {
        Self {
            columns,
            cells: Vec::new(),
        }
    }

    /// Column count.
    #[inline]
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Rows allocated so far.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len().checked_div(self.columns).unwrap_or(0)
    }

    /// Whether the cell at (`row`, `col`) is taken. Cells beyond the allocated
    /// rows are free.
    #[inline]
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        col < self.columns
            && self
                .cells
                .get(row * self.columns + col)
                .copied()
                .unwrap_or(false)
    }

    /// Whether a `footprint`-sized rectangle with its top-left at (`row`, `col`)
    /// lies inside the columns and covers only free cells.
    #[inline]
    #[must_use]
    pub fn fits(&self, row: usize, col: usize, footprint: Footprint) -> bool {
        if col + footprint.width > self.columns {
            return false;
        }
        (row..row + footprint.height).all(|cell_row| {
            (col..col + footprint.width).all(|cell_col| !self.is_occupied(cell_row, cell_col))
        })
    }

    /// Mark every cell of the rectangle as taken, growing the map as needed.
    #[inline]
    pub fn mark(&mut self, row: usize, col: usize, footprint: Footprint) {
        self.ensure_rows(row + footprint.height);
        for cell_row in row..row + footprint.height {
            let start = cell_row * self.columns + col;
            for cell in &mut self.cells[start..start + footprint.width] {
                *cell = true;
            }
        }
    }

    /// First origin, in row-major order, where `footprint` fits.
    ///
    /// Always succeeds when `footprint.width <= columns`: the row after the last
    /// allocated one is entirely free.
    #[inline]
    #[must_use]
    pub fn first_fit(&self, footprint: Footprint) -> Option<(usize, usize)> {
        let last_col = self.columns.checked_sub(footprint.width)?;
        (0..=self.rows()).find_map(|row| {
            (0..=last_col)
                .find(|&col| self.fits(row, col, footprint))
                .map(|col| (row, col))
        })
    }

    fn ensure_rows(&mut self, rows: usize) {
        let needed = rows * self.columns;
        if self.cells.len() < needed {
            self.cells.resize(needed, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An empty map places anything at the origin.
    #[test]
    fn test_empty_map_fits_at_origin() {
        let occupancy = Occupancy::new(3);
        assert_eq!(occupancy.rows(), 0);
        assert_eq!(occupancy.first_fit(Footprint::new(2, 2)), Some((0, 0)));
    }

    /// Marking grows the map and blocks the covered cells only.
    #[test]
    fn test_mark_grows_rows() {
        let mut occupancy = Occupancy::new(2);
        occupancy.mark(0, 1, Footprint::new(1, 2));
        assert_eq!(occupancy.rows(), 2);
        assert!(occupancy.is_occupied(0, 1));
        assert!(occupancy.is_occupied(1, 1));
        assert!(!occupancy.is_occupied(0, 0));
        assert!(!occupancy.is_occupied(5, 0));
    }

    /// Holes left by taller blocks are reused before new rows.
    #[test]
    fn test_first_fit_reuses_holes() {
        let mut occupancy = Occupancy::new(2);
        occupancy.mark(0, 0, Footprint::new(1, 2));
        occupancy.mark(0, 1, Footprint::new(1, 1));
        assert_eq!(occupancy.first_fit(Footprint::new(1, 1)), Some((1, 1)));
        assert_eq!(occupancy.first_fit(Footprint::new(2, 1)), Some((2, 0)));
    }

    /// A rectangle crossing the right edge never fits.
    #[test]
    fn test_fits_respects_column_bound() {
        let occupancy = Occupancy::new(2);
        assert!(!occupancy.fits(0, 1, Footprint::new(2, 1)));
        assert_eq!(occupancy.first_fit(Footprint::new(3, 1)), None);
    }
}
