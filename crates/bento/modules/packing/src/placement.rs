//! Bento packing algorithm.
//!
//! Blocks are processed in input order. Each one is anchored at the first
//! origin, scanning rows top to bottom and columns left to right, whose
//! footprint-sized rectangle is entirely free. There is no backtracking, so a
//! given block order and column count always produce the same placements.

use crate::occupancy::Occupancy;
use crate::types::{Block, Placement};
use log::debug;
use tracing::debug_span;

/// Place `blocks` on a grid with `columns` columns.
///
/// Returns one placement per block, in input order. An empty block list yields
/// an empty placement list.
///
/// # Panics
/// Panics if `columns` is zero or a block's footprint is wider than `columns`.
/// Footprints are clamped by [`Block::new`], so either case is a caller bug.
#[inline]
#[must_use]
pub fn pack(blocks: &[Block], columns: usize) -> Vec<Placement> {
    let _span = debug_span!("bento_pack", blocks = blocks.len(), columns).entered();
    assert!(columns > 0, "packing requires at least one column");

    let mut occupancy = Occupancy::new(columns);
    let mut placements = Vec::with_capacity(blocks.len());

    for block in blocks {
        assert!(
            block.footprint.width <= columns,
            "footprint of `{}` is {} cells wide on a {columns}-column grid",
            block.identity,
            block.footprint.width,
        );
        let Some((row, col)) = occupancy.first_fit(block.footprint) else {
            // Unreachable for a clamped footprint: the row past the last one is free.
            continue;
        };
        occupancy.mark(row, col, block.footprint);
        placements.push(Placement::new(block.identity.clone(), col, row, block.footprint));
    }

    debug!(
        target: "bento_packing",
        "packed {} blocks into {} rows x {columns} columns",
        placements.len(),
        occupancy.rows()
    );
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_placements;
    use bento_catalog::Shape;

    fn blocks(shapes: &[Shape], columns: usize) -> Vec<Block> {
        shapes
            .iter()
            .enumerate()
            .map(|(index, &shape)| Block::new(format!("img-{index}").into(), shape, columns))
            .collect()
    }

    fn origins(placements: &[Placement]) -> Vec<(usize, usize)> {
        placements.iter().map(|placed| (placed.x, placed.y)).collect()
    }

    /// Five squares on four columns fill the first row, then wrap.
    #[test]
    fn test_squares_fill_rows_in_order() {
        let placements = pack(&blocks(&[Shape::Square; 5], 4), 4);
        assert_eq!(
            origins(&placements),
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (0, 1)]
        );
        let ids: Vec<&str> = placements.iter().map(|placed| placed.identity.as_str()).collect();
        assert_eq!(ids, vec!["img-0", "img-1", "img-2", "img-3", "img-4"]);
    }

    #[test]
    fn test_empty_input_packs_nothing() {
        assert!(pack(&[], 4).is_empty());
    }

    /// Small blocks fill holes left beside taller or wider blocks.
    #[test]
    fn test_mixed_shapes_fill_holes() {
        let shapes = [
            Shape::Vertical,
            Shape::Horizontal,
            Shape::Square,
            Shape::Square,
            Shape::Square,
        ];
        let placements = pack(&blocks(&shapes, 4), 4);
        // V at (0,0) 1x2, H at (1,0) 2x1, S at (3,0), S at (1,1), S at (2,1)
        assert_eq!(
            origins(&placements),
            vec![(0, 0), (1, 0), (3, 0), (1, 1), (2, 1)]
        );
    }

    /// A horizontal block skips a single free column at the end of a row.
    #[test]
    fn test_horizontal_wraps_when_row_tail_too_narrow() {
        let shapes = [Shape::Square, Shape::Horizontal, Shape::Square];
        let placements = pack(&blocks(&shapes, 2), 2);
        assert_eq!(origins(&placements), vec![(0, 0), (0, 1), (1, 0)]);
    }

    /// On one column everything stacks and horizontals collapse.
    #[test]
    fn test_single_column_stacks() {
        let shapes = [Shape::Horizontal, Shape::Vertical, Shape::Square];
        let placements = pack(&blocks(&shapes, 1), 1);
        assert_eq!(origins(&placements), vec![(0, 0), (0, 1), (0, 3)]);
        assert!(placements.iter().all(|placed| placed.width == 1));
    }

    /// Packing twice with the same input gives identical output.
    #[test]
    fn test_pack_is_deterministic() {
        let shapes = [
            Shape::Horizontal,
            Shape::Vertical,
            Shape::Square,
            Shape::Horizontal,
            Shape::Vertical,
        ];
        let input = blocks(&shapes, 4);
        assert_eq!(pack(&input, 4), pack(&input, 4));
    }

    /// No overlap and no out-of-bounds placement over many shape sequences.
    #[test]
    fn test_invariants_hold_across_sequences() {
        let _ = env_logger::builder().is_test(true).try_init();
        for columns in 1..=5 {
            for seed in 0..64_usize {
                let shapes: Vec<Shape> = (0..12)
                    .map(|step| Shape::ALL[(seed * 7 + step * (seed % 5 + 1)) % 3])
                    .collect();
                let placements = pack(&blocks(&shapes, columns), columns);
                assert_eq!(placements.len(), shapes.len());
                assert_eq!(validate_placements(&placements, columns), Ok(()));
            }
        }
    }

    #[test]
    #[should_panic(expected = "cells wide")]
    fn test_unclamped_footprint_fails_fast() {
        let wide = Block::new("wide".into(), Shape::Horizontal, 4);
        assert!(pack(&[wide], 1).is_empty());
    }
}
