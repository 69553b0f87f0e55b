//! Index-keyed shape map that follows images across list mutations.

use bento_catalog::Shape;
use core::mem;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shape overrides keyed by image index.
///
/// Indices without an entry are [`Shape::Square`]. Owned by the editor
/// instance managing one gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutStore {
    shape_by_index: BTreeMap<usize, Shape>,
}

impl LayoutStore {
    /// Create an empty store.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shape_by_index: BTreeMap::new(),
        }
    }

    /// Shape of the image at `index`, defaulting to square.
    #[inline]
    #[must_use]
    pub fn shape_of(&self, index: usize) -> Shape {
        self.shape_by_index
            .get(&index)
            .copied()
            .unwrap_or_default()
    }

    /// Explicit entry for `index`, if one was set.
    #[inline]
    #[must_use]
    pub fn explicit_shape(&self, index: usize) -> Option<Shape> {
        self.shape_by_index.get(&index).copied()
    }

    /// Record a user's shape choice for one image. Other indices are untouched.
    #[inline]
    pub fn set_shape(&mut self, index: usize, shape: Shape) {
        trace!(target: "bento_store", "shape[{index}] = {shape}");
        self.shape_by_index.insert(index, shape);
    }

    /// An image was inserted at `at_index`: entries at or after it move up one.
    ///
    /// No entry is created for the new image, so it reads as square until set.
    #[inline]
    pub fn on_image_inserted(&mut self, at_index: usize) {
        let shifted = self.shape_by_index.split_off(&at_index);
        self.shape_by_index.extend(
            shifted
                .into_iter()
                .map(|(index, shape)| (index + 1, shape)),
        );
        debug!(target: "bento_store", "inserted at {at_index}; {} entries", self.len());
    }

    /// The image at `at_index` was removed: its entry is dropped and later
    /// entries move down one.
    #[inline]
    pub fn on_image_removed(&mut self, at_index: usize) {
        let mut shifted = self.shape_by_index.split_off(&at_index);
        shifted.remove(&at_index);
        self.shape_by_index.extend(
            shifted
                .into_iter()
                .map(|(index, shape)| (index - 1, shape)),
        );
        debug!(target: "bento_store", "removed at {at_index}; {} entries", self.len());
    }

    /// The list was permuted: re-key every entry through `old_to_new`.
    ///
    /// Entries whose old index is missing from the map are dropped.
    #[inline]
    pub fn on_reordered(&mut self, old_to_new: &BTreeMap<usize, usize>) {
        let previous = mem::take(&mut self.shape_by_index);
        let before = previous.len();
        self.shape_by_index = previous
            .into_iter()
            .filter_map(|(old, shape)| old_to_new.get(&old).map(|&new| (new, shape)))
            .collect();
        let dropped = before - self.len();
        if dropped > 0 {
            debug!(target: "bento_store", "reorder dropped {dropped} unmapped entries");
        }
    }

    /// Shapes for the first `count` images, defaults included.
    #[inline]
    #[must_use]
    pub fn shapes(&self, count: usize) -> Vec<Shape> {
        (0..count).map(|index| self.shape_of(index)).collect()
    }

    /// Explicit entries in index order.
    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = (usize, Shape)> + '_ {
        self.shape_by_index
            .iter()
            .map(|(&index, &shape)| (index, shape))
    }

    /// Drop entries at or beyond `count`, for when the image list was replaced
    /// wholesale by a shorter one.
    #[inline]
    pub fn truncate(&mut self, count: usize) {
        drop(self.shape_by_index.split_off(&count));
    }

    /// Number of explicit entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.shape_by_index.len()
    }

    /// Whether no explicit entries exist.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shape_by_index.is_empty()
    }
}

impl FromIterator<(usize, Shape)> for LayoutStore {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (usize, Shape)>>(iter: I) -> Self {
        Self {
            shape_by_index: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(entries: &[(usize, Shape)]) -> LayoutStore {
        entries.iter().copied().collect()
    }

    fn entries(store: &LayoutStore) -> Vec<(usize, Shape)> {
        store.entries().collect()
    }

    #[test]
    fn test_missing_entries_default_to_square() {
        let layout = LayoutStore::new();
        assert_eq!(layout.shape_of(7), Shape::Square);
        assert_eq!(layout.explicit_shape(7), None);
        assert!(layout.is_empty());
    }

    /// Setting one shape leaves neighbours alone.
    #[test]
    fn test_set_shape_is_local() {
        let mut layout = store(&[(0, Shape::Vertical)]);
        layout.set_shape(1, Shape::Horizontal);
        assert_eq!(
            layout.shapes(3),
            vec![Shape::Vertical, Shape::Horizontal, Shape::Square]
        );
    }

    /// Removing index 1 drops its entry and shifts index 2 down.
    #[test]
    fn test_removal_shifts_higher_indices_down() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut layout = store(&[(0, Shape::Square), (1, Shape::Vertical), (2, Shape::Horizontal)]);
        layout.on_image_removed(1);
        assert_eq!(entries(&layout), vec![(0, Shape::Square), (1, Shape::Horizontal)]);
    }

    /// Removing an index without an entry still shifts later entries.
    #[test]
    fn test_removal_without_entry_still_shifts() {
        let mut layout = store(&[(0, Shape::Vertical), (3, Shape::Horizontal)]);
        layout.on_image_removed(1);
        assert_eq!(entries(&layout), vec![(0, Shape::Vertical), (2, Shape::Horizontal)]);
    }

    /// Inserting at 0 shifts every entry up and leaves 0 empty.
    #[test]
    fn test_insertion_shifts_entries_up() {
        let mut layout = store(&[(0, Shape::Vertical), (1, Shape::Square)]);
        layout.on_image_inserted(0);
        assert_eq!(entries(&layout), vec![(1, Shape::Vertical), (2, Shape::Square)]);
        assert_eq!(layout.explicit_shape(0), None);
    }

    #[test]
    fn test_append_leaves_entries_in_place() {
        let mut layout = store(&[(0, Shape::Vertical), (1, Shape::Horizontal)]);
        layout.on_image_inserted(2);
        assert_eq!(entries(&layout), vec![(0, Shape::Vertical), (1, Shape::Horizontal)]);
    }

    /// Reordering moves shapes with their images and drops unmapped entries.
    #[test]
    fn test_reorder_rekeys_entries() {
        let mut layout = store(&[(0, Shape::Vertical), (1, Shape::Horizontal), (2, Shape::Square)]);
        let old_to_new: BTreeMap<usize, usize> = [(0, 2), (1, 0)].into_iter().collect();
        layout.on_reordered(&old_to_new);
        assert_eq!(entries(&layout), vec![(0, Shape::Horizontal), (2, Shape::Vertical)]);
    }

    #[test]
    fn test_truncate_drops_tail() {
        let mut layout = store(&[(0, Shape::Vertical), (4, Shape::Horizontal)]);
        layout.truncate(3);
        assert_eq!(entries(&layout), vec![(0, Shape::Vertical)]);
    }

    /// The store serializes as a plain index-to-shape object.
    #[test]
    fn test_store_serializes_as_map() {
        let layout = store(&[(1, Shape::Vertical)]);
        let json = serde_json::to_string(&layout).unwrap_or_default();
        assert_eq!(json, r#"{"1":"vertical"}"#);
        let parsed: LayoutStore = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(parsed, layout);
    }
}
