//! Old-to-new index maps derived from two orderings of the same images.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;

/// Map each index of `old_order` to the index its image has in `new_order`.
///
/// Repeated identities are matched by occurrence: the first copy in the old
/// order maps to the first copy in the new order, and so on. Images missing
/// from `new_order` have no entry, so [`crate::LayoutStore::on_reordered`]
/// drops their shapes.
#[inline]
#[must_use]
pub fn index_map<T: Eq + Hash>(old_order: &[T], new_order: &[T]) -> BTreeMap<usize, usize> {
    let mut slots: HashMap<&T, VecDeque<usize>> = HashMap::with_capacity(new_order.len());
    for (new_index, identity) in new_order.iter().enumerate() {
        slots.entry(identity).or_default().push_back(new_index);
    }
    old_order
        .iter()
        .enumerate()
        .filter_map(|(old_index, identity)| {
            slots
                .get_mut(identity)
                .and_then(VecDeque::pop_front)
                .map(|new_index| (old_index, new_index))
        })
        .collect()
}
