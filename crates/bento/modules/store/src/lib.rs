//! Per-image shape bookkeeping for a bento gallery.
//!
//! Shapes belong to images, but editor state addresses images by their
//! position in the canonical list. [`LayoutStore`] keeps an index-keyed map and
//! re-keys it whenever the list is inserted into, removed from or reordered,
//! so every shape stays with the image that owns it.

mod layout_store;
pub use layout_store::LayoutStore;

mod index_map;
pub use index_map::index_map;
