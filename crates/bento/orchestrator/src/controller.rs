//! Per-gallery controller tying shapes, packing and drag reordering together.

use crate::config::BentoConfig;
use bento_catalog::{Breakpoints, Shape};
use bento_packing::{Block, DragPosition, GridMetrics, ImageRef, Placement, pack};
use bento_reorder::{DragOutcome, ReorderTranslator};
use bento_store::{LayoutStore, index_map};
use log::{debug, trace, warn};
use std::time::Instant;
use tracing::debug_span;

/// Lifecycle of a gallery's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    /// The container width has not been measured; nothing is laid out.
    Unmeasured,
    /// Layout runs against a resolved column count.
    Ready {
        /// Current column count
        columns: usize,
    },
}

/// Pack `images` with the shapes recorded in `store`.
///
/// With no resolved column count (`None`) nothing is packed and the result is
/// empty, so callers never render a provisional single-column layout.
#[inline]
#[must_use]
pub fn compute_layout(
    images: &[ImageRef],
    store: &LayoutStore,
    columns: Option<usize>,
) -> Vec<Placement> {
    let Some(columns) = columns else {
        return Vec::new();
    };
    let columns = columns.max(1);
    let blocks: Vec<Block> = images
        .iter()
        .enumerate()
        .map(|(index, identity)| Block::new(identity.clone(), store.shape_of(index), columns))
        .collect();
    pack(&blocks, columns)
}

/// Owns the layout state of one image gallery.
///
/// The controller keeps the canonical image order it was last told about, the
/// shape store for those images, the current placements and at most one
/// pending drag reorder.
#[derive(Debug)]
pub struct GridController {
    /// Width to column mapping
    breakpoints: Breakpoints,
    /// Row height used for pixel geometry
    row_height_px: f32,
    /// Track gap used for pixel geometry
    gap_px: f32,
    /// Last usable container width
    width_px: Option<f32>,
    state: GridState,
    /// Canonical image order as known to the caller
    images: Vec<ImageRef>,
    store: LayoutStore,
    translator: ReorderTranslator,
    /// Result of the last packing pass
    placements: Vec<Placement>,
}

impl GridController {
    /// Create a controller for an empty, unmeasured gallery.
    #[inline]
    #[must_use]
    pub fn new(config: &BentoConfig) -> Self {
        Self {
            breakpoints: config.breakpoints,
            row_height_px: config.row_height_px,
            gap_px: config.gap_px,
            width_px: None,
            state: GridState::Unmeasured,
            images: Vec::new(),
            store: LayoutStore::new(),
            translator: ReorderTranslator::new(config.debounce()),
            placements: Vec::new(),
        }
    }

    /// Create a controller restoring previously saved images and shapes.
    ///
    /// Shape entries beyond the image list are discarded.
    #[inline]
    #[must_use]
    pub fn with_gallery(
        config: &BentoConfig,
        images: Vec<ImageRef>,
        mut store: LayoutStore,
    ) -> Self {
        store.truncate(images.len());
        Self {
            images,
            store,
            ..Self::new(config)
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> GridState {
        self.state
    }

    /// Resolved column count, or `None` while unmeasured.
    #[inline]
    #[must_use]
    pub const fn columns(&self) -> Option<usize> {
        match self.state {
            GridState::Unmeasured => None,
            GridState::Ready { columns } => Some(columns),
        }
    }

    /// Canonical image order the controller lays out.
    #[inline]
    #[must_use]
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Shape overrides for the current images.
    #[inline]
    #[must_use]
    pub const fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Placements from the last packing pass (empty while unmeasured).
    #[inline]
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Pixel metrics for the measured container, if any.
    #[inline]
    #[must_use]
    pub fn metrics(&self) -> Option<GridMetrics> {
        let columns = self.columns()?;
        let width = self.width_px?;
        Some(GridMetrics::new(width, columns, self.row_height_px, self.gap_px))
    }

    /// Record a container width measurement.
    ///
    /// Zero, negative and non-finite widths mean the container is not laid out
    /// yet; they leave the state (and any resolved column count) unchanged.
    /// Returns `true` when the measurement caused a relayout.
    #[inline]
    pub fn on_width_measured(&mut self, width_px: f32) -> bool {
        if !width_px.is_finite() || width_px <= 0.0 {
            trace!(target: "bento_grid", "ignoring unusable width {width_px}");
            return false;
        }
        self.width_px = Some(width_px);
        let columns = self.breakpoints.columns_for(width_px);
        if self.columns() == Some(columns) {
            return false;
        }
        debug!(
            target: "bento_grid",
            "container {width_px}px: {:?} -> {columns} columns",
            self.columns()
        );
        self.state = GridState::Ready { columns };
        self.relayout();
        true
    }

    /// Pack an arbitrary image list with this gallery's shapes.
    ///
    /// Does not change the controller's own state.
    #[inline]
    #[must_use]
    pub fn compute_layout(&self, images: &[ImageRef], columns: Option<usize>) -> Vec<Placement> {
        compute_layout(images, &self.store, columns)
    }

    /// Replace the canonical image list wholesale.
    ///
    /// Shapes follow their images into the new list. Images that are no
    /// longer present lose their entries. Any pending reorder is discarded.
    #[inline]
    pub fn set_images(&mut self, images: Vec<ImageRef>) {
        if images == self.images {
            return;
        }
        self.cancel_pending("image list replaced");
        let old_to_new = index_map(&self.images, &images);
        self.store.on_reordered(&old_to_new);
        self.store.truncate(images.len());
        self.images = images;
        self.relayout();
    }

    /// Change the shape of the image at `index` and repack.
    ///
    /// Indices outside the image list are ignored.
    #[inline]
    pub fn on_shape_changed(&mut self, index: usize, shape: Shape) {
        if index >= self.images.len() {
            warn!(target: "bento_grid", "shape change for missing image index {index}");
            return;
        }
        self.store.set_shape(index, shape);
        self.relayout();
    }

    /// Insert `image` at `at_index` (clamped to the end of the list) and repack.
    ///
    /// The new image starts out square.
    #[inline]
    pub fn on_image_added(&mut self, at_index: usize, image: ImageRef) {
        let at_index = at_index.min(self.images.len());
        self.cancel_pending("image added");
        self.images.insert(at_index, image);
        self.store.on_image_inserted(at_index);
        self.relayout();
    }

    /// Remove the image at `at_index` and repack.
    ///
    /// Returns the removed image, or `None` if the index was out of range.
    #[inline]
    pub fn on_image_removed(&mut self, at_index: usize) -> Option<ImageRef> {
        if at_index >= self.images.len() {
            warn!(target: "bento_grid", "removal of missing image index {at_index}");
            return None;
        }
        self.cancel_pending("image removed");
        let removed = self.images.remove(at_index);
        self.store.on_image_removed(at_index);
        self.relayout();
        Some(removed)
    }

    /// Feed a settled drag snapshot, timestamped now.
    #[inline]
    pub fn on_drag_settled(&mut self, placements: &[Placement]) -> DragOutcome {
        self.on_drag_settled_at(placements, Instant::now())
    }

    /// Feed a settled drag snapshot observed at `now`.
    ///
    /// The snapshot is read in row-major order. If that order differs from the
    /// canonical one it becomes the pending reorder, replacing any earlier one
    /// and restarting the quiet period. Ignored while unmeasured.
    #[inline]
    pub fn on_drag_settled_at(&mut self, placements: &[Placement], now: Instant) -> DragOutcome {
        if self.columns().is_none() {
            trace!(target: "bento_grid", "drag before measurement ignored");
            return DragOutcome::Unchanged;
        }
        self.translator.on_drag_settled(placements, &self.images, now)
    }

    /// Feed a drag snapshot given in container pixels.
    ///
    /// Positions are snapped to cells first. Ignored while unmeasured.
    #[inline]
    pub fn on_drag_positions_at(
        &mut self,
        positions: &[DragPosition],
        now: Instant,
    ) -> DragOutcome {
        let Some(metrics) = self.metrics() else {
            trace!(target: "bento_grid", "drag before measurement ignored");
            return DragOutcome::Unchanged;
        };
        let snapped: Vec<Placement> = positions
            .iter()
            .map(|position| metrics.snap(position))
            .collect();
        self.on_drag_settled_at(&snapped, now)
    }

    /// Release the pending reorder if its quiet period has elapsed by `now`.
    ///
    /// The emitted order is not applied; pass it to [`Self::apply_order`] once
    /// the caller has adopted it. Orders that are no longer a permutation of
    /// the current images are discarded.
    #[inline]
    pub fn poll_reorder(&mut self, now: Instant) -> Option<Vec<ImageRef>> {
        let order = self.translator.poll(now)?;
        if order == self.images {
            return None;
        }
        let is_permutation = order.len() == self.images.len()
            && index_map(&self.images, &order).len() == self.images.len();
        if !is_permutation {
            warn!(target: "bento_grid", "dropping reorder that does not match the current images");
            return None;
        }
        Some(order)
    }

    /// Instant at which the pending reorder becomes due.
    #[inline]
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.translator.deadline()
    }

    /// Whether a reorder is waiting for its quiet period.
    #[inline]
    #[must_use]
    pub const fn has_pending_reorder(&self) -> bool {
        self.translator.is_pending()
    }

    /// Adopt `order` as the canonical image order, moving every shape along
    /// with its image, and repack.
    ///
    /// Returns `false` if the order was already current.
    #[inline]
    pub fn apply_order(&mut self, order: Vec<ImageRef>) -> bool {
        if order == self.images {
            return false;
        }
        let old_to_new = index_map(&self.images, &order);
        self.store.on_reordered(&old_to_new);
        self.store.truncate(order.len());
        self.images = order;
        self.relayout();
        true
    }

    /// Stop the gallery, discarding any pending reorder.
    #[inline]
    pub fn dispose(mut self) {
        self.cancel_pending("controller disposed");
    }

    fn cancel_pending(&mut self, reason: &str) {
        if self.translator.cancel() {
            debug!(target: "bento_grid", "pending reorder cancelled: {reason}");
        }
    }

    fn relayout(&mut self) {
        let _span = debug_span!("bento_relayout", images = self.images.len()).entered();
        self.placements = compute_layout(&self.images, &self.store, self.columns());
        trace!(target: "bento_grid", "relayout produced {} placements", self.placements.len());
    }
}
