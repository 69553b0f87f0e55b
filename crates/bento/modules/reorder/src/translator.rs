//! Row-major translation of drag results into a linear image order.

use crate::debounce::Debouncer;
use bento_packing::{ImageRef, Placement};
use core::time::Duration;
use log::{debug, trace};
use std::time::Instant;

/// Quiet period applied to drag emissions unless configured otherwise.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Identities of `placements` in row-major order.
///
/// Placements are ordered by row, then by column. The sort is stable, so
/// blocks reported at the same origin keep their relative input order.
#[inline]
#[must_use]
pub fn row_major_order(placements: &[Placement]) -> Vec<ImageRef> {
    let mut ordered: Vec<&Placement> = placements.iter().collect();
    ordered.sort_by_key(|placed| (placed.y, placed.x));
    ordered
        .into_iter()
        .map(|placed| placed.identity.clone())
        .collect()
}

/// What a settled drag snapshot did to the pending emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// A new order is pending and will be released after the quiet period.
    Scheduled,
    /// The snapshot reproduces the known order; any pending emission was dropped.
    Unchanged,
}

/// Turns drag snapshots into debounced reorder emissions.
#[derive(Debug, Clone)]
pub struct ReorderTranslator {
    debouncer: Debouncer<Vec<ImageRef>>,
}

impl Default for ReorderTranslator {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl ReorderTranslator {
    /// Create a translator that waits `quiet` after the last snapshot.
    #[inline]
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Feed one settled snapshot observed at `now`.
    ///
    /// `known` is the order the caller already holds. A snapshot whose
    /// row-major order matches it cancels any pending emission, since the
    /// burst ended where it started.
    #[inline]
    pub fn on_drag_settled(
        &mut self,
        placements: &[Placement],
        known: &[ImageRef],
        now: Instant,
    ) -> DragOutcome {
        let order = row_major_order(placements);
        if order == known {
            if self.debouncer.cancel() {
                debug!(
                    target: "bento_reorder",
                    "drag returned to known order; pending emission dropped"
                );
            }
            return DragOutcome::Unchanged;
        }
        trace!(target: "bento_reorder", "drag order pending: {} images", order.len());
        self.debouncer.schedule(order, now);
        DragOutcome::Scheduled
    }

    /// Release the pending order if the quiet period has elapsed by `now`.
    #[inline]
    pub fn poll(&mut self, now: Instant) -> Option<Vec<ImageRef>> {
        let order = self.debouncer.poll(now)?;
        debug!(
            target: "bento_reorder",
            "emitting reorder of {} images ({} intermediate snapshots superseded)",
            order.len(),
            self.debouncer.superseded()
        );
        Some(order)
    }

    /// Drop any pending emission.
    #[inline]
    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    /// Instant at which the pending emission becomes due.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Whether an emission is pending.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_catalog::Footprint;

    fn placed(id: &str, x: usize, y: usize) -> Placement {
        Placement::new(id.into(), x, y, Footprint::new(1, 1))
    }

    fn ids(order: &[ImageRef]) -> Vec<&str> {
        order.iter().map(ImageRef::as_str).collect()
    }

    /// Rows come first, then columns within a row.
    #[test]
    fn test_row_major_sort() {
        let placements = [placed("A", 0, 1), placed("B", 1, 0), placed("C", 0, 0)];
        assert_eq!(ids(&row_major_order(&placements)), vec!["C", "B", "A"]);
    }

    /// Blocks dropped on the same origin keep their reported order.
    #[test]
    fn test_ties_keep_input_order() {
        let placements = [placed("A", 1, 0), placed("B", 1, 0), placed("C", 0, 0)];
        assert_eq!(ids(&row_major_order(&placements)), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_snapshot_yields_empty_order() {
        assert!(row_major_order(&[]).is_empty());
    }

    /// A burst of snapshots yields one emission carrying the last order.
    #[test]
    fn test_burst_collapses_to_last_order() {
        let _ = env_logger::builder().is_test(true).try_init();
        let known: Vec<ImageRef> = vec!["A".into(), "B".into(), "C".into()];
        let start = Instant::now();
        let mut translator = ReorderTranslator::default();

        let first = [placed("B", 0, 0), placed("A", 1, 0), placed("C", 2, 0)];
        let second = [placed("C", 0, 0), placed("A", 1, 0), placed("B", 2, 0)];
        let third = [placed("C", 0, 0), placed("B", 1, 0), placed("A", 2, 0)];
        for (step, snapshot) in [&first, &second, &third].into_iter().enumerate() {
            let at = start + Duration::from_millis(100 * step as u64);
            assert_eq!(
                translator.on_drag_settled(snapshot, &known, at),
                DragOutcome::Scheduled
            );
            assert_eq!(translator.poll(at + Duration::from_millis(50)), None);
        }

        let due = start + Duration::from_millis(500);
        assert_eq!(translator.deadline(), Some(due));
        let emitted = translator.poll(due).unwrap_or_default();
        assert_eq!(ids(&emitted), vec!["C", "B", "A"]);
        assert_eq!(translator.poll(due + DEFAULT_QUIET_PERIOD), None);
    }

    /// Position jitter without an order change never schedules an emission.
    #[test]
    fn test_unchanged_order_not_emitted() {
        let known: Vec<ImageRef> = vec!["A".into(), "B".into()];
        let start = Instant::now();
        let mut translator = ReorderTranslator::default();
        let jitter = [placed("A", 0, 0), placed("B", 0, 1)];
        assert_eq!(
            translator.on_drag_settled(&jitter, &known, start),
            DragOutcome::Unchanged
        );
        assert!(!translator.is_pending());
        assert_eq!(translator.poll(start + DEFAULT_QUIET_PERIOD), None);
    }

    /// Dragging away and back within one window cancels the emission.
    #[test]
    fn test_return_to_known_order_cancels_pending() {
        let known: Vec<ImageRef> = vec!["A".into(), "B".into()];
        let start = Instant::now();
        let mut translator = ReorderTranslator::default();
        let swapped = [placed("B", 0, 0), placed("A", 1, 0)];
        let restored = [placed("A", 0, 0), placed("B", 1, 0)];
        translator.on_drag_settled(&swapped, &known, start);
        translator.on_drag_settled(&restored, &known, start + Duration::from_millis(100));
        assert_eq!(translator.poll(start + Duration::from_secs(1)), None);
    }
}
