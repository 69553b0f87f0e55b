//! Drag-to-order translation for bento galleries.
//!
//! After a drag the interaction layer reports where every block now sits. The
//! arrangement is read back in row-major order (row, then column) to obtain the
//! new linear image order. Drags produce bursts of intermediate snapshots, so
//! emission is debounced: only the last snapshot of a burst is reported, once
//! the pointer has been quiet for the configured period.

mod debounce;
pub use debounce::Debouncer;

mod translator;
pub use translator::{DEFAULT_QUIET_PERIOD, DragOutcome, ReorderTranslator, row_major_order};
