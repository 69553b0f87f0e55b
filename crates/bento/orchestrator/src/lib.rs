//! Orchestration of the bento gallery engine.
//!
//! [`GridController`] owns one gallery's shape store and reorder translator,
//! repacks the grid whenever images, shapes or the column count change, and
//! turns settled drags into debounced reorder emissions. [`GalleryRuntime`]
//! drives a controller on a tokio task for hosts with an async event loop.

pub mod config;
mod controller;
mod runtime;

pub use bento_catalog::{Breakpoints, Footprint, Shape};
pub use bento_packing::{DragPosition, GridMetrics, ImageRef, PixelRect, Placement};
pub use config::BentoConfig;
pub use controller::{GridController, GridState, compute_layout};
pub use runtime::{GalleryCommand, GalleryEvent, GalleryRuntime};
