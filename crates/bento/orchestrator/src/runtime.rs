//! Async driver running one gallery controller on a tokio task.
//!
//! Commands arrive on an unbounded channel and are applied in order. The
//! pending reorder deadline is awaited alongside the command channel, so every
//! new drag snapshot re-arms the single timer instead of stacking another one.

use crate::controller::GridController;
use anyhow::{Result, anyhow};
use bento_catalog::Shape;
use bento_packing::{DragPosition, ImageRef, Placement};
use log::debug;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Inputs from the editor and interaction layers.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryCommand {
    /// The container was measured at this width (px)
    MeasureWidth(f32),
    /// The canonical image list was replaced
    SetImages(Vec<ImageRef>),
    /// An image was inserted
    AddImage {
        /// Position of the new image
        at_index: usize,
        /// The new image
        image: ImageRef,
    },
    /// The image at this index was removed
    RemoveImage(usize),
    /// The user picked a shape for one image
    SetShape {
        /// Image index
        index: usize,
        /// Chosen shape
        shape: Shape,
    },
    /// A drag settled with blocks at these cells
    DragSettled(Vec<Placement>),
    /// A drag settled with blocks at these pixel positions
    DragPositions(Vec<DragPosition>),
}

/// Notifications for the rendering and persistence layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// New placements to render
    Layout(Vec<Placement>),
    /// The user's drag produced this image order; already applied to the
    /// gallery, to be persisted by the caller
    Reordered(Vec<ImageRef>),
}

/// Handle to a running gallery task.
///
/// Dropping the handle aborts the task, so no reorder can be emitted after
/// the owning editor is gone.
#[derive(Debug)]
pub struct GalleryRuntime {
    commands: UnboundedSender<GalleryCommand>,
    task: JoinHandle<()>,
}

impl GalleryRuntime {
    /// Spawn `controller` onto `handle`, reporting to `events`.
    #[inline]
    #[must_use]
    pub fn spawn(
        handle: &Handle,
        controller: GridController,
        events: UnboundedSender<GalleryEvent>,
    ) -> Self {
        let (commands, inbox) = mpsc::unbounded_channel();
        let task = handle.spawn(run(controller, inbox, events));
        Self { commands, task }
    }

    /// Queue a command for the gallery.
    ///
    /// # Errors
    /// Returns an error if the gallery task has stopped.
    #[inline]
    pub fn send(&self, command: GalleryCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("gallery task is no longer running"))
    }

    /// Stop the gallery, dropping any pending reorder.
    #[inline]
    pub fn dispose(self) {
        debug!(target: "bento_grid", "gallery runtime disposed");
        drop(self);
    }
}

impl Drop for GalleryRuntime {
    #[inline]
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut controller: GridController,
    mut inbox: UnboundedReceiver<GalleryCommand>,
    events: UnboundedSender<GalleryEvent>,
) {
    let mut published: Vec<Placement> = Vec::new();
    loop {
        let deadline = controller.next_deadline().map(Instant::from_std);
        tokio::select! {
            command = inbox.recv() => {
                let Some(command) = command else {
                    debug!(target: "bento_grid", "command channel closed; gallery stopping");
                    break;
                };
                apply(&mut controller, command);
            }
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(order) = controller.poll_reorder(Instant::now().into_std()) {
                    controller.apply_order(order.clone());
                    if events.send(GalleryEvent::Reordered(order)).is_err() {
                        break;
                    }
                }
            }
        }
        if controller.placements() != published.as_slice() {
            published = controller.placements().to_vec();
            if events.send(GalleryEvent::Layout(published.clone())).is_err() {
                debug!(target: "bento_grid", "event receiver dropped; gallery stopping");
                break;
            }
        }
    }
    controller.dispose();
}

fn apply(controller: &mut GridController, command: GalleryCommand) {
    let now = Instant::now().into_std();
    match command {
        GalleryCommand::MeasureWidth(width_px) => {
            controller.on_width_measured(width_px);
        }
        GalleryCommand::SetImages(images) => controller.set_images(images),
        GalleryCommand::AddImage { at_index, image } => controller.on_image_added(at_index, image),
        GalleryCommand::RemoveImage(at_index) => {
            controller.on_image_removed(at_index);
        }
        GalleryCommand::SetShape { index, shape } => controller.on_shape_changed(index, shape),
        GalleryCommand::DragSettled(placements) => {
            controller.on_drag_settled_at(&placements, now);
        }
        GalleryCommand::DragPositions(positions) => {
            controller.on_drag_positions_at(&positions, now);
        }
    }
}
