/// Box-clip interaction controller
///
/// Two states: Idle (no mesh, box hidden) and Active (mesh loaded). Every
/// operation in Idle is a no-op. While Active the controller owns exactly one
/// displayed actor, either the full mesh or its latest clipped sub-volume.
use tracing::{debug, info};

use crate::bounds::{BoundsTracker, BoxBounds, MeshExtent};
use crate::config::ClipConfig;
use crate::geometry::Mesh;
use crate::scene::{ActorId, BoxWidget, Scene, SharedScene};

/// Snapshot of the clip interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipState {
    pub active: bool,
    pub live_update: bool,
    pub current_bounds: BoxBounds,
}

#[derive(Debug)]
struct ActiveMesh {
    original: Mesh,
    actor: Option<ActorId>,
    dragging: bool,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Active(ActiveMesh),
}

/// Drives the clip box and the clipped mesh actor
pub struct ClipController<S: Scene, W: BoxWidget> {
    scene: SharedScene<S>,
    widget: W,
    tracker: BoundsTracker,
    live_update: bool,
    phase: Phase,
}

impl<S: Scene, W: BoxWidget> ClipController<S, W> {
    pub fn new(scene: SharedScene<S>, widget: W, config: &ClipConfig) -> Self {
        Self {
            scene,
            widget,
            tracker: BoundsTracker::new(config),
            live_update: config.live_update,
            phase: Phase::Idle,
        }
    }

    pub fn state(&self) -> ClipState {
        ClipState {
            active: self.is_active(),
            live_update: self.live_update,
            current_bounds: self.tracker.bounds(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(&self.phase, Phase::Active(active) if active.dragging)
    }

    pub fn bounds(&self) -> BoxBounds {
        self.tracker.bounds()
    }

    pub fn tracker(&self) -> &BoundsTracker {
        &self.tracker
    }

    pub fn extent(&self) -> Option<&MeshExtent> {
        self.tracker.extent()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// The mesh currently displayed, if any
    pub fn actor(&self) -> Option<ActorId> {
        match &self.phase {
            Phase::Active(active) => active.actor,
            Phase::Idle => None,
        }
    }

    pub fn live_update(&self) -> bool {
        self.live_update
    }

    pub fn set_live_update(&mut self, live: bool) {
        self.live_update = live;
    }

    /// Show a new source mesh and open the clip box to its full extent.
    ///
    /// An empty mesh has no extent and clears the controller instead.
    pub fn load_mesh(&mut self, mesh: Mesh) {
        let Some(extent) = mesh.extent() else {
            self.clear();
            return;
        };
        self.remove_displayed();

        self.tracker.set_extent(extent);
        let bounds = self.tracker.bounds();
        self.widget.place(&bounds);
        self.widget.set_interaction_opacity(false);

        info!(
            triangles = mesh.len(),
            extent = ?extent.bounds().to_array(),
            "Loaded mesh for clipping"
        );

        let actor = {
            let mut scene = self.scene.borrow_mut();
            let actor = scene.add_mesh(mesh.clone());
            scene.reframe_camera();
            actor
        };
        self.phase = Phase::Active(ActiveMesh {
            original: mesh,
            actor: Some(actor),
            dragging: false,
        });
    }

    /// Drop the mesh and return to Idle.
    pub fn clear(&mut self) {
        if !self.is_active() {
            return;
        }
        self.remove_displayed();
        self.phase = Phase::Idle;
        self.tracker.reset();
        self.widget.set_interaction_opacity(false);
        self.scene.borrow_mut().request_redraw();
        info!("Cleared clip mesh");
    }

    fn remove_displayed(&mut self) {
        if let Phase::Active(active) = &mut self.phase {
            if let Some(actor) = active.actor.take() {
                self.scene.borrow_mut().remove_actor(actor);
            }
        }
    }

    /// New bounds from the range controls or the box handle.
    ///
    /// Returns the bounds actually applied after clamping, or `None` when Idle.
    pub fn on_bounds_changed(&mut self, bounds: BoxBounds) -> Option<BoxBounds> {
        if !self.is_active() {
            return None;
        }
        let applied = self.tracker.set_bounds(bounds);
        self.widget.place(&applied);
        self.scene.borrow_mut().request_redraw();
        if self.live_update {
            self.recompute_clip();
        }
        Some(applied)
    }

    /// Replace the displayed actor with the mesh clipped to the current bounds.
    /// The camera is left where it is.
    pub fn recompute_clip(&mut self) {
        let Phase::Active(active) = &mut self.phase else {
            return;
        };
        let bounds = self.tracker.bounds();
        let clipped = self
            .scene
            .borrow()
            .clip_to_box(&active.original, &bounds, false);
        debug!(
            source = active.original.len(),
            clipped = clipped.len(),
            bounds = ?bounds.to_array(),
            "Recomputed clip"
        );

        let mut scene = self.scene.borrow_mut();
        if let Some(previous) = active.actor.take() {
            scene.remove_actor(previous);
        }
        active.actor = Some(scene.add_mesh(clipped));
        scene.request_redraw();
    }

    pub fn on_drag_start(&mut self) {
        let Phase::Active(active) = &mut self.phase else {
            return;
        };
        active.dragging = true;
        self.widget.set_interaction_opacity(true);
    }

    /// End of a drag: restore the outline and recompute once, live or not.
    pub fn on_drag_end(&mut self) {
        let Phase::Active(active) = &mut self.phase else {
            return;
        };
        active.dragging = false;
        self.widget.set_interaction_opacity(false);
        self.recompute_clip();
    }

    /// Open the clip back up to exactly the mesh extent and refit the camera.
    pub fn reset_clip(&mut self) {
        if !self.is_active() {
            return;
        }
        let Some(bounds) = self.tracker.reset_to_extent() else {
            return;
        };
        self.widget.place(&bounds);
        self.recompute_clip();
        self.scene.borrow_mut().reframe_camera();
        debug!("Reset clip to mesh extent");
    }
}
