/// The clipping panel: three axis range controls bound to one clip box
use tracing::debug;

use crate::bounds::{Axis, BoxBounds};
use crate::clip::ClipController;
use crate::config::ClipConfig;
use crate::geometry::Mesh;
use crate::range_sync::RangeInputSync;
use crate::scene::{BoxWidget, Scene, SharedScene};

pub struct ClipPanel<S: Scene, W: BoxWidget> {
    axes: [RangeInputSync; 3],
    clip: ClipController<S, W>,
}

impl<S: Scene, W: BoxWidget> ClipPanel<S, W> {
    pub fn new(scene: SharedScene<S>, widget: W, config: &ClipConfig) -> Self {
        Self {
            axes: std::array::from_fn(|_| RangeInputSync::new(config)),
            clip: ClipController::new(scene, widget, config),
        }
    }

    pub fn controller(&self) -> &ClipController<S, W> {
        &self.clip
    }

    pub fn axis(&self, axis: Axis) -> &RangeInputSync {
        &self.axes[axis.index()]
    }

    /// The controls are only usable while a mesh is loaded
    pub fn is_enabled(&self) -> bool {
        self.clip.is_active()
    }

    /// Bounds as currently shown by the min/max fields
    pub fn field_bounds(&self) -> BoxBounds {
        BoxBounds::new(
            self.axes[0].value(),
            self.axes[1].value(),
            self.axes[2].value(),
        )
    }

    pub fn set_live_update(&mut self, live: bool) {
        self.clip.set_live_update(live);
    }

    /// Swap the source mesh. `None` clears it and disables the panel.
    pub fn load_mesh(&mut self, mesh: Option<Mesh>) {
        match mesh {
            Some(mesh) => {
                self.clip.load_mesh(mesh);
                if self.clip.is_active() {
                    for axis in Axis::ALL {
                        let limits = self.clip.tracker().limits(axis);
                        self.axes[axis.index()].update_range(limits.min, limits.max);
                    }
                }
            }
            None => self.clip.clear(),
        }
    }

    /// A typed min value. Field edits apply at once, like a press and release.
    pub fn edit_min(&mut self, axis: Axis, value: f64) -> Option<BoxBounds> {
        if !self.is_enabled() {
            return None;
        }
        self.axes[axis.index()].on_min_field_changed(value)?;
        self.commit_field_edit()
    }

    /// A typed max value.
    pub fn edit_max(&mut self, axis: Axis, value: f64) -> Option<BoxBounds> {
        if !self.is_enabled() {
            return None;
        }
        self.axes[axis.index()].on_max_field_changed(value)?;
        self.commit_field_edit()
    }

    fn commit_field_edit(&mut self) -> Option<BoxBounds> {
        let bounds = self.field_bounds();
        let applied = self.clip.on_bounds_changed(bounds)?;
        if !self.clip.live_update() {
            self.clip.recompute_clip();
        }
        Some(applied)
    }

    /// The range slider of an axis moved. The clip follows on release unless
    /// live updates are on.
    pub fn slide(&mut self, axis: Axis, low: u32, high: u32) -> Option<BoxBounds> {
        if !self.is_enabled() {
            return None;
        }
        self.axes[axis.index()].on_slider_changed(low, high)?;
        let bounds = self.field_bounds();
        self.clip.on_bounds_changed(bounds)
    }

    /// A slider handle or the box handle was grabbed
    pub fn begin_drag(&mut self) {
        self.clip.on_drag_start();
    }

    pub fn end_drag(&mut self) {
        self.clip.on_drag_end();
    }

    /// The box handle was dragged in the viewport. The range controls are
    /// updated to match without re-triggering the clip.
    pub fn drag_box(&mut self, bounds: BoxBounds) -> Option<BoxBounds> {
        let applied = self.clip.on_bounds_changed(bounds)?;
        for axis in Axis::ALL {
            self.axes[axis.index()].show_bounds(applied.axis(axis));
        }
        Some(applied)
    }

    /// Open every axis back up and restore the full mesh.
    pub fn reset(&mut self) {
        if !self.is_enabled() {
            return;
        }
        for sync in &mut self.axes {
            sync.reset_to_extremes();
        }
        self.clip.reset_clip();
        debug!("Clip panel reset");
    }
}
