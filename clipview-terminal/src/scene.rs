/// Scene backing the terminal viewer
use std::collections::BTreeMap;

use clipview_core::{ActorId, AxisBounds, BoxBounds, Camera, Mesh, Scene};
use nalgebra::Point3;
use tracing::trace;

/// Actors, scale, camera and overlay flags drawn by the ASCII renderer
pub struct TerminalScene {
    actors: BTreeMap<ActorId, Mesh>,
    next_id: u64,
    scale: [f64; 3],
    camera: Camera,
    show_grid: bool,
    show_bounds: bool,
    dirty: bool,
}

impl TerminalScene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            actors: BTreeMap::new(),
            next_id: 0,
            scale: [1.0; 3],
            camera: Camera::new(width, height),
            show_grid: false,
            show_bounds: false,
            dirty: true,
        }
    }

    pub fn actors(&self) -> impl Iterator<Item = &Mesh> {
        self.actors.values()
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn scale(&self) -> [f64; 3] {
        self.scale
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn grid_visible(&self) -> bool {
        self.show_grid
    }

    pub fn bounds_visible(&self) -> bool {
        self.show_bounds
    }

    /// Unscaled bounds of everything in the scene
    pub fn scene_bounds(&self) -> Option<BoxBounds> {
        self.actors
            .values()
            .filter_map(Mesh::bounds)
            .reduce(|a, b| {
                BoxBounds::new(union(a.x, b.x), union(a.y, b.y), union(a.z, b.z))
            })
    }

    /// Returns true once after each redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height.max(1) as f32;
        self.reframe_camera();
    }
}

fn union(a: AxisBounds, b: AxisBounds) -> AxisBounds {
    AxisBounds::new(a.min.min(b.min), a.max.max(b.max))
}

impl Scene for TerminalScene {
    fn add_mesh(&mut self, mesh: Mesh) -> ActorId {
        self.next_id += 1;
        let id = ActorId(self.next_id);
        trace!(actor = id.0, triangles = mesh.len(), "Actor added");
        self.actors.insert(id, mesh);
        self.dirty = true;
        id
    }

    fn remove_actor(&mut self, actor: ActorId) {
        if self.actors.remove(&actor).is_some() {
            self.dirty = true;
        }
    }

    fn clip_to_box(&self, mesh: &Mesh, bounds: &BoxBounds, invert: bool) -> Mesh {
        mesh.clip_to_box(bounds, invert)
    }

    fn set_nonuniform_scale(&mut self, factors: [f64; 3]) {
        self.scale = factors;
        self.dirty = true;
    }

    /// Frame the scaled scene bounds. An empty scene keeps the current view.
    fn reframe_camera(&mut self) {
        let Some(bounds) = self.scene_bounds() else {
            return;
        };
        let lo = bounds.min_corner();
        let hi = bounds.max_corner();
        let mut center = [0.0f32; 3];
        let mut half = [0.0f32; 3];
        for i in 0..3 {
            center[i] = ((lo[i] + hi[i]) * 0.5 * self.scale[i]) as f32;
            half[i] = ((hi[i] - lo[i]) * 0.5 * self.scale[i]) as f32;
        }
        let radius = (half[0] * half[0] + half[1] * half[1] + half[2] * half[2]).sqrt();
        self.camera
            .frame(Point3::new(center[0], center[1], center[2]), radius);
        self.dirty = true;
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }

    fn show_bounding_volume(&mut self, visible: bool) {
        self.show_bounds = visible;
        self.dirty = true;
    }

    fn show_grid_overlay(&mut self, visible: bool) {
        self.show_grid = visible;
        self.dirty = true;
    }
}
