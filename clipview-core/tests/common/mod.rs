//! Recording doubles for the scene and box widget.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use clipview_core::{ActorId, BoxBounds, BoxWidget, Mesh, Scene};

/// A scene that records every call made into it.
#[derive(Debug, Default)]
pub struct RecordingScene {
    next_id: u64,
    pub actors: HashMap<ActorId, Mesh>,
    pub clip_calls: Cell<usize>,
    pub last_clip_bounds: Cell<Option<BoxBounds>>,
    pub scales: Vec<[f64; 3]>,
    pub reframes: usize,
    pub redraws: usize,
    pub grid: bool,
    pub bounding_volume: bool,
}

impl RecordingScene {
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// The only displayed mesh. Panics if there is not exactly one.
    pub fn displayed(&self) -> &Mesh {
        assert_eq!(self.actors.len(), 1, "expected exactly one actor");
        self.actors.values().next().unwrap()
    }
}

impl Scene for RecordingScene {
    fn add_mesh(&mut self, mesh: Mesh) -> ActorId {
        self.next_id += 1;
        let id = ActorId(self.next_id);
        self.actors.insert(id, mesh);
        id
    }

    fn remove_actor(&mut self, actor: ActorId) {
        self.actors.remove(&actor);
    }

    fn clip_to_box(&self, mesh: &Mesh, bounds: &BoxBounds, invert: bool) -> Mesh {
        self.clip_calls.set(self.clip_calls.get() + 1);
        self.last_clip_bounds.set(Some(*bounds));
        mesh.clip_to_box(bounds, invert)
    }

    fn set_nonuniform_scale(&mut self, factors: [f64; 3]) {
        self.scales.push(factors);
    }

    fn reframe_camera(&mut self) {
        self.reframes += 1;
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn show_bounding_volume(&mut self, visible: bool) {
        self.bounding_volume = visible;
    }

    fn show_grid_overlay(&mut self, visible: bool) {
        self.grid = visible;
    }
}

/// A box widget that remembers where it was placed.
#[derive(Debug, Default)]
pub struct RecordingWidget {
    pub placements: Vec<BoxBounds>,
    pub opaque: bool,
    pub opacity_changes: Vec<bool>,
}

impl BoxWidget for RecordingWidget {
    fn place(&mut self, bounds: &BoxBounds) {
        self.placements.push(*bounds);
    }

    fn set_interaction_opacity(&mut self, visible: bool) {
        self.opaque = visible;
        self.opacity_changes.push(visible);
    }
}

/// Every vertex of `mesh` lies inside `bounds`, give or take `tolerance`.
pub fn mesh_within(mesh: &Mesh, bounds: &BoxBounds, tolerance: f64) -> bool {
    mesh.triangles
        .iter()
        .flat_map(|t| t.vertices.iter())
        .all(|v| {
            let p = v.position;
            (0..3).all(|i| {
                let c = f64::from(p[i]);
                c >= bounds.min_corner()[i] - tolerance && c <= bounds.max_corner()[i] + tolerance
            })
        })
}
