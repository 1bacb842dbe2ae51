/// Grid and bounding-box overlay toggles
use crate::scene::{Scene, SharedScene};

/// Overlay toggles. Forced off and locked while no mesh is shown.
pub struct DisplayOptions<S: Scene> {
    scene: SharedScene<S>,
    show_grid: bool,
    show_bounds: bool,
    enabled: bool,
}

impl<S: Scene> DisplayOptions<S> {
    pub fn new(scene: SharedScene<S>) -> Self {
        Self {
            scene,
            show_grid: false,
            show_bounds: false,
            enabled: false,
        }
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn show_bounds(&self) -> bool {
        self.show_bounds
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Lock or unlock the toggles. Locking switches both overlays off.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.set_grid(false);
            self.set_bounds(false);
        }
        self.enabled = enabled;
    }

    pub fn toggle_grid(&mut self) {
        if self.enabled {
            self.set_grid(!self.show_grid);
        }
    }

    pub fn toggle_bounds(&mut self) {
        if self.enabled {
            self.set_bounds(!self.show_bounds);
        }
    }

    fn set_grid(&mut self, visible: bool) {
        if self.show_grid != visible {
            self.show_grid = visible;
            self.scene.borrow_mut().show_grid_overlay(visible);
        }
    }

    fn set_bounds(&mut self, visible: bool) {
        if self.show_bounds != visible {
            self.show_bounds = visible;
            self.scene.borrow_mut().show_bounding_volume(visible);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoxBounds;
    use crate::geometry::Mesh;
    use crate::scene::{share, ActorId};

    #[derive(Default)]
    struct Overlays {
        grid: bool,
        bounds: bool,
    }

    impl Scene for Overlays {
        fn add_mesh(&mut self, _mesh: Mesh) -> ActorId {
            ActorId(0)
        }
        fn remove_actor(&mut self, _actor: ActorId) {}
        fn clip_to_box(&self, mesh: &Mesh, _bounds: &BoxBounds, _invert: bool) -> Mesh {
            mesh.clone()
        }
        fn set_nonuniform_scale(&mut self, _factors: [f64; 3]) {}
        fn reframe_camera(&mut self) {}
        fn request_redraw(&mut self) {}
        fn show_bounding_volume(&mut self, visible: bool) {
            self.bounds = visible;
        }
        fn show_grid_overlay(&mut self, visible: bool) {
            self.grid = visible;
        }
    }

    #[test]
    fn test_toggles_locked_without_mesh() {
        let scene = share(Overlays::default());
        let mut options = DisplayOptions::new(scene.clone());
        options.toggle_grid();
        options.toggle_bounds();

        assert!(!options.show_grid());
        assert!(!scene.borrow().grid);
        assert!(!scene.borrow().bounds);
    }

    #[test]
    fn test_locking_switches_overlays_off() {
        let scene = share(Overlays::default());
        let mut options = DisplayOptions::new(scene.clone());
        options.set_enabled(true);
        options.toggle_grid();
        options.toggle_bounds();
        assert!(scene.borrow().grid && scene.borrow().bounds);

        options.set_enabled(false);
        assert!(!options.show_grid() && !options.show_bounds());
        assert!(!scene.borrow().grid && !scene.borrow().bounds);
    }
}
