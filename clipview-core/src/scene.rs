/// Rendering collaborator interfaces
///
/// Controllers never render. They drive a `Scene` (actors, camera, overlays)
/// and a `BoxWidget` (the interactive clip box), both supplied by the
/// front-end. Tests substitute recording doubles.
use std::cell::RefCell;
use std::rc::Rc;

use crate::bounds::BoxBounds;
use crate::geometry::Mesh;

/// Handle to a mesh actor inside a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u64);

/// The scene/renderer the controllers call into
pub trait Scene {
    /// Insert a mesh actor and return its handle
    fn add_mesh(&mut self, mesh: Mesh) -> ActorId;

    /// Remove an actor. Unknown handles are ignored.
    fn remove_actor(&mut self, actor: ActorId);

    /// Extract the part of `mesh` inside (or, inverted, outside) `bounds`
    fn clip_to_box(&self, mesh: &Mesh, bounds: &BoxBounds, invert: bool) -> Mesh;

    /// Apply a non-uniform scale to the whole scene
    fn set_nonuniform_scale(&mut self, factors: [f64; 3]);

    /// Fit the camera to everything in the scene
    fn reframe_camera(&mut self);

    /// Ask for a redraw on the next frame
    fn request_redraw(&mut self);

    fn show_bounding_volume(&mut self, visible: bool);

    fn show_grid_overlay(&mut self, visible: bool);
}

/// The interactive box handle used to pick the clip region
pub trait BoxWidget {
    /// Move and resize the box to `bounds`
    fn place(&mut self, bounds: &BoxBounds);

    /// Raise the outline while it is being manipulated, lower it afterwards
    fn set_interaction_opacity(&mut self, visible: bool);
}

/// A scene shared between the controllers of one viewer
pub type SharedScene<S> = Rc<RefCell<S>>;

/// Wrap a scene for sharing between controllers
pub fn share<S>(scene: S) -> SharedScene<S> {
    Rc::new(RefCell::new(scene))
}
