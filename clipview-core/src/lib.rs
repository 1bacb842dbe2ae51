/// clipview core library - box clipping and scaling for a mesh viewer
///
/// Headless state and logic: bounds tracking, the slider/field synchroniser,
/// the clip and scale controllers, display toggles and sample meshes. All
/// rendering goes through the `Scene` and `BoxWidget` traits, implemented
/// by a front-end.

pub mod bounds;
pub mod clip;
pub mod config;
pub mod control;
pub mod display;
pub mod error;
pub mod geometry;
pub mod panel;
pub mod projection;
pub mod range_sync;
pub mod samples;
pub mod scale;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use bounds::{Axis, AxisBounds, BoundsTracker, BoxBounds, MeshExtent};
pub use clip::{ClipController, ClipState};
pub use config::{ClipConfig, ScaleConfig};
pub use control::Control;
pub use display::DisplayOptions;
pub use error::{ClipViewError, Result};
pub use geometry::{Mesh, Triangle, Vertex};
pub use panel::ClipPanel;
pub use projection::{Camera, ProjectionMode};
pub use range_sync::{FieldEdit, RangeInputSync, SliderValue};
pub use samples::SampleMesh;
pub use scale::ScaleController;
pub use scene::{share, ActorId, BoxWidget, Scene, SharedScene};
pub use transform::{RotationState, Transform};
