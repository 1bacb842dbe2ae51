/// Model transforms: view rotation and per-axis scale
use nalgebra::{Matrix4, Point3, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Non-uniform scale about the origin
    pub fn scale_matrix(factors: [f64; 3]) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(
            factors[0] as f32,
            factors[1] as f32,
            factors[2] as f32,
        ))
    }

    /// Scale the scene about the origin, then spin it about `pivot`
    pub fn model_matrix(
        rotation: &RotationState,
        factors: [f64; 3],
        pivot: &Point3<f32>,
    ) -> Matrix4<f32> {
        let to_pivot = Self::translation_matrix(pivot.x, pivot.y, pivot.z);
        let from_pivot = Self::translation_matrix(-pivot.x, -pivot.y, -pivot.z);
        to_pivot * Self::rotation_matrix(rotation) * from_pivot * Self::scale_matrix(factors)
    }
}
