/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Point the camera at a bounding sphere so all of it is in view.
    ///
    /// Looks along -Z from in front of the sphere; near/far planes are
    /// fitted around it.
    pub fn frame(&mut self, center: Point3<f32>, radius: f32) {
        let radius = radius.max(1e-3);
        let half_fov = (self.fov * 0.5).min(self.fov * 0.5 * self.aspect);
        let distance = radius / half_fov.sin() * 1.1;

        self.target = center;
        self.position = center + Vector3::new(0.0, 0.0, distance);
        self.up = Vector3::new(0.0, 1.0, 0.0);
        self.near = (distance - radius * 1.5).max(distance * 0.01);
        self.far = distance + radius * 1.5;
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth in normalized device units, or
    /// `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let clip = mvp * point.to_homogeneous();

        // Behind the eye or degenerate
        if clip.w.abs() < 1e-6 || (self.mode == ProjectionMode::Perspective && clip.w < 0.0) {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_framed_sphere_is_on_screen() {
        let mut camera = Camera::new(80, 40);
        let center = Point3::new(5.0, 5.0, 5.0);
        camera.frame(center, 8.7);

        let identity = Matrix4::identity();
        let (x, y, _) = camera
            .project_to_screen(&center, &identity, 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 0.5);
        assert!((y - 20.0).abs() < 0.5);

        for offset in [
            Vector3::new(8.0, 0.0, 0.0),
            Vector3::new(0.0, -8.0, 0.0),
            Vector3::new(0.0, 0.0, 8.0),
        ] {
            let p = center + offset;
            assert!(camera.project_to_screen(&p, &identity, 80, 40).is_some());
        }
    }

    #[test]
    fn test_point_behind_camera_is_culled() {
        let camera = Camera::new(80, 40);
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 80, 40)
            .is_none());
    }
}
