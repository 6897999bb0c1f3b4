/// Camera, projection and framing utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::Extents;
use crate::transform::Transform;

/// Initial camera distance that frames a bounding box of the given
/// dimensions in both field-of-view axes.
///
/// `dimensions` is `extents.max - extents.min`; the FOVs are in radians.
/// The footprint radius is the radius of the box in the horizontal (x-z)
/// plane. One candidate distance fits the box height in the vertical FOV,
/// one fits the widest horizontal extent in the horizontal FOV; each is
/// pushed out by the footprint radius and the larger (tighter) constraint
/// wins, so the whole box stays visible at any aspect ratio.
///
/// Degenerate zero-size dimensions yield 0; callers clamp by adding at
/// least the near-clip distance.
pub fn initial_distance(dimensions: Vector3<f32>, fov_x: f32, fov_y: f32) -> f32 {
    let footprint_radius =
        (0.5 * (dimensions.x * dimensions.x + dimensions.z * dimensions.z)).sqrt();

    let fits_height = dimensions.y / 2.0 / (fov_y / 2.0).tan() + footprint_radius;
    let fits_width = dimensions.x.max(dimensions.z) / 2.0 / (fov_x / 2.0).tan() + footprint_radius;

    fits_height.max(fits_width)
}

/// Perspective camera for 3D rendering
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Horizontal field of view implied by the vertical FOV and the
    /// current aspect ratio.
    pub fn horizontal_fov(&self) -> f32 {
        2.0 * ((self.fov / 2.0).tan() * self.aspect).atan()
    }

    /// Back the camera off along +Z far enough to frame the extents,
    /// looking at the origin (the model transform recenters the mesh
    /// there). The near distance is added unconditionally, so a
    /// degenerate zero-size box still lands in front of the near plane.
    /// Returns the chosen distance for seeding the orbit state.
    pub fn frame(&mut self, extents: &Extents) -> f32 {
        let dimensions = extents.dimensions();
        let distance = initial_distance(dimensions, self.horizontal_fov(), self.fov) + self.near;

        self.position = Point3::new(0.0, 0.0, distance);
        self.target = Point3::origin();
        self.far = self.far.max(distance + dimensions.norm());

        distance
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the perspective projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space. Returns `None` for points
    /// behind the camera or outside the view frustum.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = Transform::mvp_matrix(model_matrix, &self.view_matrix(), &self.projection_matrix());
        let clip = mvp * point.to_homogeneous();

        if clip.w <= 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
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
    use approx::assert_relative_eq;

    const QUARTER_TURN: f32 = std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_initial_distance_symmetric_cube() {
        // 2x2x2 box, 90 degree FOV on both axes: both candidates are
        // 1/tan(45) + sqrt(0.5 * 8) = 1 + 2.
        let distance = initial_distance(Vector3::new(2.0, 2.0, 2.0), QUARTER_TURN, QUARTER_TURN);
        assert_relative_eq!(distance, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_initial_distance_degenerate_dimensions() {
        let distance = initial_distance(Vector3::zeros(), QUARTER_TURN, QUARTER_TURN);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_initial_distance_tall_object_binds_vertical() {
        let tall = initial_distance(Vector3::new(1.0, 10.0, 1.0), QUARTER_TURN, QUARTER_TURN);
        let wide = initial_distance(Vector3::new(10.0, 1.0, 1.0), QUARTER_TURN, QUARTER_TURN);
        // Height drives the tall case, width the wide case.
        assert!(tall > 5.0);
        assert!(wide > 5.0);
    }

    #[test]
    fn test_horizontal_fov_square_viewport() {
        let mut camera = Camera::new(100, 100);
        camera.fov = QUARTER_TURN;
        assert_relative_eq!(camera.horizontal_fov(), QUARTER_TURN, epsilon = 1e-6);
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_relative_eq!(camera.aspect, 800.0 / 600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_frame_degenerate_extents_clears_near_plane() {
        let mut camera = Camera::new(800, 600);
        let distance = camera.frame(&Extents::default());
        assert_relative_eq!(distance, camera.near);
        assert_eq!(camera.position, Point3::new(0.0, 0.0, camera.near));
    }

    #[test]
    fn test_frame_looks_at_origin() {
        let mut camera = Camera::new(800, 600);
        let extents = Extents {
            min: Point3::new(-1.0, -1.0, -1.0),
            max: Point3::new(1.0, 1.0, 1.0),
        };
        let distance = camera.frame(&extents);
        assert!(distance > camera.near);
        assert_eq!(camera.target, Point3::origin());
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_project_point_behind_camera_is_culled() {
        let camera = Camera::new(800, 600);
        let behind = Point3::new(0.0, 0.0, 100.0);
        let projected =
            camera.project_to_screen(&behind, &Matrix4::identity(), 800, 600);
        assert!(projected.is_none());
    }

    #[test]
    fn test_project_center_point_lands_mid_screen() {
        let camera = Camera::new(800, 600);
        let (x, y, _depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert_relative_eq!(x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(y, 300.0, epsilon = 1e-3);
    }
}
