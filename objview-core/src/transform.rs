/// Orbit/zoom interaction state and model transform builders
use nalgebra::{Matrix4, Point3, Vector3};

/// Camera distance change per wheel unit.
const ZOOM_STEP: f32 = 0.5;

/// Accumulated orbit rotation, camera distance and pointer sensitivity.
///
/// Rotations are in degrees; sensitivity is degrees of rotation per pixel
/// of pointer motion and is recomputed from the window size on resize.
/// All inputs arrive from the windowing layer as already-extracted values;
/// this type never calls into it.
#[derive(Debug, Clone, Copy)]
pub struct OrbitState {
    rotation_x: f32,
    rotation_y: f32,
    distance: f32,
    sensitivity: f32,
    aspect: f32,
    button_held: bool,
}

impl OrbitState {
    /// Interaction state for a window of the given pixel size, with the
    /// camera starting `distance` along the view axis (normally the value
    /// returned by `Camera::frame`).
    pub fn new(width: f32, height: f32, distance: f32) -> Self {
        let mut state = Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            distance,
            sensitivity: 0.0,
            aspect: 1.0,
            button_held: false,
        };
        state.handle_resize(width, height);
        state
    }

    /// Accumulated rotation about the horizontal and vertical axes, in
    /// degrees.
    pub fn rotation_degrees(&self) -> (f32, f32) {
        (self.rotation_x, self.rotation_y)
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn button_held(&self) -> bool {
        self.button_held
    }

    /// Update the designated-button latch. Returns `true` only when the
    /// state changed, which is the consumer's cue to toggle the windowing
    /// layer's relative-motion mode.
    pub fn handle_button(&mut self, down: bool) -> bool {
        if down == self.button_held {
            return false;
        }
        self.button_held = down;
        true
    }

    /// Pointer motion in pixels, ignored unless the designated button is
    /// held. Vertical motion rotates about the horizontal axis, horizontal
    /// motion about the vertical axis.
    pub fn handle_motion(&mut self, dx: f32, dy: f32) {
        if !self.button_held {
            return;
        }
        self.rotation_x += dy * self.sensitivity;
        self.rotation_y += dx * self.sensitivity;
    }

    /// Wheel motion adjusts the distance linearly. Unclamped: the camera
    /// may pass through the mesh or recede indefinitely.
    pub fn handle_wheel(&mut self, delta: f32) {
        self.distance -= delta * ZOOM_STEP;
    }

    /// Recompute sensitivity (one full revolution across the window's
    /// larger dimension) and aspect ratio; both take effect on the next
    /// frame.
    pub fn handle_resize(&mut self, width: f32, height: f32) {
        self.sensitivity = 360.0 / width.max(height);
        self.aspect = width / height;
    }
}

/// Transform builders for the render path
pub struct Transform;

impl Transform {
    /// Model transform for the current orbit state: recenter the mesh at
    /// its bounding-box center, then apply the accumulated X rotation
    /// followed by the Y rotation, in that fixed order.
    pub fn model_matrix(orbit: &OrbitState, center: Point3<f32>) -> Matrix4<f32> {
        let (rotation_x, rotation_y) = orbit.rotation_degrees();
        let rx = Matrix4::new_rotation(Vector3::new(rotation_x.to_radians(), 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation_y.to_radians(), 0.0));
        let recenter = Matrix4::new_translation(&(Point3::origin() - center));

        ry * rx * recenter
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}
