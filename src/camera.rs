use std::ops::Range;

use glam::*;

/// A camera trait.
pub trait CameraTrait {
    /// Get the view matrix.
    fn view(&self) -> Mat4;

    /// Get the projection matrix.
    fn projection(&self, aspect_ratio: f32) -> Mat4;
}

/// A perspective camera.
///
/// The orientation is a free quaternion so that the camera can roll, as required by
/// free-flight navigation.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// The position of the camera.
    pub pos: Vec3,
    /// The orientation of the camera.
    pub rot: Quat,
    /// The z range of the camera.
    pub z: Range<f32>,
    /// The vertical FOV.
    pub vertical_fov: f32,
    /// The aspect ratio, width over height.
    ///
    /// Call [`PerspectiveCamera::update_projection_matrix`] after changing it.
    pub aspect: f32,
    /// The cached projection matrix.
    projection: Mat4,
}

impl PerspectiveCamera {
    /// Create a new camera.
    pub fn new(vertical_fov: f32, aspect: f32, z: Range<f32>) -> Self {
        let mut camera = Self {
            pos: Vec3::ZERO,
            rot: Quat::IDENTITY,
            z,
            vertical_fov,
            aspect,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the cached projection matrix from the FOV, aspect and z range.
    pub fn update_projection_matrix(&mut self) {
        self.projection = self.projection(self.aspect);
    }

    /// Get the cached projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Get the view projection matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }

    /// Get the forward vector.
    pub fn get_forward(&self) -> Vec3 {
        self.rot * Vec3::NEG_Z
    }

    /// Get the right vector.
    pub fn get_right(&self) -> Vec3 {
        self.rot * Vec3::X
    }

    /// Get the up vector.
    pub fn get_up(&self) -> Vec3 {
        self.rot * Vec3::Y
    }

    /// Move the camera along its local axes.
    pub fn translate_local(&mut self, delta: Vec3) {
        self.pos += self.rot * delta;
    }

    /// Rotate the camera by a rotation in its local frame.
    pub fn rotate_local(&mut self, delta: Quat) {
        self.rot = (self.rot * delta).normalize();
    }

    /// Orient the camera to look at a target.
    pub fn look_at(&mut self, target: Vec3) {
        let view = Mat4::look_at_rh(self.pos, target, Vec3::Y);
        self.rot = Quat::from_mat4(&view.inverse()).normalize();
    }
}

impl CameraTrait for PerspectiveCamera {
    fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rot, self.pos).inverse()
    }

    fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.vertical_fov, aspect_ratio, self.z.start, self.z.end)
    }
}
