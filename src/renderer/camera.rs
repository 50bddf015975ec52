//! Perspective camera for the background layer

use glam::{Mat4, Vec3, Vec4};

/// Camera placed in front of the decoration field, looking into -Z
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Camera {
    pub const FOV: f32 = 75.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;
    pub const DISTANCE: f32 = 5.0;
    pub const TARGET: Vec3 = Vec3::new(0.0, 0.0, -5.0);

    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, Self::DISTANCE),
            target: Self::TARGET,
            fov: Self::FOV,
            near: Self::NEAR,
            far: Self::FAR,
            aspect,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Slow sway driven by animation time. Only x and y move.
    pub fn drift(&mut self, time: f32) {
        self.position.x = (time * 0.001).sin() * 2.0;
        self.position.y = (time * 0.0015).cos();
        self.target = Self::TARGET;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World point to clip space
    pub fn project(&self, view_proj: &Mat4, point: Vec3) -> Vec4 {
        *view_proj * point.extend(1.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}
