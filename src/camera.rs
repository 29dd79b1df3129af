use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::math::ray::Ray;

/// Pinhole camera posed in world space. Screen coordinates are in pixels with
/// the origin at the top-left corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y: 60f32.to_radians(),
            near: 0.01,
            far: 100.0,
        }
    }

    pub fn get_vp_matrix(&self, resolution: Vec2) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let projection =
            Mat4::perspective_rh(self.fov_y, resolution.x / resolution.y, self.near, self.far);
        projection * view
    }

    /// Ray from the eye through the given screen point.
    pub fn screen_ray(&self, screen: Vec2, resolution: Vec2) -> Ray {
        let ndc = Vec2::new(
            2.0 * screen.x / resolution.x - 1.0,
            1.0 - 2.0 * screen.y / resolution.y,
        );
        let inverse = self.get_vp_matrix(resolution).inverse();

        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));

        Ray::new(near, far - near)
    }

    /// Screen position of a world point, or `None` if it is behind the camera.
    pub fn world_to_screen(&self, point: Vec3, resolution: Vec2) -> Option<Vec2> {
        let clip = self.get_vp_matrix(resolution) * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * resolution.x,
            (1.0 - ndc.y) * 0.5 * resolution.y,
        ))
    }
}
