use glam::Vec3;

use crate::math::ray::Ray;

/// Plane in Hessian normal form: `normal · p + distance = 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            distance,
        }
    }

    /// Upward-facing horizontal plane at the given height.
    pub fn horizontal(height: f32) -> Self {
        Self {
            normal: Vec3::Y,
            distance: -height,
        }
    }

    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            normal,
            distance: -normal.dot(a),
        }
    }

    pub fn flip(self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    pub fn signed_distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Ray parameter of the intersection in front of the ray origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-4 {
            return None;
        }

        let t = -self.signed_distance_to_point(ray.origin) / denom;
        (t >= 0.0).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn downward_ray_hits_floor() {
        let floor = Plane::horizontal(-0.5);
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::NEG_Y);
        let t = floor.intersect_ray(&ray).unwrap();
        assert_abs_diff_eq!(t, 2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(ray.at(t).y, -0.5, epsilon = 1e-5);
    }

    #[test]
    fn parallel_ray_misses() {
        let floor = Plane::horizontal(0.0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(floor.intersect_ray(&ray).is_none());
    }

    #[test]
    fn plane_behind_origin_misses() {
        let floor = Plane::horizontal(0.0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(floor.intersect_ray(&ray).is_none());
    }

    #[test]
    fn from_points_matches_horizontal() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        assert_abs_diff_eq!(plane.normal.y, 1.0, epsilon = 1e-6);
        let above = plane.signed_distance_to_point(Vec3::new(5.0, 3.0, 2.0));
        assert_abs_diff_eq!(above, 2.0, epsilon = 1e-6);
        let flipped = plane.flip().signed_distance_to_point(Vec3::ZERO);
        assert_abs_diff_eq!(flipped, 1.0, epsilon = 1e-6);
    }
}
