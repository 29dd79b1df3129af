use glam::{Mat4, Vec3};

use crate::math::ray::Ray;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(point1: Vec3, point2: Vec3) -> AABB {
        let min = point1.min(point2);
        let max = point1.max(point2);
        AABB { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> AABB {
        let half = size.abs() * 0.5;
        AABB {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center of the upper face.
    pub fn top_center(&self) -> Vec3 {
        let center = self.center();
        Vec3::new(center.x, self.max.y, center.z)
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Axis-aligned box enclosing this box after `matrix` is applied.
    pub fn transform(&self, matrix: &Mat4) -> AABB {
        let corners = self
            .corners()
            .map(|corner| matrix.transform_point3(corner));

        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }

        AABB { min, max }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Slab test. Returns the ray parameter of the entry point, or 0.0 when
    /// the ray starts inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inverse = ray.direction.recip();
        let t1 = (self.min - ray.origin) * inverse;
        let t2 = (self.max - ray.origin) * inverse;

        let t_near = t1.min(t2).max_element().max(0.0);
        let t_far = t1.max(t2).min_element();

        if t_far.is_nan() || t_near.is_nan() || t_far < t_near {
            return None;
        }

        Some(t_near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_box() -> AABB {
        AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5))
    }

    #[test]
    fn ray_hits_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = unit_box().intersect_ray(&ray).unwrap();
        assert_abs_diff_eq!(t, 4.5, epsilon = 1e-5);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(unit_box().intersect_ray(&ray).is_none());
    }

    #[test]
    fn ray_passing_beside_misses() {
        let ray = Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(unit_box().intersect_ray(&ray).is_none());
    }

    #[test]
    fn ray_from_inside_starts_at_zero() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.3, 0.2));
        assert_eq!(unit_box().intersect_ray(&ray), Some(0.0));
    }

    #[test]
    fn transformed_box_follows_translation_and_scale() {
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(1.0, 0.0, 0.0),
        );
        let moved = unit_box().transform(&matrix);
        assert_eq!(moved.min, Vec3::new(0.0, -1.0, -1.0));
        assert_eq!(moved.max, Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn top_center_sits_on_upper_face() {
        let aabb = AABB::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(3.0, 2.0, 2.0));
        assert_eq!(aabb.top_center(), Vec3::new(1.0, 2.0, 0.0));
    }
}
