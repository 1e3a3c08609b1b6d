//! Sphere geometry and ray-sphere intersection.

use crate::scene::SceneError;
use prism_math::{Interval, Ray, Vec3};

/// Record of a ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Point of intersection
    pub position: Vec3,
    /// Ray parameter at the intersection, used for nearest-hit comparison
    pub t: f32,
    /// Geometric outward normal, unit length.
    ///
    /// Always points away from the sphere center, even for rays arriving
    /// from inside the sphere; the dielectric scatter path derives the
    /// front-facing normal itself from the sign of `dot(dir, normal)`.
    pub normal: Vec3,
}

/// A sphere primitive. Immutable after scene construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Rejects non-positive radii.
    pub fn new(center: Vec3, radius: f32) -> Result<Self, SceneError> {
        if radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Test the ray against this sphere, accepting hits with `t` strictly
    /// inside `ray_t`.
    ///
    /// Solves the half-b quadratic `a t^2 + 2 b t + c = 0`; the near root is
    /// tried first so the closer surface of the sphere wins.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<RayHit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        for t in [(-b - sqrtd) / a, (-b + sqrtd) / a] {
            if ray_t.surrounds(t) {
                let position = ray.at(t);
                return Some(RayHit {
                    position,
                    t,
                    normal: (position - self.center) / self.radius,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at(center: Vec3) -> Sphere {
        Sphere::new(center, 1.0).unwrap()
    }

    #[test]
    fn test_head_on_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((hit.t - 1.5).abs() < 1e-4);
        // Hit point lies on the surface.
        assert!(((hit.position - sphere.center()).length() - sphere.radius()).abs() < 1e-4);
        // Normal is unit length and faces the ray origin.
        assert!((hit.normal.length() - 1.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn test_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_tangent_ray_misses() {
        // Grazing ray: discriminant == 0 counts as a miss.
        let sphere = unit_sphere_at(Vec3::new(0.0, 1.0, -3.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_t_strictly_inside_interval() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Near root at 1.5, far root at 2.5. Shut the window on the near root
        // and the far root is reported instead.
        let hit = sphere.hit(&ray, Interval::new(2.0, 10.0)).unwrap();
        assert!((hit.t - 2.5).abs() < 1e-4);

        // No root inside (0, 1).
        assert!(sphere.hit(&ray, Interval::new(0.0, 1.0)).is_none());
    }

    #[test]
    fn test_normal_from_inside_points_outward() {
        // Ray starts at the center; the normal at the exit point still points
        // away from the center (with the ray), not back toward the origin.
        let sphere = unit_sphere_at(Vec3::ZERO);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        let hit = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((hit.normal - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-4);
        assert!(hit.normal.dot(ray.direction) > 0.0);
    }

    #[test]
    fn test_unnormalized_direction() {
        // Doubling the direction halves t but hits the same point.
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));

        let hit = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((hit.t - 0.75).abs() < 1e-4);
        assert!((hit.position - Vec3::new(0.0, 0.0, -1.5)).length() < 1e-4);
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(Sphere::new(Vec3::ZERO, 0.0).is_err());
        assert!(Sphere::new(Vec3::ZERO, -1.0).is_err());
    }
}
