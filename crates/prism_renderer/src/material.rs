//! Material models and scattering.
//!
//! Exactly three surface behaviors exist, so the material is a closed enum
//! dispatched by a single `scatter` match rather than an open trait object.
//! `scatter` returns `None` when the bounce is absorbed; that is a modeled
//! outcome of the light transport, not an error.

use crate::rng::XorShift32;
use crate::scene::SceneError;
use crate::sphere::RayHit;
use prism_math::{Ray, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Surface behavior of a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface; bounces into a random direction around the normal.
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` in [0, 1] perturbs the mirror direction.
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive surface (glass, water); colorless.
    Dielectric { ref_index: f32 },
}

/// Outcome of a successful scatter: the color filter the bounce applies and
/// the outgoing ray to continue along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

impl Material {
    /// Diffuse material with the given base color.
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian { albedo }
    }

    /// Metal with the given base color; fuzz is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Dielectric with the given refractive index (1.0 = air, 1.5 = glass).
    /// Rejects non-positive indices.
    pub fn dielectric(ref_index: f32) -> Result<Self, SceneError> {
        if ref_index <= 0.0 {
            return Err(SceneError::InvalidRefractiveIndex(ref_index));
        }
        Ok(Self::Dielectric { ref_index })
    }

    /// Scatter an incoming ray at a hit point.
    ///
    /// Returns `None` when the bounce is absorbed. Only metal absorbs in
    /// this model, when the fuzz perturbation pushes the reflected ray back
    /// under the surface.
    pub fn scatter(
        &self,
        ray: &Ray,
        hit: &RayHit,
        rng: &mut XorShift32,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let target = hit.position + hit.normal + rng.in_unit_sphere();
                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(hit.position, target - hit.position),
                })
            }

            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray.direction.normalize(), hit.normal);
                let scattered =
                    Ray::new(hit.position, reflected + fuzz * rng.in_unit_sphere());
                if scattered.direction.dot(hit.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered,
                    })
                } else {
                    None
                }
            }

            Material::Dielectric { ref_index } => {
                // The normal is the geometric outward one; the sign of
                // dot(dir, normal) says whether we are entering or exiting
                // the medium.
                let reflect_dir = reflect(ray.direction, hit.normal);
                let dir_dot_n = ray.direction.dot(hit.normal);
                let (outward_normal, ni_over_nt, cosine) = if dir_dot_n > 0.0 {
                    (
                        -hit.normal,
                        ref_index,
                        ref_index * dir_dot_n / ray.direction.length(),
                    )
                } else {
                    (
                        hit.normal,
                        1.0 / ref_index,
                        -dir_dot_n / ray.direction.length(),
                    )
                };

                // Total internal reflection forces the reflected branch.
                let (refract_dir, reflect_prob) =
                    match refract(ray.direction, outward_normal, ni_over_nt) {
                        Some(refracted) => (refracted, schlick(cosine, ref_index)),
                        None => (Vec3::ZERO, 1.0),
                    };

                let direction = if rng.next_f32() < reflect_prob {
                    reflect_dir
                } else {
                    refract_dir
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(hit.position, direction),
                })
            }
        }
    }
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with outward normal `n` and index ratio
/// `ni_over_nt`. Returns `None` on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation of Fresnel reflectance at a dielectric boundary.
#[inline]
pub fn schlick(cosine: f32, ref_index: f32) -> f32 {
    let r0 = (1.0 - ref_index) / (1.0 + ref_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
