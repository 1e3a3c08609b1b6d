//! Thin-lens camera for primary ray generation.

use crate::rng::XorShift32;
use prism_math::{Ray, Vec3};
use thiserror::Error;

/// Errors detected when deriving a camera basis.
#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    #[error("look_from and look_at coincide; the view direction is undefined")]
    DegenerateView,

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("aperture must be non-negative, got {0}")]
    InvalidAperture(f32),

    #[error("focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),
}

/// Parameters a camera is derived from.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov_degrees: f32,
    /// Width / height of the target framebuffer
    pub aspect: f32,
    /// Lens diameter; 0 disables depth of field
    pub aperture: f32,
    /// Distance to the plane of perfect focus
    pub focus_dist: f32,
}

/// Derived, immutable-per-frame camera basis.
///
/// All fields are computed together from a [`CameraConfig`]; re-pointing the
/// camera means building a new `Camera`, never patching individual fields,
/// so the basis and the derived corners stay consistent.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Derive the orthonormal basis and screen corners from `config`.
    pub fn new(config: &CameraConfig) -> Result<Self, CameraError> {
        if config.look_from == config.look_at {
            return Err(CameraError::DegenerateView);
        }
        if !(config.vfov_degrees > 0.0 && config.vfov_degrees < 180.0) {
            return Err(CameraError::InvalidFov(config.vfov_degrees));
        }
        if config.aperture < 0.0 {
            return Err(CameraError::InvalidAperture(config.aperture));
        }
        if config.focus_dist <= 0.0 {
            return Err(CameraError::InvalidFocusDistance(config.focus_dist));
        }

        let theta = config.vfov_degrees.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = config.aspect * half_height;

        let origin = config.look_from;
        let w = (config.look_from - config.look_at).normalize();
        let u = config.up.cross(w).normalize();
        let v = w.cross(u);

        let focus = config.focus_dist;
        Ok(Self {
            origin,
            lower_left_corner: origin
                - half_width * focus * u
                - half_height * focus * v
                - focus * w,
            horizontal: 2.0 * half_width * focus * u,
            vertical: 2.0 * half_height * focus * v,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
        })
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Generate the primary ray for normalized screen coordinates (s, t) in
    /// [0, 1], t = 0 at the bottom of the image.
    ///
    /// Draws one lens sample; rays from the same (s, t) but different lens
    /// samples converge only at the focal plane, which is what produces
    /// depth of field.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut XorShift32) -> Ray {
        let rd = self.lens_radius * rng.in_unit_disk();
        let offset = self.u * rd.x + self.v * rd.y;
        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }
}
