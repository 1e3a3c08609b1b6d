//! Prism - CPU Monte Carlo path tracing core.
//!
//! Renders scenes of spheres by stochastic path tracing: for each pixel,
//! many randomly perturbed camera rays are traced through the scene,
//! bouncing off surfaces according to per-object materials, and averaged
//! into a final color.
//!
//! The crate exposes the math kernel only: deterministic RNG, thin-lens
//! camera, ray-sphere intersection, material scattering, the radiance
//! integrators, and the per-frame render loop. Window management, GPU
//! presentation and scene authoring are host concerns; the host supplies a
//! [`Scene`] and a [`Camera`] and receives a [`Frame`] of RGBA-f32 pixels
//! plus a traced-ray count.

mod camera;
mod integrator;
mod material;
mod renderer;
mod rng;
mod scene;
mod sphere;

pub use camera::{Camera, CameraConfig, CameraError};
pub use integrator::{sky, Integrator, Iterative, Recursive};
pub use material::{reflect, refract, schlick, Color, Material, ScatterResult};
pub use renderer::{render, render_st, Frame, Framebuffer, RenderConfig};
pub use rng::XorShift32;
pub use scene::{Scene, SceneError, T_EPSILON, T_MAX};
pub use sphere::{RayHit, Sphere};

/// Re-export math types from prism_math
pub use prism_math::{Interval, Ray};
// Re-export the glam vector types for convenience
pub use glam::{Vec3, Vec4};
