//! Math support types for the prism path tracer.
//!
//! Vector algebra comes from `glam`; this crate adds the small geometric
//! types the renderer shares: [`Ray`] and [`Interval`].

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Re-export the vector types the renderer is written against.
pub use glam::{Vec3, Vec4};
