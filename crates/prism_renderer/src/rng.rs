//! Deterministic pseudo-random number generation for the tracer.
//!
//! Every stochastic decision in the kernel (pixel jitter, lens sampling,
//! diffuse bounces, fuzz perturbation, reflect-vs-refract choice) draws from
//! a per-pixel xorshift32 stream. The state is explicit and passed by
//! mutable reference into every primitive - there is no ambient RNG - so a
//! parallel worker is reproducible from its seed alone.

use prism_math::Vec3;

/// xorshift32 generator over a single 32-bit state word.
///
/// A zero state is a fixed point of the xorshift transform and would emit
/// zeros forever, so construction goes through [`XorShift32::seeded`], which
/// ORs 1 into the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator from an arbitrary seed.
    ///
    /// The seed is ORed with 1, so any input (including 0) yields a valid
    /// non-zero state.
    #[inline]
    pub fn seeded(seed: u32) -> Self {
        Self { state: seed | 1 }
    }

    /// Advance the state and return it.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 15;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 * (1.0 / 4_294_967_296.0)
    }

    /// Uniform point inside the unit disk in the z = 0 plane.
    ///
    /// Rejection sampling over [-1, 1)^2; ~2 iterations expected. Used for
    /// lens sampling.
    pub fn in_unit_disk(&mut self) -> Vec3 {
        loop {
            let p = 2.0 * Vec3::new(self.next_f32(), self.next_f32(), 0.0)
                - Vec3::new(1.0, 1.0, 0.0);
            if p.dot(p) < 1.0 {
                return p;
            }
        }
    }

    /// Uniform point inside the unit sphere.
    ///
    /// Rejection sampling over [-1, 1)^3; ~2.4 iterations expected. Used for
    /// diffuse bounce directions and metal fuzz.
    pub fn in_unit_sphere(&mut self) -> Vec3 {
        loop {
            let p = 2.0 * Vec3::new(self.next_f32(), self.next_f32(), self.next_f32())
                - Vec3::ONE;
            if p.length_squared() < 1.0 {
                return p;
            }
        }
    }
}
