//! Frame rendering: per-pixel sampling, averaging, and ray statistics.
//!
//! Pixels are independent: each reads only the shared read-only scene and
//! camera and owns a private RNG state, so rows are rendered in parallel
//! with rayon and the per-row ray tallies are summed in the reduction - no
//! per-ray atomics.

use crate::camera::Camera;
use crate::integrator::Integrator;
use crate::rng::XorShift32;
use crate::scene::Scene;
use prism_math::Vec4;
use rayon::prelude::*;
use std::time::Instant;

/// Per-frame render parameters.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Monte Carlo samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Frame counter; feeds the per-row RNG seed so successive frames
    /// decorrelate
    pub frame_count: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            samples_per_pixel: 16,
            frame_count: 0,
        }
    }
}

/// Dense row-major grid of linear RGBA-f32 colors.
///
/// Row 0 is the bottom of the image (v = 0 in camera space). Alpha is 1 for
/// paths that reached the sky and 0 for fully absorbed ones, averaged over
/// the pixel's samples.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl Framebuffer {
    fn new(width: u32, height: u32, pixels: Vec<Vec4>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y), y counted from the bottom row.
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Raw byte view of the RGBA-f32 pixels, for upload to a presentation
    /// layer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to 8-bit RGBA with gamma-2 correction, rows flipped to the
    /// top-down convention image formats expect.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let color = self.get(x, y);
                bytes.push(to_gamma_byte(color.x));
                bytes.push(to_gamma_byte(color.y));
                bytes.push(to_gamma_byte(color.z));
                bytes.push((color.w.clamp(0.0, 1.0) * 255.0) as u8);
            }
        }
        bytes
    }
}

/// Apply gamma correction (gamma = 2.0) and quantize to a byte.
#[inline]
fn to_gamma_byte(linear: f32) -> u8 {
    let gamma = if linear > 0.0 { linear.sqrt() } else { 0.0 };
    (gamma.clamp(0.0, 1.0) * 255.0) as u8
}

/// A rendered frame: the framebuffer plus the total rays traced while
/// producing it.
pub struct Frame {
    pub framebuffer: Framebuffer,
    pub rays_traced: u64,
}

/// Seed for a row's RNG stream. Always odd, so never the zero fixed point.
#[inline]
fn row_seed(y: u32, frame_count: u32) -> u32 {
    (y.wrapping_mul(9781))
        .wrapping_add(frame_count.wrapping_mul(6271))
        | 1
}

fn render_row(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    integrator: &dyn Integrator,
    y: u32,
) -> (Vec<Vec4>, u64) {
    let inv_width = 1.0 / config.width as f32;
    let inv_height = 1.0 / config.height as f32;
    let mut rng = XorShift32::seeded(row_seed(y, config.frame_count));
    let mut rays = 0u64;
    let mut row = Vec::with_capacity(config.width as usize);

    for x in 0..config.width {
        let mut color = Vec4::ZERO;
        for _ in 0..config.samples_per_pixel {
            let u = (x as f32 + rng.next_f32()) * inv_width;
            let v = (y as f32 + rng.next_f32()) * inv_height;
            let ray = camera.get_ray(u, v, &mut rng);
            color += integrator.radiance(scene, ray, &mut rng, &mut rays);
        }
        row.push(color / config.samples_per_pixel as f32);
    }

    (row, rays)
}

/// Render a frame, rows in parallel.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    integrator: &dyn Integrator,
) -> Frame {
    let start = Instant::now();

    let rows: Vec<(Vec<Vec4>, u64)> = (0..config.height)
        .into_par_iter()
        .map(|y| render_row(scene, camera, config, integrator, y))
        .collect();

    let frame = assemble(rows, config);
    log_frame_stats(&frame, config, start);
    frame
}

/// Render a frame on the calling thread.
///
/// Same semantics (and identical pixels) as [`render`]; rows are seeded
/// independently, so the execution order does not affect the output.
pub fn render_st(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    integrator: &dyn Integrator,
) -> Frame {
    let start = Instant::now();

    let rows: Vec<(Vec<Vec4>, u64)> = (0..config.height)
        .map(|y| render_row(scene, camera, config, integrator, y))
        .collect();

    let frame = assemble(rows, config);
    log_frame_stats(&frame, config, start);
    frame
}

fn assemble(rows: Vec<(Vec<Vec4>, u64)>, config: &RenderConfig) -> Frame {
    let mut pixels = Vec::with_capacity((config.width * config.height) as usize);
    let mut rays_traced = 0u64;
    for (row, rays) in rows {
        pixels.extend(row);
        rays_traced += rays;
    }

    Frame {
        framebuffer: Framebuffer::new(config.width, config.height, pixels),
        rays_traced,
    }
}

fn log_frame_stats(frame: &Frame, config: &RenderConfig, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    let mrays = frame.rays_traced as f64 / elapsed / 1_000_000.0;
    log::debug!(
        "frame {}: {}x{} @ {} spp, {} rays in {:.3}s ({:.2} MRays/s)",
        config.frame_count,
        config.width,
        config.height,
        config.samples_per_pixel,
        frame.rays_traced,
        elapsed,
        mrays
    );
}
