//! Command-line host for the prism path tracer.
//!
//! Builds the book scene, renders one or more frames, reports throughput and
//! writes the last frame as a PNG.

mod scenes;

use anyhow::{bail, Context, Result};
use prism_renderer::{render, Frame, Integrator, Iterative, Recursive, RenderConfig};
use std::time::Instant;

struct Args {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    frames: u32,
    iterative: bool,
    output: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            samples_per_pixel: 16,
            max_depth: 50,
            frames: 1,
            iterative: false,
            output: "render.png".to_string(),
        }
    }
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(flag) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .with_context(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--width" => args.width = value_for("--width")?.parse()?,
            "--height" => args.height = value_for("--height")?.parse()?,
            "--samples" => args.samples_per_pixel = value_for("--samples")?.parse()?,
            "--depth" => args.max_depth = value_for("--depth")?.parse()?,
            "--frames" => args.frames = value_for("--frames")?.parse()?,
            "--output" => args.output = value_for("--output")?,
            "--iterative" => args.iterative = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    if args.width == 0 || args.height == 0 {
        bail!("frame dimensions must be non-zero");
    }
    if args.samples_per_pixel == 0 {
        bail!("sample count must be non-zero");
    }
    if args.frames == 0 {
        bail!("frame count must be non-zero");
    }
    Ok(args)
}

fn print_usage() {
    println!(
        "prism - Monte Carlo sphere path tracer\n\n\
         Usage: prism [options]\n\n\
         Options:\n\
           --width <px>      framebuffer width (default 1280)\n\
           --height <px>     framebuffer height (default 720)\n\
           --samples <n>     samples per pixel (default 16)\n\
           --depth <n>       maximum bounce depth (default 50)\n\
           --frames <n>      frames to render (default 1)\n\
           --iterative       use the iterative integrator\n\
           --output <path>   PNG path for the last frame (default render.png)"
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let mut state = prism_renderer::XorShift32::seeded(rand::random::<u32>());
    let aspect = args.width as f32 / args.height as f32;
    let (scene, camera) = scenes::book_scene(&mut state, aspect)?;
    log::info!("scene: {} spheres", scene.len());

    let integrator: Box<dyn Integrator> = if args.iterative {
        Box::new(Iterative::new(args.max_depth))
    } else {
        Box::new(Recursive::new(args.max_depth))
    };

    let start = Instant::now();
    let mut total_rays = 0u64;
    let mut last_frame: Option<Frame> = None;

    for frame_count in 0..args.frames {
        let config = RenderConfig {
            width: args.width,
            height: args.height,
            samples_per_pixel: args.samples_per_pixel,
            frame_count,
        };
        let frame = render(&scene, &camera, &config, integrator.as_ref());
        total_rays += frame.rays_traced;

        let elapsed = start.elapsed().as_secs_f64();
        log::info!(
            "frame {}/{}: {:.2} MRays/s cumulative ({} rays in {:.2}s)",
            frame_count + 1,
            args.frames,
            total_rays as f64 / elapsed / 1_000_000.0,
            total_rays,
            elapsed
        );
        last_frame = Some(frame);
    }

    let frame = last_frame.context("no frames rendered")?;
    let rgba = frame.framebuffer.to_rgba8();
    image::save_buffer(
        &args.output,
        &rgba,
        args.width,
        args.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("writing {}", args.output))?;
    log::info!("wrote {}", args.output);

    Ok(())
}
