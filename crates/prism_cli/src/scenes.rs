//! Built-in demonstration scenes.

use anyhow::Result;
use prism_renderer::{
    Camera, CameraConfig, Color, Material, Scene, Sphere, Vec3, XorShift32,
};

/// The randomized "book" scene: a gray ground sphere, a grid of small random
/// spheres (mostly diffuse, some metal, a few glass) and three hero spheres.
///
/// Scene randomness comes from the same xorshift stream the kernel uses, so
/// a given seed always produces the same scene.
pub fn book_scene(state: &mut XorShift32, aspect: f32) -> Result<(Scene, Camera)> {
    let look_from = Vec3::new(9.5, 2.0, 2.5);
    let look_at = Vec3::new(3.0, 0.5, 0.65);
    let camera = Camera::new(&CameraConfig {
        look_from,
        look_at,
        up: Vec3::Y,
        vfov_degrees: 25.0,
        aspect,
        aperture: 0.01,
        focus_dist: (look_from - look_at).length(),
    })?;

    let mut spheres = Vec::new();
    let mut materials = Vec::new();

    spheres.push(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0)?);
    materials.push(Material::lambertian(Color::new(0.5, 0.5, 0.5)));

    let dimension = 5i32;
    for a in -dimension..dimension {
        for b in -dimension..dimension {
            let choose_material = state.next_f32();
            let center = Vec3::new(
                a as f32 + 0.9 * state.next_f32(),
                0.15,
                b as f32 + 0.9 * state.next_f32(),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let rand_offset = state.next_f32() * 0.15;
            spheres.push(Sphere::new(
                center + Vec3::Y * rand_offset,
                0.15 + rand_offset,
            )?);

            if choose_material < 0.8 {
                materials.push(Material::lambertian(Color::new(
                    state.next_f32() * state.next_f32(),
                    state.next_f32() * state.next_f32(),
                    state.next_f32() * state.next_f32(),
                )));
            } else if choose_material < 0.95 {
                materials.push(Material::metal(
                    Color::new(
                        0.5 * (1.0 + state.next_f32()),
                        0.5 * (1.0 + state.next_f32()),
                        0.5 * (1.0 + state.next_f32()),
                    ),
                    0.5 * (1.0 + state.next_f32()),
                ));
            } else {
                materials.push(Material::dielectric(1.5)?);
            }
        }
    }

    spheres.push(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0)?);
    materials.push(Material::dielectric(1.5)?);

    spheres.push(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0)?);
    materials.push(Material::lambertian(Color::new(0.4, 0.2, 0.1)));

    spheres.push(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0)?);
    materials.push(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));

    let scene = Scene::new(spheres, materials)?;
    Ok((scene, camera))
}
