use std::env;
use std::error::Error;
use std::time::Instant;

use log::{info, warn};

use raytrace::camera::Camera;
use raytrace::framebuffer::Framebuffer;
use raytrace::scene::{self, SceneDeclaration};

const USAGE: &str = "usage: raytrace [scene.json] | raytrace --gen-grid <seed> <scene.json>";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (scene, settings) = match args.as_slice() {
        [flag, seed, path] if flag == "--gen-grid" => {
            let seed: u64 = seed.parse()?;
            scene::save_scene(&scene::gen_sphere_grid(seed), path)?;
            info!("Wrote sphere grid (seed {}) to {}", seed, path);
            return Ok(());
        },
        [path] => {
            let loaded = scene::load_scene(path)?;
            info!("Loaded scene from {}", path);
            loaded
        },
        [] => {
            warn!("No scene file given, rendering the built-in scene");
            let declaration = SceneDeclaration::classic();
            (declaration.build()?, declaration.settings)
        },
        _ => return Err(USAGE.into()),
    };

    let camera = Camera::from_settings(&settings);
    info!("Filling {}x{} framebuffer", settings.width, settings.height);
    let started = Instant::now();
    let frame = Framebuffer::render(&scene, &camera);
    info!("Framebuffer filled in {} ms", started.elapsed().as_millis());

    frame.save(&settings.output)?;
    Ok(())
}
