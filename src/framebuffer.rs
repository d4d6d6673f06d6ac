use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::Result;
use crate::math::{clamp_channel, Vec3};
use crate::ppm::PpmImage;
use crate::render::cast_ray;
use crate::scene::Scene;

/// Linear colours for every pixel, row-major from the top-left
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Vec3>,
}

/// Scale a colour down so its brightest channel is at most 1
pub fn tone_map(colour: Vec3) -> Vec3 {
    let max = colour.max_component();
    if max > 1.0 {
        colour * (1.0 / max)
    } else {
        colour
    }
}

pub fn quantise(colour: Vec3) -> [u8; 3] {
    let c = tone_map(colour);
    [clamp_channel(c.x), clamp_channel(c.y), clamp_channel(c.z)]
}

impl Framebuffer {
    /// Trace one primary ray per pixel. Rows are shaded in parallel, each into its own slice.
    pub fn render(scene: &Scene, camera: &Camera) -> Framebuffer {
        let width = camera.width as usize;
        let height = camera.height as usize;
        let mut pixels = vec![Vec3::default(); width * height];

        pixels.par_chunks_mut(width.max(1)).enumerate().for_each(|(j, row)| {
            for (i, pixel) in row.iter_mut().enumerate() {
                let ray = camera.primary_ray(i as u32, j as u32);
                *pixel = cast_ray(ray.origin, ray.direction, scene, 0);
            }
        });

        Framebuffer { width, height, pixels }
    }

    pub fn get(&self, i: usize, j: usize) -> Vec3 {
        self.pixels[i + j * self.width]
    }

    pub fn to_rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| Rgb(quantise(self.get(x as usize, y as usize))))
    }

    pub fn to_ppm(&self) -> PpmImage {
        let mut image = PpmImage::create(self.width, self.height);
        for colour in &self.pixels {
            image.append_pixel(quantise(*colour));
        }
        image
    }

    /// Write the image; a `.ppm` extension selects plain PPM, anything else goes through `image`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let is_ppm = path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));
        if is_ppm {
            fs::write(path, self.to_ppm().get_text())?;
        } else {
            self.to_rgb().save(path)?;
        }
        info!("Wrote to file {}", path.display());
        Ok(())
    }
}
