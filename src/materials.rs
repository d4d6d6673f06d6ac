use serde::{Deserialize, Serialize};

use super::math::{Vec3, Vec4};

/// Phong surface description. Albedo weights the diffuse, specular, reflected and refracted terms.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, Serialize)]
pub struct Material {
    pub diffuse_colour: Vec3,
    pub albedo: Vec4,
    pub specular_exponent: f64,
    #[serde(default = "default_refractive_index")]
    pub refractive_index: f64,
}

fn default_refractive_index() -> f64 {
    1.0
}

impl Default for Material {
    fn default() -> Material {
        Material {
            diffuse_colour: Vec3::splat(0.0),
            albedo: Vec4::new(1.0, 0.0, 0.0, 0.0),
            specular_exponent: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    pub const fn new(refractive_index: f64, albedo: Vec4, diffuse_colour: Vec3, specular_exponent: f64) -> Material {
        Material { diffuse_colour, albedo, specular_exponent, refractive_index }
    }

    pub const fn ivory() -> Material {
        Material::new(1.0, Vec4::new(0.6, 0.3, 0.1, 0.0), Vec3::new(0.4, 0.4, 0.3), 50.0)
    }

    pub const fn glass() -> Material {
        Material::new(1.5, Vec4::new(0.0, 0.5, 0.1, 0.8), Vec3::new(0.6, 0.7, 0.8), 125.0)
    }

    pub const fn red_rubber() -> Material {
        Material::new(1.0, Vec4::new(0.9, 0.1, 0.0, 0.0), Vec3::new(0.3, 0.1, 0.1), 10.0)
    }

    pub const fn mirror() -> Material {
        Material::new(1.0, Vec4::new(0.0, 10.0, 0.8, 0.0), Vec3::new(1.0, 1.0, 1.0), 1425.0)
    }

    /// Look up one of the built-in materials by name
    pub fn preset(name: &str) -> Option<Material> {
        match name {
            "ivory" => Some(Material::ivory()),
            "glass" => Some(Material::glass()),
            "red_rubber" => Some(Material::red_rubber()),
            "mirror" => Some(Material::mirror()),
            _ => None,
        }
    }
}

pub const PRESET_NAMES: [&str; 4] = ["ivory", "glass", "red_rubber", "mirror"];

/// Alternating tiles of the checkerboard floor
pub struct Checker {
    pub odd: Vec3,
    pub even: Vec3,
}

impl Checker {
    pub const FLOOR: Checker = Checker {
        odd: Vec3::new(0.3, 0.3, 0.3),
        even: Vec3::new(0.3, 0.2, 0.1),
    };

    /// Tile colour at a point on the floor. The 1000 offset keeps the x term positive.
    pub fn value(&self, p: Vec3) -> Vec3 {
        let tile = (0.5 * p.x + 1000.0).floor() as i64 + (0.5 * p.z).floor() as i64;
        if tile.rem_euclid(2) == 1 {
            self.odd
        } else {
            self.even
        }
    }

    pub fn material_at(&self, p: Vec3) -> Material {
        Material::new(1.0, Vec4::new(1.0, 0.2, 0.0, 0.0), self.value(p), 50.0)
    }
}
