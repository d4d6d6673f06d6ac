use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::geometry::{self, Checkerboard, HitResult, Hitable, Sphere};
use crate::materials::{Material, PRESET_NAMES};
use crate::math::{Ray, Vec3};

/// Hits at or beyond this distance count as the ray escaping the scene
pub const MAX_DISTANCE: f64 = 1000.0;

#[derive(Clone, Copy, PartialEq, Debug, Deserialize, Serialize)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f64,
}

impl Light {
    pub fn new(position: Vec3, intensity: f64) -> Light {
        Light { position, intensity }
    }
}

/// Everything a ray can meet. Read-only once built, so it can be shared between render threads.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
    pub checkerboard: Option<Checkerboard>,
}

impl Scene {
    /// Nearest surface along `ray` within `MAX_DISTANCE`.
    /// The floor replaces a sphere hit only when it is strictly nearer.
    pub fn intersect(&self, ray: &Ray) -> HitResult {
        let mut result = geometry::hit(ray, f64::MAX, &self.spheres);

        if let Some(floor) = &self.checkerboard {
            let closest_so_far = match &result {
                HitResult::Hit(record) => record.t,
                HitResult::Miss => f64::MAX,
            };
            if let HitResult::Hit(record) = floor.hit(ray, closest_so_far) {
                result = HitResult::Hit(record);
            }
        }

        match result {
            HitResult::Hit(record) if record.t < MAX_DISTANCE => HitResult::Hit(record),
            _ => HitResult::Miss,
        }
    }
}

/// Image size, camera aperture and destination of a render
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub fov_degrees: f64,
    pub output: String,
}

impl Default for RenderSettings {
    fn default() -> RenderSettings {
        RenderSettings { width: 1024, height: 768, fov_degrees: 60.0, output: String::from("out.png") }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings(format!("image must not be empty, got {}x{}", self.width, self.height)));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(RenderError::InvalidSettings(format!("field of view must lie strictly between 0 and 180 degrees, got {}", self.fov_degrees)));
        }
        if self.output.trim().is_empty() {
            return Err(RenderError::InvalidSettings(String::from("output path must not be empty")));
        }
        Ok(())
    }

    pub fn fov_radians(&self) -> f64 {
        self.fov_degrees.to_radians()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MaterialDeclaration {
    Preset(String),
    Custom(Material),
}

impl MaterialDeclaration {
    fn resolve(&self) -> Result<Material> {
        match self {
            MaterialDeclaration::Preset(name) => Material::preset(name).ok_or_else(|| RenderError::UnknownMaterial(name.clone())),
            MaterialDeclaration::Custom(material) => Ok(*material),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SphereDeclaration {
    pub centre: Vec3,
    pub radius: f64,
    pub material: MaterialDeclaration,
}

impl SphereDeclaration {
    fn new(x: f64, y: f64, z: f64, radius: f64, preset: &str) -> SphereDeclaration {
        SphereDeclaration {
            centre: Vec3::new(x, y, z),
            radius,
            material: MaterialDeclaration::Preset(preset.to_owned()),
        }
    }
}

/// On-disk form of a scene plus the settings it should be rendered with
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SceneDeclaration {
    #[serde(default)]
    pub settings: RenderSettings,
    #[serde(default)]
    pub checkerboard: bool,
    pub spheres: Vec<SphereDeclaration>,
    #[serde(default)]
    pub lights: Vec<Light>,
}

impl SceneDeclaration {
    /// Four spheres over a checkerboard, lit by three lights
    pub fn classic() -> SceneDeclaration {
        SceneDeclaration {
            settings: RenderSettings::default(),
            checkerboard: true,
            spheres: vec![
                SphereDeclaration::new(-3.0, 0.0, -16.0, 2.0, "ivory"),
                SphereDeclaration::new(-1.0, -1.5, -12.0, 2.0, "glass"),
                SphereDeclaration::new(1.5, -0.5, -18.0, 3.0, "red_rubber"),
                SphereDeclaration::new(7.0, 5.0, -18.0, 4.0, "mirror"),
            ],
            lights: classic_lights(),
        }
    }

    /// Resolve material names and assemble the scene. Geometry is taken as given.
    pub fn build(&self) -> Result<Scene> {
        let spheres = self
            .spheres
            .iter()
            .map(|s| -> Result<Sphere> { Ok(Sphere { centre: s.centre, radius: s.radius, material: s.material.resolve()? }) })
            .collect::<Result<Vec<Sphere>>>()?;
        let checkerboard = if self.checkerboard { Some(Checkerboard::default()) } else { None };

        debug!("scene has {} spheres, {} lights, checkerboard: {}", spheres.len(), self.lights.len(), self.checkerboard);
        Ok(Scene { spheres, lights: self.lights.clone(), checkerboard })
    }
}

fn classic_lights() -> Vec<Light> {
    vec![
        Light::new(Vec3::new(-20.0, 20.0, 20.0), 1.5),
        Light::new(Vec3::new(30.0, 50.0, -25.0), 1.8),
        Light::new(Vec3::new(30.0, 20.0, 30.0), 1.7),
    ]
}

pub fn read_declaration_from_file<P: AsRef<Path>>(path: P) -> Result<SceneDeclaration> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let declaration = serde_json::from_reader(reader)?;
    Ok(declaration)
}

/// Read a scene file, check its settings and build the scene
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(Scene, RenderSettings)> {
    let declaration = read_declaration_from_file(path)?;
    declaration.settings.validate()?;
    let scene = declaration.build()?;
    Ok((scene, declaration.settings))
}

pub fn save_scene<P: AsRef<Path>>(declaration: &SceneDeclaration, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, declaration)?;
    writer.flush()?;
    Ok(())
}

/// A jittered grid of small spheres with random preset materials, standing on the checkerboard
pub fn gen_sphere_grid(seed: u64) -> SceneDeclaration {
    let mut rng = StdRng::seed_from_u64(seed);
    let floor = Checkerboard::default();

    let mut spheres = Vec::new();
    for a in -4..4 {
        for b in 0..8 {
            let radius = 0.4 + 0.3 * rng.gen::<f64>();
            let x = 2.0 * a as f64 + 0.5 + 0.6 * (rng.gen::<f64>() - 0.5);
            let z = floor.z_near - 1.5 - 2.3 * b as f64 + 0.6 * (rng.gen::<f64>() - 0.5);
            let preset = PRESET_NAMES[rng.gen_range(0..PRESET_NAMES.len())];
            spheres.push(SphereDeclaration::new(x, floor.height + radius, z, radius, preset));
        }
    }

    SceneDeclaration { settings: RenderSettings::default(), checkerboard: true, spheres, lights: classic_lights() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Checker;

    fn scene_with(spheres: Vec<Sphere>, checkerboard: bool) -> Scene {
        Scene { spheres, lights: Vec::new(), checkerboard: if checkerboard { Some(Checkerboard::default()) } else { None } }
    }

    #[test]
    fn intersect_reports_normal_point_and_material() {
        let scene = scene_with(vec![Sphere { centre: Vec3::new(0.0, 0.0, -10.0), radius: 2.0, material: Material::ivory() }], false);
        let ray = Ray::new(Vec3::splat(0.0), Vec3::new(0.0, 0.0, -1.0));
        let record = scene.intersect(&ray).record().expect("sphere straight ahead");
        assert_eq!(record.p, Vec3::new(0.0, 0.0, -8.0));
        assert_eq!(record.normal, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(record.material, Material::ivory());
    }

    #[test]
    fn hits_beyond_the_horizon_are_misses() {
        let scene = scene_with(vec![Sphere { centre: Vec3::new(0.0, 0.0, -1500.0), radius: 2.0, material: Material::ivory() }], false);
        let ray = Ray::new(Vec3::splat(0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.intersect(&ray).is_miss());
    }

    #[test]
    fn floor_overrides_farther_sphere_only() {
        let ray = Ray::new(Vec3::splat(0.0), Vec3::new(0.0, -4.0, -16.0).normalise());
        let behind = Sphere { centre: Vec3::new(0.0, -6.0, -24.0), radius: 1.0, material: Material::mirror() };
        let record = scene_with(vec![behind], true).intersect(&ray).record().unwrap();
        assert_eq!(record.normal, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(record.material.diffuse_colour, Checker::FLOOR.value(record.p));

        let in_front = Sphere { centre: Vec3::new(0.0, -2.0, -8.0), radius: 1.0, material: Material::mirror() };
        let record = scene_with(vec![in_front], true).intersect(&ray).record().unwrap();
        assert_eq!(record.material, Material::mirror());
    }

    #[test]
    fn classic_scene_builds() {
        let scene = SceneDeclaration::classic().build().unwrap();
        assert_eq!(scene.spheres.len(), 4);
        assert_eq!(scene.lights.len(), 3);
        assert!(scene.checkerboard.is_some());
        assert_eq!(scene.spheres[1].material, Material::glass());
    }

    #[test]
    fn declarations_accept_presets_and_inline_materials() {
        let text = r#"{
            "settings": { "width": 64, "height": 48 },
            "spheres": [
                { "centre": { "x": 0.0, "y": 0.0, "z": -5.0 }, "radius": 1.0, "material": "glass" },
                { "centre": { "x": 2.0, "y": 0.0, "z": -5.0 }, "radius": 0.5, "material": {
                    "diffuse_colour": { "x": 0.1, "y": 0.2, "z": 0.3 },
                    "albedo": { "x": 0.5, "y": 0.5, "z": 0.0, "w": 0.0 },
                    "specular_exponent": 20.0 } }
            ],
            "lights": [ { "position": { "x": 0.0, "y": 10.0, "z": 0.0 }, "intensity": 2.0 } ]
        }"#;
        let declaration: SceneDeclaration = serde_json::from_str(text).unwrap();
        assert_eq!(declaration.settings.width, 64);
        assert_eq!(declaration.settings.fov_degrees, 60.0);
        assert!(!declaration.checkerboard);

        let scene = declaration.build().unwrap();
        assert_eq!(scene.spheres[0].material, Material::glass());
        assert_eq!(scene.spheres[1].material.refractive_index, 1.0);
        assert_eq!(scene.spheres[1].material.specular_exponent, 20.0);
        assert_eq!(scene.lights[0].intensity, 2.0);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let mut declaration = SceneDeclaration::classic();
        declaration.spheres[0].material = MaterialDeclaration::Preset(String::from("velvet"));
        match declaration.build() {
            Err(RenderError::UnknownMaterial(name)) => assert_eq!(name, "velvet"),
            other => panic!("expected unknown material, got {:?}", other.map(|s| s.spheres.len())),
        }
    }

    #[test]
    fn settings_validation() {
        assert!(RenderSettings::default().validate().is_ok());
        let empty = RenderSettings { width: 0, ..RenderSettings::default() };
        assert!(matches!(empty.validate(), Err(RenderError::InvalidSettings(_))));
        let flat = RenderSettings { fov_degrees: 180.0, ..RenderSettings::default() };
        assert!(flat.validate().is_err());
        let nowhere = RenderSettings { output: String::from(" "), ..RenderSettings::default() };
        assert!(nowhere.validate().is_err());
    }

    #[test]
    fn sphere_grid_is_reproducible_and_on_the_floor() {
        let a = gen_sphere_grid(42);
        let b = gen_sphere_grid(42);
        assert_eq!(a.spheres.len(), 64);
        for (s, t) in a.spheres.iter().zip(b.spheres.iter()) {
            assert_eq!(s.centre, t.centre);
            assert!((s.centre.y - s.radius - -4.0).abs() < 1e-12);
        }
        assert!(a.build().is_ok());
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("raytrace-scene-{}.json", std::process::id()));
        save_scene(&SceneDeclaration::classic(), &path).unwrap();
        let (scene, settings) = load_scene(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings, RenderSettings::default());
        assert_eq!(scene.spheres.len(), 4);
    }
}
