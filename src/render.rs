//! Recursive Whitted-style shading: direct Phong lighting with hard shadows, plus mirror and
//! refraction bounces.

use crate::geometry::{HitRecord, HitResult};
use crate::math::*;
use crate::scene::Scene;

/// Colour of rays that leave the scene or run out of bounces
pub const BACKGROUND: Vec3 = Vec3::new(0.2, 0.7, 0.8);

/// Deepest bounce that is still shaded; primary rays are depth 0
pub const MAX_DEPTH: u32 = 4;

const BIAS: f64 = 1e-3;

/// Move a secondary ray origin off the surface, onto the side `direction` travels into
#[inline]
fn offset_origin(p: Vec3, normal: Vec3, direction: Vec3) -> Vec3 {
    if dot(direction, normal) < 0.0 {
        p - normal * BIAS
    } else {
        p + normal * BIAS
    }
}

fn reflection_ray(direction: Vec3, hit: &HitRecord) -> Ray {
    let reflected = reflect(direction, hit.normal).normalise();
    Ray::new(offset_origin(hit.p, hit.normal, reflected), reflected)
}

fn refraction_ray(direction: Vec3, hit: &HitRecord) -> Ray {
    let refracted = refract(direction, hit.normal, hit.material.refractive_index, 1.0).normalise();
    Ray::new(offset_origin(hit.p, hit.normal, refracted), refracted)
}

#[derive(Debug, Default, PartialEq)]
struct Lighting {
    diffuse: f64,
    specular: f64,
}

/// Sum of the unshadowed lights' diffuse and specular intensities at `hit`, seen along `direction`
fn direct_lighting(scene: &Scene, hit: &HitRecord, direction: Vec3) -> Lighting {
    let mut lighting = Lighting::default();
    for light in &scene.lights {
        let to_light = light.position - hit.p;
        let light_dir = to_light.normalise();
        let light_distance = to_light.length();

        let shadow_origin = offset_origin(hit.p, hit.normal, light_dir);
        if let HitResult::Hit(blocker) = scene.intersect(&Ray::new(shadow_origin, light_dir)) {
            if (blocker.p - shadow_origin).length() < light_distance {
                continue;
            }
        }

        lighting.diffuse += light.intensity * dot(light_dir, hit.normal).max(0.0);
        lighting.specular += light.intensity * dot(reflect(light_dir, hit.normal), direction).max(0.0).powf(hit.material.specular_exponent);
    }
    lighting
}

/// Linear, unclamped colour seen along a ray. `direction` must be a unit vector.
pub fn cast_ray(origin: Vec3, direction: Vec3, scene: &Scene, depth: u32) -> Vec3 {
    if depth > MAX_DEPTH {
        return BACKGROUND;
    }
    let hit = match scene.intersect(&Ray::new(origin, direction)) {
        HitResult::Hit(record) => record,
        HitResult::Miss => return BACKGROUND,
    };
    let material = hit.material;

    // A zero weight would discard the bounce anyway
    let trace = |ray: Ray, weight: f64| {
        if weight == 0.0 {
            Vec3::splat(0.0)
        } else {
            cast_ray(ray.origin, ray.direction, scene, depth + 1)
        }
    };
    let reflect_colour = trace(reflection_ray(direction, &hit), material.albedo.z);
    let refract_colour = trace(refraction_ray(direction, &hit), material.albedo.w);

    let lighting = direct_lighting(scene, &hit, direction);

    material.diffuse_colour * (lighting.diffuse * material.albedo.x)
        + Vec3::splat(1.0) * (lighting.specular * material.albedo.y)
        + reflect_colour * material.albedo.z
        + refract_colour * material.albedo.w
}
