use super::materials::{Checker, Material};
use super::math::*;

/// A record of where a ray hit an object, including a copy of the material at that point
#[derive(Clone, Copy, Debug)]
pub struct HitRecord {
    pub t: f64,
    pub p: Vec3,
    pub normal: Vec3,
    pub material: Material,
}

#[derive(Clone, Copy, Debug)]
pub enum HitResult {
    Miss,
    Hit(HitRecord),
}

impl HitResult {
    pub fn is_miss(&self) -> bool {
        match self {
            HitResult::Miss => true,
            HitResult::Hit(_) => false,
        }
    }

    pub fn record(self) -> Option<HitRecord> {
        match self {
            HitResult::Miss => None,
            HitResult::Hit(record) => Some(record),
        }
    }
}

pub trait Hitable {
    /// Intersect `ray`, accepting only hits strictly nearer than `t_max`
    fn hit(&self, ray: &Ray, t_max: f64) -> HitResult;
}

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub centre: Vec3,
    pub radius: f64,
    pub material: Material,
}

/// Distance along a unit-direction ray to the nearest non-negative intersection.
/// Rays whose origin is already past the centre (along the ray) are treated as missing, even from inside.
pub fn sphere_ray_intersect(ray: &Ray, centre: Vec3, radius: f64) -> Option<f64> {
    let l = centre - ray.origin;
    let tca = dot(l, ray.direction);
    if tca < 0.0 {
        return None;
    }

    let d2 = dot(l, l) - tca * tca;
    let r2 = radius * radius;
    if d2 > r2 {
        return None;
    }

    let thc = (r2 - d2).sqrt();
    let t0 = tca - thc;
    let t1 = tca + thc;
    let t = if t0 < 0.0 { t1 } else { t0 };
    if t < 0.0 {
        return None;
    }

    Some(t)
}

impl Hitable for Sphere {
    fn hit(&self, ray: &Ray, t_max: f64) -> HitResult {
        match sphere_ray_intersect(ray, self.centre, self.radius) {
            Some(t) if t < t_max => {
                let p = ray.at_t(t);
                let normal = (p - self.centre).normalise();
                HitResult::Hit(HitRecord { t, p, normal, material: self.material })
            },
            _ => HitResult::Miss,
        }
    }
}

/// Horizontal checkerboard patch at `y = height`, bounded to `|x| < half_width` and `z_far < z < z_near`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkerboard {
    pub height: f64,
    pub half_width: f64,
    pub z_near: f64,
    pub z_far: f64,
}

impl Default for Checkerboard {
    fn default() -> Checkerboard {
        Checkerboard { height: -4.0, half_width: 10.0, z_near: -10.0, z_far: -30.0 }
    }
}

impl Hitable for Checkerboard {
    fn hit(&self, ray: &Ray, t_max: f64) -> HitResult {
        // Near-parallel rays never reach the floor
        if ray.direction.y.abs() <= 1e-3 {
            return HitResult::Miss;
        }

        let d = (self.height - ray.origin.y) / ray.direction.y;
        let p = ray.at_t(d);
        if d > 0.0 && p.x.abs() < self.half_width && p.z < self.z_near && p.z > self.z_far && d < t_max {
            let normal = Vec3::new(0.0, 1.0, 0.0);
            HitResult::Hit(HitRecord { t: d, p, normal, material: Checker::FLOOR.material_at(p) })
        } else {
            HitResult::Miss
        }
    }
}

/// Nearest hit across `objects`. Exact ties go to the earlier object.
pub fn hit<T: Hitable>(ray: &Ray, t_max: f64, objects: &[T]) -> HitResult {
    let mut result = HitResult::Miss;
    let mut closest_so_far = t_max;
    for obj in objects {
        if let HitResult::Hit(record) = obj.hit(ray, closest_so_far) {
            closest_so_far = record.t;
            result = HitResult::Hit(record);
        }
    }

    result
}
