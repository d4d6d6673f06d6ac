use crate::math::{Ray, Vec3};
use crate::scene::RenderSettings;

/// Pinhole camera at the origin looking down -z, one ray through each pixel centre
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    pub fov: f64,
    pub origin: Vec3,
}

impl Camera {
    /// `fov` is the vertical field of view in radians
    pub fn new(width: u32, height: u32, fov: f64) -> Camera {
        Camera { width, height, fov, origin: Vec3::splat(0.0) }
    }

    pub fn from_settings(settings: &RenderSettings) -> Camera {
        Camera::new(settings.width, settings.height, settings.fov_radians())
    }

    /// Ray through the centre of pixel (i, j), counting j downwards from the top row
    pub fn primary_ray(&self, i: u32, j: u32) -> Ray {
        let width = self.width as f64;
        let height = self.height as f64;
        let x = (i as f64 + 0.5) - width / 2.0;
        let y = -(j as f64 + 0.5) + height / 2.0;
        let z = -height / (2.0 * (self.fov / 2.0).tan());
        Ray::new(self.origin, Vec3::new(x, y, z).normalise())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn rays_are_unit_and_start_at_the_eye() {
        let camera = Camera::new(64, 48, PI / 3.0);
        for &(i, j) in &[(0, 0), (63, 47), (10, 30)] {
            let ray = camera.primary_ray(i, j);
            assert_eq!(ray.origin, Vec3::splat(0.0));
            assert!(approx_eq!(f64, ray.direction.length(), 1.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn image_orientation() {
        let camera = Camera::new(64, 48, PI / 3.0);
        let top_left = camera.primary_ray(0, 0).direction;
        assert!(top_left.x < 0.0 && top_left.y > 0.0 && top_left.z < 0.0);
        let bottom_right = camera.primary_ray(63, 47).direction;
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
    }

    #[test]
    fn vertical_field_of_view_spans_the_image() {
        // With an even height the middle column has no pixel on the axis, so measure the image edge instead
        let camera = Camera::new(2, 2000, PI / 3.0);
        let top = camera.primary_ray(1, 0).direction;
        let angle = top.y.atan2(-top.z);
        assert!((angle - PI / 6.0).abs() < 1e-3);
    }
}
