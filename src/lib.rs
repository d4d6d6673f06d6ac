#![deny(bare_trait_objects)]

pub mod math;
pub mod ppm;
pub mod geometry;
pub mod materials;
pub mod scene;
pub mod render;
pub mod camera;
pub mod framebuffer;
pub mod error;
