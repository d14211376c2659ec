//! Perspective ray generation.
//!
//! One ray per pixel, aimed through an image plane one unit in front of the
//! world origin. Rays always START at the world origin: the viewpoint offsets
//! only the ray directions, which shears the view off-axis instead of
//! translating the camera. That is the historical behavior of this renderer
//! and is pinned by the tests here; redesigning it into a true moving camera
//! would change every rendered image.

use super::math::{Ray, Vec3};

/// A ray paired with the pixel it colors.
pub struct RayAndPixel {
    pub ray: Ray,
    pub x: u32,
    pub y: u32,
}

/// Build the full `width * height` ray list for one frame, column by column.
///
/// Image-plane coordinates run over `[-0.5, 0.5)` in both axes, stepping by
/// one pixel; `y` (and the plane's `j`) grow upward, so writers of top-down
/// image formats flip the row.
pub fn generate_rays(viewpoint: Vec3, width: u32, height: u32) -> Vec<RayAndPixel> {
    let origin = Vec3::zero();
    let mut rays = Vec::with_capacity((width * height) as usize);
    let mut i = -0.5;
    for x in 0..width {
        let mut j = -0.5;
        for y in 0..height {
            let direction = Vec3::new(i - viewpoint.x, j - viewpoint.y, -1.0).normalize();
            rays.push(RayAndPixel {
                ray: Ray { origin, direction },
                x,
                y,
            });
            j += 1.0 / height as f64;
        }
        i += 1.0 / width as f64;
    }
    rays
}
