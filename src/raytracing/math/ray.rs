use super::Vec3;

/// A directed line used for every geometric query.
///
/// The direction is treated as unit length by every consumer: callers
/// normalize before constructing a ray, nothing renormalizes internally.
#[derive(Clone, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
