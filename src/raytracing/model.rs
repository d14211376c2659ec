//! Triangle meshes and their ray tests.
//!
//! A mesh is a plain triangle soup: intersections aggregate to the nearest
//! triangle and there is no exit point, so refraction through a mesh has no
//! well-defined meaning (the shading engine falls back to skipping it).

use std::error::Error;
use std::fs::File;
use std::io::BufReader;

use obj::{load_obj, Obj};

use super::core::{single_crossing, Intersection, EPSILON};
use super::math::{Mat4, Ray, Vec3};

pub type Triangle = (Vec3, Vec3, Vec3);

pub trait RayIntersectable {
    fn intersect(&self, ray: &Ray) -> Option<f64>;
}

pub trait RayHittable {
    /// Distance along the ray and the geometric surface normal at the hit.
    fn hit(&self, ray: &Ray) -> Option<(f64, Vec3)>;
}

impl RayIntersectable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        // https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm
        let (v0, v1, v2) = *self;
        let v0v1 = v1 - v0;
        let v0v2 = v2 - v0;
        let ray_cross_e2 = ray.direction.cross(v0v2);
        let determinant = v0v1.dot(ray_cross_e2);
        // ray and triangle are parallel if det is close to 0
        if determinant.abs() < EPSILON {
            return None;
        }
        let inverse_determinant = 1.0 / determinant;
        let tvec = ray.origin - v0;
        let u = tvec.dot(ray_cross_e2) * inverse_determinant;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(v0v1);
        let v = ray.direction.dot(qvec) * inverse_determinant;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = v0v2.dot(qvec) * inverse_determinant;
        if t <= EPSILON {
            return None;
        }

        Some(t)
    }
}

impl RayHittable for Triangle {
    fn hit(&self, ray: &Ray) -> Option<(f64, Vec3)> {
        let t = self.intersect(ray)?;
        let (v0, v1, v2) = *self;
        Some((t, (v1 - v0).cross(v2 - v0).normalize()))
    }
}

#[derive(Debug)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> TriangleMesh {
        TriangleMesh { triangles }
    }

    /// Load a Wavefront OBJ file, placing every vertex through the transform.
    pub fn from_obj(path: &str, placement: &Mat4) -> Result<TriangleMesh, Box<dyn Error>> {
        let input = BufReader::new(File::open(path)?);
        let model: Obj = load_obj(input)?;
        let vertex =
            |index: u16| -> Vec3 { placement.apply(model.vertices[index as usize].position.into()) };
        let triangles = model
            .indices
            .chunks_exact(3)
            .map(|face| (vertex(face[0]), vertex(face[1]), vertex(face[2])))
            .collect();
        Ok(TriangleMesh::new(triangles))
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Nearest triangle hit across the whole soup, one crossing, no exit.
    /// The face normal is flipped toward the incoming ray, matching the
    /// plane's orientation policy, so winding order does not matter.
    pub fn intersection(&self, ray: &Ray) -> Option<Intersection> {
        let mut closest: Option<(f64, Vec3)> = None;
        for triangle in &self.triangles {
            if let Some((t, normal)) = triangle.hit(ray) {
                if closest.is_none() || t < closest.unwrap().0 {
                    closest = Some((t, normal));
                }
            }
        }
        let (t, normal) = closest?;
        let oriented = if normal.dot(ray.direction) > 0.0 {
            -normal
        } else {
            normal
        };
        Some(single_crossing(ray.at(t), oriented))
    }
}
