//! Built-in scenes, selected by number from the command line.
//!
//! Every shape gets a unique non-negative id at construction; the queries'
//! self-intersection skipping depends on that. The refraction toggle swaps
//! the designated shape's refraction index between zero and a fixed value,
//! rebuilding the whole scene (scenes are replaced, never mutated).

use std::error::Error;

use log::debug;

use super::core::{Material, Scene, Shape};
use super::math::{Mat4, Vec3};
use super::model::{Triangle, TriangleMesh};

/// Relative index used by the refractive variants of the built-in scenes.
const REFRACTION_INDEX: f64 = 1.1;

fn matte(color: Vec3) -> Material {
    Material::matte(color)
}

fn polished(color: Vec3, reflection_strength: Vec3) -> Material {
    Material {
        reflection_strength,
        ..matte(color)
    }
}

/// Look up a built-in scene by number.
pub fn select(number: u32, refraction: bool) -> Option<Scene> {
    match number {
        1 => Some(scene_1(refraction)),
        2 => Some(scene_2(refraction)),
        _ => None,
    }
}

/// Two spheres over a floor, boxed in by a back wall.
pub fn scene_1(refraction: bool) -> Scene {
    let glass = Material {
        index_of_refraction: if refraction { REFRACTION_INDEX } else { 0.0 },
        ..matte(Vec3::new(0.9, 0.4, 0.5))
    };
    Scene {
        shapes: vec![
            Shape::sphere(
                Vec3::new(-1.1, -0.4, -5.5),
                1.0,
                0,
                polished(Vec3::new(0.2, 0.3, 0.8), Vec3::new(0.6, 0.6, 0.6)),
            ),
            Shape::sphere(Vec3::new(1.1, -0.9, -4.2), 0.6, 1, glass),
            Shape::plane(
                Vec3::new(0.0, -1.5, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                2,
                matte(Vec3::new(0.7, 0.7, 0.6)),
            ),
            Shape::plane(
                Vec3::new(0.0, 0.0, -12.0),
                Vec3::new(0.0, 0.0, 1.0),
                3,
                polished(Vec3::new(0.5, 0.5, 0.55), Vec3::new(0.15, 0.15, 0.15)),
            ),
        ],
        light_position: Vec3::new(2.0, 3.0, 0.0),
    }
}

/// A pyramid beside a sphere; the sphere turns glassy with the toggle.
pub fn scene_2(refraction: bool) -> Scene {
    let glass = Material {
        index_of_refraction: if refraction { REFRACTION_INDEX } else { 0.0 },
        ..matte(Vec3::new(0.4, 0.7, 0.9))
    };
    Scene {
        shapes: vec![
            Shape::mesh(
                TriangleMesh::new(pyramid(
                    Vec3::new(0.3, 0.6, -5.2),
                    1.0,
                    -1.5,
                )),
                0,
                polished(Vec3::new(0.9, 0.7, 0.2), Vec3::new(0.2, 0.2, 0.2)),
            ),
            Shape::sphere(Vec3::new(-1.6, -0.75, -4.0), 0.75, 1, glass),
            Shape::plane(
                Vec3::new(0.0, -1.5, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                2,
                matte(Vec3::new(0.6, 0.65, 0.7)),
            ),
            Shape::plane(
                Vec3::new(0.0, 0.0, -12.0),
                Vec3::new(0.0, 0.0, 1.0),
                3,
                matte(Vec3::new(0.55, 0.5, 0.5)),
            ),
        ],
        light_position: Vec3::new(-2.0, 3.5, -1.0),
    }
}

/// A lone OBJ mesh over a floor, for inspecting arbitrary models.
pub fn from_obj_file(path: &str) -> Result<Scene, Box<dyn Error>> {
    let placement = Mat4::scale(1.5).then(&Mat4::translate(Vec3::new(0.0, -0.5, -5.5)));
    let mesh = TriangleMesh::from_obj(path, &placement)?;
    debug!("loaded {} triangles from {}", mesh.len(), path);
    Ok(Scene {
        shapes: vec![
            Shape::mesh(mesh, 0, matte(Vec3::new(0.8, 0.8, 0.8))),
            Shape::plane(
                Vec3::new(0.0, -1.5, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                1,
                matte(Vec3::new(0.6, 0.6, 0.6)),
            ),
        ],
        light_position: Vec3::new(2.0, 3.0, 0.0),
    })
}

/// Four side faces of a square-based pyramid; the base sits open over the
/// floor, so the soup stays small.
fn pyramid(apex: Vec3, half_base: f64, base_y: f64) -> Vec<Triangle> {
    let corner = |dx: f64, dz: f64| Vec3::new(apex.x + dx, base_y, apex.z + dz);
    let a = corner(-half_base, half_base);
    let b = corner(half_base, half_base);
    let c = corner(half_base, -half_base);
    let d = corner(-half_base, -half_base);
    vec![(a, b, apex), (b, c, apex), (c, d, apex), (d, a, apex)]
}
