//! Phong local illumination.
//!
//! The shading engine treats this as a black box: it hands over the ray, the
//! scene (for the light position), the resolved intersection and a material
//! whose diffuse and specular fields may already be zeroed for shadowing.

use super::core::{Intersection, Material, Scene};
use super::math::{Ray, Vec3};

/// Ambient + diffuse + specular contribution of the scene's point light.
pub fn phong(ray: &Ray, scene: &Scene, material: &Material, intersection: &Intersection) -> Vec3 {
    let normal = intersection.entry_normal;
    let to_light = (scene.light_position - intersection.entry_point).normalize();

    let mut color = material.ambient;

    let diffuse_effect = normal.dot(to_light);
    if diffuse_effect > 0.0 {
        color += material.diffuse * diffuse_effect;

        // light direction mirrored about the normal, compared against the viewer
        let reflected = (normal * (2.0 * diffuse_effect) - to_light).normalize();
        let specular_effect = reflected.dot(-ray.direction);
        if specular_effect > 0.0 {
            color += material.specular * specular_effect.powf(material.shininess);
        }
    }

    color
}
