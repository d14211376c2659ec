use super::lighting::phong;
use super::math::{Ray, Vec3};
use super::model::TriangleMesh;

/// Rejection threshold shared by every intersection test, so near-zero and
/// near-tangent solutions resolve the same way across shape variants.
pub const EPSILON: f64 = 1e-5;

/// Shadow rays ignore hits this close to the light, otherwise the light's
/// own geometry (or the lit surface) shadows itself.
const SHADOW_BIAS: f64 = 0.01;

/// Shape id that never matches, used to start a trace excluding nothing.
pub const NO_SHAPE: i32 = -1;

/// Phong material plus the coefficients driving the recursive bounces.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f64,
    /// Component-wise weight of the mirrored contribution; all zero disables it.
    pub reflection_strength: Vec3,
    /// Relative refraction index handed to the transmission helper; zero disables it.
    pub index_of_refraction: f64,
}

impl Material {
    /// Plain diffuse surface of the given color, no bounces.
    pub fn matte(color: Vec3) -> Material {
        Material {
            ambient: color * 0.1,
            diffuse: color,
            specular: Vec3::new(0.4, 0.4, 0.4),
            shininess: 32.0,
            ..Material::default()
        }
    }
}

/// Where a ray crosses a shape's surface.
///
/// A miss is represented by the absence of this record, so the geometric
/// fields of an `Intersection` are always valid. `count` tells how many
/// crossing points lie along the ray: spheres report up to two, planes and
/// triangle meshes exactly one with `exit_point == entry_point` (they have no
/// well-defined exit, see the refraction fallback in [`trace`]).
#[derive(Debug, Copy, Clone)]
pub struct Intersection {
    pub count: u32,
    pub entry_point: Vec3,
    pub exit_point: Vec3,
    pub entry_normal: Vec3,
    pub exit_normal: Vec3,
    /// Id of the shape that was hit, [`NO_SHAPE`] until a shape claims it.
    pub id: i32,
    pub material: Material,
}

/// The geometry variants a shape can carry.
#[derive(Debug)]
pub enum Solid {
    Sphere { centre: Vec3, radius: f64 },
    Plane { point: Vec3, normal: Vec3 },
    Mesh(TriangleMesh),
}

#[derive(Debug)]
pub struct Shape {
    pub id: i32,
    pub material: Material,
    pub solid: Solid,
}

impl Shape {
    pub fn sphere(centre: Vec3, radius: f64, id: i32, material: Material) -> Shape {
        Shape {
            id,
            material,
            solid: Solid::Sphere { centre, radius },
        }
    }

    pub fn plane(point: Vec3, normal: Vec3, id: i32, material: Material) -> Shape {
        Shape {
            id,
            material,
            solid: Solid::Plane {
                point,
                normal: normal.normalize(),
            },
        }
    }

    pub fn mesh(mesh: TriangleMesh, id: i32, material: Material) -> Shape {
        Shape {
            id,
            material,
            solid: Solid::Mesh(mesh),
        }
    }

    /// Test the ray against this shape's geometry.
    ///
    /// Degenerate inputs (parallel rays, grazing hits, negative roots) resolve
    /// to `None` or a defined degenerate crossing, never an error.
    pub fn intersection(&self, ray: &Ray) -> Option<Intersection> {
        let hit = match &self.solid {
            Solid::Sphere { centre, radius } => sphere_intersection(*centre, *radius, ray),
            Solid::Plane { point, normal } => plane_intersection(*point, *normal, ray),
            Solid::Mesh(mesh) => mesh.intersection(ray),
        }?;
        debug_assert!((hit.entry_normal.len() - 1.0).abs() < 1e-6);
        Some(Intersection {
            id: self.id,
            material: self.material,
            ..hit
        })
    }
}

fn sphere_intersection(centre: Vec3, radius: f64, ray: &Ray) -> Option<Intersection> {
    let oc = ray.origin - centre;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let surface = |t: f64| {
        let point = ray.at(t);
        (point, (point - centre).normalize())
    };

    if discriminant < EPSILON {
        // grazing ray, one degenerate crossing
        let t = -b / (2.0 * a);
        if t <= EPSILON {
            return None;
        }
        let (point, normal) = surface(t);
        return Some(single_crossing(point, normal));
    }

    let near = (-b - discriminant.sqrt()) / (2.0 * a);
    let far = (-b + discriminant.sqrt()) / (2.0 * a);
    if far <= EPSILON {
        // both crossings behind the origin
        return None;
    }
    let (exit_point, exit_normal) = surface(far);
    if near <= EPSILON {
        // origin inside the sphere, only the far crossing lies ahead
        return Some(single_crossing(exit_point, exit_normal));
    }
    let (entry_point, entry_normal) = surface(near);
    Some(Intersection {
        count: 2,
        entry_point,
        exit_point,
        entry_normal,
        exit_normal,
        id: NO_SHAPE,
        material: Material::default(),
    })
}

fn plane_intersection(point: Vec3, normal: Vec3, ray: &Ray) -> Option<Intersection> {
    let denominator = normal.dot(ray.direction);
    if denominator.abs() < EPSILON {
        // ray runs parallel to the plane
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denominator;
    if t <= EPSILON {
        return None;
    }
    // orient the stored normal toward the incoming ray so shading behaves the
    // same from either side of the plane
    let oriented = if denominator > 0.0 { -normal } else { normal };
    Some(single_crossing(ray.at(t), oriented))
}

/// A crossing without a distinct exit: planes, meshes, grazing spheres.
pub(super) fn single_crossing(point: Vec3, normal: Vec3) -> Intersection {
    Intersection {
        count: 1,
        entry_point: point,
        exit_point: point,
        entry_normal: normal,
        exit_normal: normal,
        id: NO_SHAPE,
        material: Material::default(),
    }
}

/// All the shapes to render plus a single white point light.
///
/// The scene is built once, rendered from immutably, and replaced wholesale
/// when another scene is selected.
#[derive(Debug)]
pub struct Scene {
    pub shapes: Vec<Shape>,
    pub light_position: Vec3,
}

impl Scene {
    /// Nearest intersection along the ray over all shapes, skipping the shape
    /// with `exclude_id`. Ties keep the first shape in scene order.
    pub fn closest_hit(&self, ray: &Ray, exclude_id: i32) -> Option<Intersection> {
        let mut min_distance = f64::INFINITY;
        let mut closest = None;
        for shape in &self.shapes {
            if shape.id == exclude_id {
                // skipping the shape a ray just left avoids self-intersection
                continue;
            }
            if let Some(intersection) = shape.intersection(ray) {
                let distance = intersection.entry_point.distance(ray.origin);
                if distance < min_distance {
                    min_distance = distance;
                    closest = Some(intersection);
                }
            }
        }
        closest
    }

    /// First shape in scan order hit strictly between the ray origin and
    /// `max_distance`, or `None`. Only blocked-versus-clear matters to the
    /// shadow test, so this does not search for the closest blocker.
    pub fn any_blocker(&self, ray: &Ray, exclude_id: i32, max_distance: f64) -> Option<i32> {
        for shape in &self.shapes {
            if shape.id == exclude_id {
                continue;
            }
            if let Some(intersection) = shape.intersection(ray) {
                let distance = intersection.entry_point.distance(ray.origin);
                if distance > EPSILON && distance < max_distance - SHADOW_BIAS {
                    return Some(intersection.id);
                }
            }
        }
        None
    }
}

/// Mirror direction for an incident direction `d` against surface normal `n`.
pub fn reflect_direction(normal: Vec3, direction: Vec3) -> Vec3 {
    (normal * (2.0 * normal.dot(-direction)) + direction).normalize()
}

/// Transmitted direction through a surface per Snell's law in vector form.
///
/// The normal is flipped to face the incident direction when needed. A
/// negative discriminant means total internal reflection; the incident
/// direction is then mirrored about the surface instead of transmitted.
pub fn transmit_ray(normal: Vec3, incident: Vec3, relative_index: f64) -> Vec3 {
    let normal = if normal.dot(incident) > 0.0 {
        -normal
    } else {
        normal
    };
    let cos_incident = -normal.dot(incident);
    let discriminant = 1.0 - relative_index * relative_index * (1.0 - cos_incident * cos_incident);
    if discriminant < 0.0 {
        return incident.reflect(normal);
    }
    (incident * relative_index + normal * (relative_index * cos_incident - discriminant.sqrt()))
        .normalize()
}

/// Recursively shade one ray against the scene.
///
/// `depth` is the remaining bounce budget, decremented on every reflective or
/// refractive recursion. `source_id` is the single shape the ray just left
/// (or [`NO_SHAPE`]) and is the only shape excluded from the queries, so a
/// ray may legally re-enter any shape visited earlier on its path.
pub fn trace(scene: &Scene, ray: &Ray, depth: i32, source_id: i32) -> Vec3 {
    if depth < 1 {
        return Vec3::zero();
    }
    let result = match scene.closest_hit(ray, source_id) {
        Some(intersection) => intersection,
        None => return Vec3::zero(),
    };

    let mut material = result.material;
    let shadow_ray = Ray {
        origin: result.entry_point,
        direction: (scene.light_position - result.entry_point).normalize(),
    };
    let light_distance = result.entry_point.distance(scene.light_position);
    if scene
        .any_blocker(&shadow_ray, result.id, light_distance)
        .is_some()
    {
        // in shadow only the ambient term survives
        material.diffuse = Vec3::zero();
        material.specular = Vec3::zero();
    }

    let mut color = phong(ray, scene, &material, &result);

    if result.material.reflection_strength != Vec3::zero() {
        let reflected_ray = Ray {
            origin: result.entry_point,
            direction: reflect_direction(result.entry_normal, ray.direction),
        };
        color += result.material.reflection_strength
            * trace(scene, &reflected_ray, depth - 1, result.id);
    }

    if result.material.index_of_refraction != 0.0 {
        let through = result.exit_point - result.entry_point;
        // a degenerate exit (plane, mesh, grazing hit) has no direction to
        // refract along; the branch then contributes nothing
        if through.len() > EPSILON {
            let refracted_ray = Ray {
                origin: result.exit_point,
                direction: transmit_ray(
                    result.exit_normal,
                    through.normalize(),
                    result.material.index_of_refraction,
                ),
            };
            color += trace(scene, &refracted_ray, depth - 1, result.id);
        }
    }

    color
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn matte(color: Vec3) -> Material {
        Material::matte(color)
    }

    fn ray(origin: Vec3, towards: Vec3) -> Ray {
        Ray {
            origin,
            direction: (towards - origin).normalize(),
        }
    }

    #[test]
    fn sphere_ray_pointing_away_misses() {
        let shape = Shape::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0, 0, Material::default());
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, 1.0),
        };
        assert!(shape.intersection(&ray).is_none());
    }

    #[test]
    fn sphere_through_center_crossings_are_a_diameter_apart() {
        let radius = 2.5;
        let shape = Shape::sphere(Vec3::zero(), radius, 0, Material::default());
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = shape.intersection(&ray).unwrap();
        assert_eq!(hit.count, 2);
        assert_relative_eq!(
            hit.entry_point.distance(hit.exit_point),
            2.0 * radius,
            epsilon = EPSILON
        );
    }

    #[test]
    fn sphere_grazing_ray_reports_one_degenerate_crossing() {
        let shape = Shape::sphere(Vec3::new(0.0, 1.0, -5.0), 1.0, 0, Material::default());
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = shape.intersection(&ray).unwrap();
        assert_eq!(hit.count, 1);
        assert_relative_eq!(hit.entry_point.distance(hit.exit_point), 0.0);
        assert_relative_eq!(hit.entry_normal.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn sphere_origin_inside_reports_the_far_crossing() {
        let shape = Shape::sphere(Vec3::zero(), 2.0, 0, Material::default());
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = shape.intersection(&ray).unwrap();
        assert_eq!(hit.count, 1);
        assert_relative_eq!(hit.entry_point.z, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn plane_parallel_ray_misses_from_any_origin() {
        let shape = Shape::plane(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            0,
            Material::default(),
        );
        for origin in [Vec3::zero(), Vec3::new(5.0, 3.0, -2.0)] {
            let ray = Ray {
                origin,
                direction: Vec3::new(1.0, 0.0, 0.0),
            };
            assert!(shape.intersection(&ray).is_none());
        }
    }

    #[test]
    fn plane_behind_the_origin_misses() {
        let shape = Shape::plane(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 1.0),
            0,
            Material::default(),
        );
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert!(shape.intersection(&ray).is_none());
    }

    #[test]
    fn plane_back_face_normal_is_flipped_toward_the_ray() {
        let shape = Shape::plane(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, 1.0),
            0,
            Material::default(),
        );
        // approach the plane from behind its stored normal
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, -10.0),
            direction: Vec3::new(0.0, 0.0, 1.0),
        };
        let hit = shape.intersection(&ray).unwrap();
        assert!(hit.entry_normal.dot(ray.direction) < 0.0);
        assert_relative_eq!(hit.entry_normal.z, -1.0);
    }

    #[test]
    fn closest_hit_picks_the_nearest_shape() {
        let scene = Scene {
            shapes: vec![
                Shape::sphere(Vec3::new(0.0, 0.0, -8.0), 1.0, 0, Material::default()),
                Shape::sphere(Vec3::new(0.0, 0.0, -4.0), 1.0, 1, Material::default()),
            ],
            light_position: Vec3::new(2.0, 2.0, 0.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = scene.closest_hit(&ray, NO_SHAPE).unwrap();
        assert_eq!(hit.id, 1);
        assert_relative_eq!(hit.entry_point.z, -3.0, epsilon = EPSILON);
    }

    #[test]
    fn closest_hit_skips_the_excluded_shape() {
        let scene = Scene {
            shapes: vec![
                Shape::sphere(Vec3::new(0.0, 0.0, -8.0), 1.0, 0, Material::default()),
                Shape::sphere(Vec3::new(0.0, 0.0, -4.0), 1.0, 1, Material::default()),
            ],
            light_position: Vec3::new(2.0, 2.0, 0.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = scene.closest_hit(&ray, 1).unwrap();
        assert_eq!(hit.id, 0);
    }

    #[test]
    fn any_blocker_reports_a_shape_between_point_and_light() {
        let light = Vec3::new(0.0, 10.0, 0.0);
        let blocker = Shape::sphere(Vec3::new(0.0, 5.0, 0.0), 1.0, 7, Material::default());
        let shadow_ray = ray(Vec3::zero(), light);
        let blocked = Scene {
            shapes: vec![blocker],
            light_position: light,
        };
        assert_eq!(
            blocked.any_blocker(&shadow_ray, NO_SHAPE, light.distance(Vec3::zero())),
            Some(7)
        );
        let clear = Scene {
            shapes: Vec::new(),
            light_position: light,
        };
        assert_eq!(
            clear.any_blocker(&shadow_ray, NO_SHAPE, light.distance(Vec3::zero())),
            None
        );
    }

    #[test]
    fn any_blocker_ignores_shapes_at_or_beyond_the_light() {
        let light = Vec3::new(0.0, 10.0, 0.0);
        let scene = Scene {
            // sits past the light along the shadow ray
            shapes: vec![Shape::sphere(
                Vec3::new(0.0, 15.0, 0.0),
                1.0,
                0,
                Material::default(),
            )],
            light_position: light,
        };
        let shadow_ray = ray(Vec3::zero(), light);
        assert_eq!(
            scene.any_blocker(&shadow_ray, NO_SHAPE, light.distance(Vec3::zero())),
            None
        );
    }

    #[test]
    fn trace_with_no_depth_budget_is_black() {
        let scene = Scene {
            shapes: vec![Shape::sphere(
                Vec3::new(0.0, 0.0, -5.0),
                1.0,
                0,
                matte(Vec3::one()),
            )],
            light_position: Vec3::new(2.0, 2.0, 0.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert_eq!(trace(&scene, &ray, 0, NO_SHAPE), Vec3::zero());
    }

    #[test]
    fn trace_miss_is_black() {
        let scene = Scene {
            shapes: Vec::new(),
            light_position: Vec3::new(2.0, 2.0, 0.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert_eq!(trace(&scene, &ray, 10, NO_SHAPE), Vec3::zero());
    }

    #[test]
    fn reflection_off_a_facing_mirror_returns_along_the_incident_path() {
        let direction = Vec3::new(0.0, 0.0, -1.0);
        // plane normal parallel to the incident direction
        let reflected = reflect_direction(-direction, direction);
        assert_relative_eq!(reflected.x, 0.0);
        assert_relative_eq!(reflected.y, 0.0);
        assert_relative_eq!(reflected.z, 1.0);
    }

    #[test]
    fn end_to_end_central_ray_hits_the_sphere_front() {
        let scene = Scene {
            shapes: vec![Shape::sphere(
                Vec3::new(0.0, 0.0, -5.0),
                1.0,
                0,
                matte(Vec3::new(0.8, 0.2, 0.2)),
            )],
            light_position: Vec3::new(2.0, 2.0, 0.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = scene.closest_hit(&ray, NO_SHAPE).unwrap();
        assert_relative_eq!(hit.entry_point.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(hit.entry_point.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(hit.entry_point.z, -4.0, epsilon = EPSILON);
        assert!(trace(&scene, &ray, 10, NO_SHAPE).len() > 0.0);
    }

    #[test]
    fn shadowed_hit_keeps_only_the_ambient_term() {
        let material = matte(Vec3::new(0.2, 0.6, 0.2));
        let light = Vec3::new(0.0, 5.0, 1.0);
        let target = Shape::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0, 0, material);
        // sits on the segment between the hit point (0, 0, -4) and the light
        let blocker = Shape::sphere(Vec3::new(0.0, 1.414, -2.586), 0.5, 1, Material::default());
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };

        let shadowed = trace(
            &Scene {
                shapes: vec![
                    Shape::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0, 0, material),
                    blocker,
                ],
                light_position: light,
            },
            &ray,
            10,
            NO_SHAPE,
        );
        assert_relative_eq!(shadowed.x, material.ambient.x);
        assert_relative_eq!(shadowed.y, material.ambient.y);
        assert_relative_eq!(shadowed.z, material.ambient.z);

        let lit = trace(
            &Scene {
                shapes: vec![target],
                light_position: light,
            },
            &ray,
            10,
            NO_SHAPE,
        );
        assert!(lit.y > material.ambient.y);
    }

    #[test]
    fn mirror_plane_shows_the_sphere_above_it() {
        let mirror = Material {
            reflection_strength: Vec3::one(),
            ..Material::default()
        };
        let glow = Material {
            ambient: Vec3::new(1.0, 0.0, 0.0),
            ..Material::default()
        };
        let scene = Scene {
            shapes: vec![
                Shape::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0, mirror),
                Shape::sphere(Vec3::new(0.0, 1.0, -6.0), 0.5, 1, glow),
            ],
            light_position: Vec3::new(0.0, 5.0, -6.0),
        };
        // aim at the mirror so the bounce runs up into the sphere
        let ray = ray(Vec3::zero(), Vec3::new(0.0, -1.0, -2.0));
        let color = trace(&scene, &ray, 10, NO_SHAPE);
        assert_relative_eq!(color.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(color.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn refraction_passes_through_a_glass_sphere_to_the_wall_behind() {
        let glass = Material {
            index_of_refraction: 1.0,
            ..Material::default()
        };
        let wall = Material {
            ambient: Vec3::new(0.0, 1.0, 0.0),
            ..Material::default()
        };
        let scene = Scene {
            shapes: vec![
                Shape::sphere(Vec3::new(0.0, 0.0, -3.0), 0.5, 0, glass),
                Shape::plane(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0), 1, wall),
            ],
            light_position: Vec3::new(0.0, 5.0, 0.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let color = trace(&scene, &ray, 10, NO_SHAPE);
        assert_relative_eq!(color.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn refractive_plane_contributes_nothing_instead_of_breaking() {
        let odd = Material {
            ambient: Vec3::new(0.3, 0.3, 0.3),
            index_of_refraction: 1.5,
            ..Material::default()
        };
        let scene = Scene {
            shapes: vec![Shape::plane(
                Vec3::new(0.0, 0.0, -5.0),
                Vec3::new(0.0, 0.0, 1.0),
                0,
                odd,
            )],
            light_position: Vec3::new(0.0, 5.0, 0.0),
        };
        let ray = Ray {
            origin: Vec3::zero(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let color = trace(&scene, &ray, 10, NO_SHAPE);
        assert!(!color.x.is_nan() && !color.y.is_nan() && !color.z.is_nan());
        assert_relative_eq!(color.x, 0.3);
    }

    #[test]
    fn transmit_ray_is_straight_through_at_matched_indices() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let transmitted = transmit_ray(Vec3::new(0.0, 1.0, 0.0), incident, 1.0);
        assert_relative_eq!(transmitted.x, incident.x, epsilon = 1e-12);
        assert_relative_eq!(transmitted.y, incident.y, epsilon = 1e-12);
    }

    #[test]
    fn transmit_ray_bends_toward_the_normal_entering_a_denser_medium() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let transmitted = transmit_ray(Vec3::new(0.0, 1.0, 0.0), incident, 1.0 / 1.5);
        // sin(theta_t) = sin(45 degrees) / 1.5
        let expected_sin = (45.0f64).to_radians().sin() / 1.5;
        assert_relative_eq!(transmitted.x, expected_sin, epsilon = 1e-9);
        assert!(transmitted.y < 0.0);
        assert_relative_eq!(transmitted.len(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn transmit_ray_total_internal_reflection_mirrors_the_incident() {
        // shallow incidence leaving a dense medium
        let incident = Vec3::new(1.0, -0.2, 0.0).normalize();
        let transmitted = transmit_ray(Vec3::new(0.0, 1.0, 0.0), incident, 1.5);
        assert_relative_eq!(transmitted.x, incident.x, epsilon = 1e-9);
        assert_relative_eq!(transmitted.y, -incident.y, epsilon = 1e-9);
    }

    #[test]
    fn transmit_ray_flips_a_normal_facing_away_from_the_incident() {
        let incident = Vec3::new(0.0, -1.0, 0.0);
        // same surface described with the opposite normal
        let up = transmit_ray(Vec3::new(0.0, 1.0, 0.0), incident, 1.0);
        let down = transmit_ray(Vec3::new(0.0, -1.0, 0.0), incident, 1.0);
        assert_relative_eq!(up.y, down.y);
    }
}
