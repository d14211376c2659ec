use super::Vec3;

/// Row-major affine transform, used to place meshes in the scene.
#[derive(Debug, Copy, Clone)]
pub struct Mat4 {
    value: [f64; 16],
}

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4 {
            value: [
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn scale(factor: f64) -> Mat4 {
        Mat4 {
            value: [
                factor, 0.0, 0.0, 0.0, 0.0, factor, 0.0, 0.0, 0.0, 0.0, factor, 0.0, 0.0, 0.0, 0.0,
                1.0,
            ],
        }
    }

    pub fn translate(offset: Vec3) -> Mat4 {
        Mat4 {
            value: [
                1.0, 0.0, 0.0, offset.x, 0.0, 1.0, 0.0, offset.y, 0.0, 0.0, 1.0, offset.z, 0.0,
                0.0, 0.0, 1.0,
            ],
        }
    }

    /// Rotation around an arbitrary axis, angle in radians.
    // https://en.wikipedia.org/wiki/Rotation_matrix#Rotation_matrix_from_axis_and_angle
    pub fn rotate(axis: Vec3, angle: f64) -> Mat4 {
        let u = axis.normalize();
        let cos_t = angle.cos();
        let sin_t = angle.sin();
        let k = 1.0 - cos_t;
        Mat4 {
            value: [
                cos_t + u.x * u.x * k,
                u.x * u.y * k - u.z * sin_t,
                u.x * u.z * k + u.y * sin_t,
                0.0,
                u.y * u.x * k + u.z * sin_t,
                cos_t + u.y * u.y * k,
                u.y * u.z * k - u.x * sin_t,
                0.0,
                u.z * u.x * k - u.y * sin_t,
                u.z * u.y * k + u.x * sin_t,
                cos_t + u.z * u.z * k,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        }
    }

    /// Compose with another transform: `a.then(&b)` applies `a` first.
    pub fn then(&self, other: &Mat4) -> Mat4 {
        let mut value = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += other.value[row * 4 + k] * self.value[k * 4 + col];
                }
                value[row * 4 + col] = sum;
            }
        }
        Mat4 { value }
    }

    /// Transform a point, dividing through by the homogeneous coordinate.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let m = &self.value;
        let x = m[0] * v.x + m[1] * v.y + m[2] * v.z + m[3];
        let y = m[4] * v.x + m[5] * v.y + m[6] * v.z + m[7];
        let z = m[8] * v.x + m[9] * v.y + m[10] * v.z + m[11];
        let w = m[12] * v.x + m[13] * v.y + m[14] * v.z + m[15];
        Vec3::new(x / w, y / w, z / w)
    }
}
