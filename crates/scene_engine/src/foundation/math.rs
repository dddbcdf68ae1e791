//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix constructions the
//! scene needs (look-at, perspective, rotation about the vertical axis).

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Rotation3,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// Tolerance used to detect degenerate (zero-length) vectors
    pub const DEGENERATE_EPSILON: f32 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Normalize `v`, or return `None` when it is too short to carry a direction
    pub fn try_normalize(v: Vec3) -> Option<Vec3> {
        v.try_normalize(constants::DEGENERATE_EPSILON)
    }

    /// Whether two directions are (anti)parallel within tolerance
    pub fn is_parallel(a: Vec3, b: Vec3) -> bool {
        a.cross(&b).magnitude_squared() <= constants::DEGENERATE_EPSILON * a.magnitude_squared() * b.magnitude_squared()
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the Y (vertical) axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around an arbitrary unit axis
    fn rotation_axis(axis: &Unit<Vec3>, angle: f32) -> Mat4;

    /// Create an OpenGL-convention perspective projection (depth mapped to [-1, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Translation column of an affine transform
    fn translation(&self) -> Vec3;

    /// Overwrite the translation column of an affine transform
    fn set_translation(&mut self, translation: Vec3);

    /// Convert to the column-major nested array layout GPU uniforms expect
    fn to_cols_array(&self) -> [[f32; 4]; 4];
}

impl Mat4Ext for Mat4 {
    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_axis(axis: &Unit<Vec3>, angle: f32) -> Mat4 {
        Mat4::from_axis_angle(axis, angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = -(far + near) / (far - near);
        result[(2, 3)] = -(2.0 * far * near) / (far - near);
        result[(3, 2)] = -1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }

    fn translation(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn set_translation(&mut self, translation: Vec3) {
        self.m14 = translation.x;
        self.m24 = translation.y;
        self.m34 = translation.z;
    }

    fn to_cols_array(&self) -> [[f32; 4]; 4] {
        let mut result = [[0.0; 4]; 4];
        for (col, out) in result.iter_mut().enumerate() {
            for (row, value) in out.iter_mut().enumerate() {
                *value = self[(row, col)];
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(0.0, 3.0, 3.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::y());

        let eye_in_view = view.transform_point(&Point3::from(eye));
        assert_relative_eq!(eye_in_view.coords, Vec3::zeros(), epsilon = EPSILON);

        // Target lies straight ahead on -Z in view space
        let target_in_view = view.transform_point(&Point3::origin());
        assert_relative_eq!(target_in_view.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(target_in_view.y, 0.0, epsilon = EPSILON);
        assert!(target_in_view.z < 0.0);
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let ours = Mat4::perspective(utils::deg_to_rad(45.0), 4.0 / 3.0, 0.1, 1000.0);
        let reference = Mat4::new_perspective(4.0 / 3.0, utils::deg_to_rad(45.0), 0.1, 1000.0);
        assert_relative_eq!(ours, reference, epsilon = EPSILON);
    }

    #[test]
    fn test_translation_roundtrip() {
        let mut m = Mat4::rotation_y(0.7);
        m.set_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.translation(), Vec3::new(1.0, 2.0, 3.0));

        let cols = m.to_cols_array();
        assert_eq!(cols[3][0], 1.0);
        assert_eq!(cols[3][1], 2.0);
        assert_eq!(cols[3][2], 3.0);
        assert_eq!(cols[3][3], 1.0);
    }

    #[test]
    fn test_rotation_y_turns_z_toward_x() {
        let rotated = Mat4::rotation_y(constants::PI / 2.0).transform_vector(&Vec3::z());
        assert_relative_eq!(rotated, Vec3::x(), epsilon = EPSILON);
    }

    #[test]
    fn test_parallel_detection() {
        assert!(utils::is_parallel(Vec3::y(), Vec3::new(0.0, -2.0, 0.0)));
        assert!(!utils::is_parallel(Vec3::y(), Vec3::new(0.0, -2.0, 1.0)));
        assert!(utils::try_normalize(Vec3::zeros()).is_none());
    }
}
