use glam::{DMat3, DMat4, DVec3, DVec4};

/// Default tolerance used when checking that a rotation block is orthonormal.
pub const RIGIDITY_TOLERANCE: f64 = 1e-9;

/// A rigid body transformation in 3D.
///
/// The pose maps coordinates from the local frame into the parent frame as
/// `p_parent = rotation * p_local + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    rotation: DMat3,
    translation: DVec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotation: DMat3::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Create a pose from a rotation matrix and a translation.
    ///
    /// PRECONDITION: `rotation` is orthonormal.
    pub fn new(rotation: DMat3, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Create a pure translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            rotation: DMat3::IDENTITY,
            translation,
        }
    }

    /// Create a pose from a 4x4 homogeneous matrix. The bottom row is ignored.
    pub fn from_matrix(mat: &DMat4) -> Self {
        Self {
            rotation: DMat3::from_mat4(*mat),
            translation: mat.w_axis.truncate(),
        }
    }

    /// Create a pose from 16 values in column-major order.
    ///
    /// The layout is `[R_col0, 0, R_col1, 0, R_col2, 0, t, 1]`.
    pub fn from_column_major(values: &[f64; 16]) -> Self {
        Self::from_matrix(&DMat4::from_cols_array(values))
    }

    /// The rotation block.
    pub fn rotation(&self) -> DMat3 {
        self.rotation
    }

    /// The translation vector.
    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    /// The 4x4 homogeneous matrix with bottom row `(0, 0, 0, 1)`.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_cols(
            self.rotation.x_axis.extend(0.0),
            self.rotation.y_axis.extend(0.0),
            self.rotation.z_axis.extend(0.0),
            DVec4::new(
                self.translation.x,
                self.translation.y,
                self.translation.z,
                1.0,
            ),
        )
    }

    /// Flatten the homogeneous matrix into 16 values in column-major order.
    pub fn to_column_major(&self) -> [f64; 16] {
        self.matrix().to_cols_array()
    }

    /// Compose two transforms as `self * other`.
    ///
    /// The result first applies `other`, then `self`.
    pub fn compose(&self, other: &Pose) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.translation + self.rotation * other.translation,
        }
    }

    /// The inverse transform.
    pub fn inverse(&self) -> Self {
        let r_inv = self.rotation.transpose();
        Self {
            rotation: r_inv,
            translation: -(r_inv * self.translation),
        }
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }

    /// Check that the rotation block is orthonormal with determinant +1.
    pub fn is_rigid(&self, tolerance: f64) -> bool {
        let gram = self.rotation.transpose() * self.rotation;
        gram.abs_diff_eq(DMat3::IDENTITY, tolerance)
            && (self.rotation.determinant() - 1.0).abs() <= tolerance
    }
}

impl std::ops::Mul<Pose> for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        self.compose(&rhs)
    }
}

impl std::ops::MulAssign<Pose> for Pose {
    fn mul_assign(&mut self, rhs: Pose) {
        *self = self.compose(&rhs);
    }
}

impl std::ops::Mul<DVec3> for Pose {
    type Output = DVec3;

    fn mul(self, rhs: DVec3) -> DVec3 {
        self.transform_point(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rot_x(angle: f64) -> DMat3 {
        DMat3::from_rotation_x(angle)
    }

    #[test]
    fn test_identity() {
        let p = Pose::default();
        assert_eq!(p, Pose::IDENTITY);
        assert_eq!(p.matrix(), DMat4::IDENTITY);
        assert!(p.is_rigid(RIGIDITY_TOLERANCE));
    }

    #[test]
    fn test_column_major_layout() {
        let p = Pose::new(rot_x(std::f64::consts::FRAC_PI_2), DVec3::new(1.0, 2.0, 3.0));
        let cols = p.to_column_major();

        // bottom row entries
        assert_eq!(cols[3], 0.0);
        assert_eq!(cols[7], 0.0);
        assert_eq!(cols[11], 0.0);
        assert_eq!(cols[15], 1.0);

        // translation sits in the last column
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);

        // first column is the rotated x axis
        assert_relative_eq!(cols[0], 1.0);
        assert_relative_eq!(cols[1], 0.0);
        assert_relative_eq!(cols[2], 0.0);

        let back = Pose::from_column_major(&cols);
        assert_eq!(back, p);
    }

    #[test]
    fn test_compose_translations() {
        let a = Pose::from_translation(DVec3::new(0.0, 0.0, 1.0));
        let b = Pose::from_translation(DVec3::new(1.0, 0.0, 0.0));
        let c = a * b;
        assert_eq!(c.translation(), DVec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_compose_matches_matrix_product() {
        let a = Pose::new(rot_x(0.3), DVec3::new(0.1, -0.2, 0.3));
        let b = Pose::new(DMat3::from_rotation_z(-1.1), DVec3::new(0.5, 0.0, 0.25));
        let composed = (a * b).matrix();
        let expected = a.matrix() * b.matrix();
        assert!(composed.abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn test_inverse() {
        let p = Pose::new(DMat3::from_rotation_y(0.7), DVec3::new(0.4, 0.5, -0.6));
        let id = p * p.inverse();
        assert!(id.rotation().abs_diff_eq(DMat3::IDENTITY, 1e-12));
        assert!(id.translation().abs_diff_eq(DVec3::ZERO, 1e-12));
    }

    #[test]
    fn test_transform_point() {
        let p = Pose::new(
            DMat3::from_rotation_z(std::f64::consts::FRAC_PI_2),
            DVec3::new(0.0, 0.0, 1.0),
        );
        let q = p * DVec3::X;
        assert_relative_eq!(q.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_is_rigid_rejects_scaled_rotation() {
        let p = Pose::new(DMat3::from_diagonal(DVec3::new(1.0, 2.0, 1.0)), DVec3::ZERO);
        assert!(!p.is_rigid(RIGIDITY_TOLERANCE));
    }
}
