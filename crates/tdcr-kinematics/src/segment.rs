//! Constant curvature arc transform of a single segment.

use glam::{DMat3, DVec3};
use tdcr_pose::Pose;

/// Parameters of one arc evaluation.
///
/// The arc is parametrized by its projected bending vector
/// `(del_x, del_y) = theta * arc_length * tendon_radius * (cos(phi), sin(phi))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// Segment bending parameter.
    pub theta: f64,
    /// Bending plane orientation [rad].
    pub phi: f64,
    /// Curvilinear length travelled along the segment [m].
    pub arc_length: f64,
    /// Tendon connection radius [m].
    pub tendon_radius: f64,
}

impl ArcParams {
    /// Create the parameters for one evaluation point.
    pub fn new(theta: f64, phi: f64, arc_length: f64, tendon_radius: f64) -> Self {
        Self {
            theta,
            phi,
            arc_length,
            tendon_radius,
        }
    }

    /// The projected bending vector `(del_x, del_y)`.
    pub fn bending_vector(&self) -> (f64, f64) {
        let scale = self.theta * self.arc_length * self.tendon_radius;
        (scale * self.phi.cos(), scale * self.phi.sin())
    }
}

/// Pose reached after `arc_length` along a constant curvature segment.
///
/// A zero `theta` yields a straight extension `(0, 0, arc_length)` with identity
/// rotation, whatever the value of `phi`.
pub fn arc_transform(params: &ArcParams) -> Pose {
    if params.theta == 0.0 {
        return Pose::from_translation(DVec3::new(0.0, 0.0, params.arc_length));
    }

    let (del_x, del_y) = params.bending_vector();
    let delta = del_x.hypot(del_y);
    let theta_q = delta / params.tendon_radius;

    let nx = del_x / delta;
    let ny = del_y / delta;
    let (s, c) = theta_q.sin_cos();
    let cm1 = c - 1.0;

    // columns of the tilt rotation about the axis orthogonal to (nx, ny, 0)
    let rotation = DMat3::from_cols(
        DVec3::new(1.0 + nx * nx * cm1, nx * ny * cm1, -nx * s),
        DVec3::new(nx * ny * cm1, 1.0 + ny * ny * cm1, -ny * s),
        DVec3::new(nx * s, ny * s, c),
    );

    let scale = params.tendon_radius * params.arc_length / (delta * delta);
    let translation = DVec3::new(
        del_x * (1.0 - c) * scale,
        del_y * (1.0 - c) * scale,
        delta * s * scale,
    );

    Pose::new(rotation, translation)
}
