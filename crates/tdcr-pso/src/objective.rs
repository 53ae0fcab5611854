use glam::DVec3;
use tdcr_kinematics::{
    compute_end_effector, geometry::broadcast_elements, KinematicsError, RobotGeometry,
};

/// Cost function minimized by the swarm.
pub trait Objective: Sync {
    /// Dimension of the search space.
    fn dim(&self) -> usize;

    /// Cost of a candidate position. Lower is better.
    fn cost(&self, position: &[f64]) -> f64;
}

/// Distance between the end-effector of a candidate configuration and a target.
///
/// Positions are `[theta_1..theta_n, phi_1..phi_n]` with angles in degrees.
#[derive(Debug, Clone)]
pub struct EndEffectorObjective {
    seg_len: Vec<f64>,
    tendon_radius: f64,
    target: DVec3,
}

impl EndEffectorObjective {
    /// Create the objective for a robot and a target position in the base frame [m].
    pub fn new(geometry: &RobotGeometry, target: DVec3) -> Result<Self, KinematicsError> {
        broadcast_elements(geometry.num_segments(), &geometry.elements)?;
        Ok(Self {
            seg_len: geometry.seg_len.clone(),
            tendon_radius: geometry.tendon_radius,
            target,
        })
    }

    /// Number of segments.
    pub fn num_segments(&self) -> usize {
        self.seg_len.len()
    }

    /// The target position.
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// End-effector position of a candidate configuration.
    pub fn end_effector(&self, position: &[f64]) -> Result<DVec3, KinematicsError> {
        let num_seg = self.num_segments();
        let (theta, phi_deg) = position.split_at(num_seg.min(position.len()));
        let phi: Vec<f64> = phi_deg.iter().map(|p| p.to_radians()).collect();
        compute_end_effector(theta, &phi, &self.seg_len, self.tendon_radius)
    }
}

impl Objective for EndEffectorObjective {
    fn dim(&self) -> usize {
        2 * self.num_segments()
    }

    fn cost(&self, position: &[f64]) -> f64 {
        self.end_effector(position)
            .map_or(f64::INFINITY, |p| p.distance(self.target))
    }
}
