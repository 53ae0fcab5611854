use std::sync::atomic::AtomicBool;

use glam::DVec3;
use tdcr_kinematics::{Configuration, RobotGeometry};

use crate::error::PsoError;
use crate::objective::EndEffectorObjective;
use crate::params::{AngleBounds, PsoParams};
use crate::solver::minimize;

/// Configuration that places the end-effector on the target.
#[derive(Debug, Clone, PartialEq)]
pub struct IkSolution {
    /// Bending angle of each segment [deg].
    pub theta: Vec<f64>,
    /// Bending plane angle of each segment [deg].
    pub phi: Vec<f64>,
    /// Distance between the reached and the target position [m].
    pub error: f64,
    /// Iterations run in the successful cycle.
    pub iterations: usize,
    /// Restarts needed before the successful cycle.
    pub restarts: usize,
}

impl IkSolution {
    /// Angles as a single vector `[theta_1..theta_n, phi_1..phi_n]`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.theta.iter().chain(&self.phi).copied().collect()
    }

    /// Angles of each segment.
    pub fn configurations(&self) -> Vec<Configuration> {
        self.theta
            .iter()
            .zip(&self.phi)
            .map(|(&theta, &phi)| Configuration::new(theta, phi))
            .collect()
    }
}

/// Outcome of an inverse kinematics search.
#[derive(Debug, Clone, PartialEq)]
pub enum IkOutcome {
    /// A configuration within tolerance was found.
    Solved(IkSolution),
    /// No configuration was found within the restart budget. The target is
    /// likely outside the workspace.
    Unreachable,
}

impl IkOutcome {
    /// The solution, if any.
    pub fn solution(&self) -> Option<&IkSolution> {
        match self {
            IkOutcome::Solved(solution) => Some(solution),
            IkOutcome::Unreachable => None,
        }
    }
}

/// Search the configuration angles that bring the end-effector to `target`.
///
/// # Arguments
///
/// * `geometry` - Robot geometry.
/// * `bounds` - Allowed range of the angles [deg].
/// * `target` - End-effector position in the robot base frame [m].
/// * `params` - Swarm parameters.
///
/// # Returns
///
/// [`IkOutcome::Unreachable`] when the swarm did not reach `params.min_error`.
///
/// Example:
///
/// ```no_run
/// use tdcr_kinematics::RobotGeometry;
/// use tdcr_pso::{solve_inverse_kinematics, AngleBounds, DVec3, IkOutcome, PsoParams};
///
/// let geometry = RobotGeometry::new(vec![0.025], vec![10], 0.005);
/// let target = DVec3::new(0.008943704370872637, 0.0, 0.022721292000777805);
/// let outcome =
///     solve_inverse_kinematics(&geometry, &AngleBounds::default(), target, &PsoParams::default())
///         .unwrap();
/// if let IkOutcome::Solved(solution) = outcome {
///     println!("theta: {:?}, phi: {:?}", solution.theta, solution.phi);
/// }
/// ```
pub fn solve_inverse_kinematics(
    geometry: &RobotGeometry,
    bounds: &AngleBounds,
    target: DVec3,
    params: &PsoParams,
) -> Result<IkOutcome, PsoError> {
    solve(geometry, bounds, target, params, None)
}

/// Same as [`solve_inverse_kinematics`], aborting with [`PsoError::Cancelled`]
/// once `cancel` is set.
pub fn solve_inverse_kinematics_with_cancel(
    geometry: &RobotGeometry,
    bounds: &AngleBounds,
    target: DVec3,
    params: &PsoParams,
    cancel: &AtomicBool,
) -> Result<IkOutcome, PsoError> {
    solve(geometry, bounds, target, params, Some(cancel))
}

fn solve(
    geometry: &RobotGeometry,
    bounds: &AngleBounds,
    target: DVec3,
    params: &PsoParams,
    cancel: Option<&AtomicBool>,
) -> Result<IkOutcome, PsoError> {
    let objective = EndEffectorObjective::new(geometry, target)?;
    let result = minimize(&objective, bounds, params, cancel)?;

    if !result.converged() {
        return Ok(IkOutcome::Unreachable);
    }

    let (theta, phi) = result.best_position.split_at(objective.num_segments());
    Ok(IkOutcome::Solved(IkSolution {
        theta: theta.to_vec(),
        phi: phi.to_vec(),
        error: result.best_cost,
        iterations: result.iterations,
        restarts: result.restarts,
    }))
}
