use tdcr_kinematics::KinematicsError;
use thiserror::Error;

/// Errors that can occur while running the particle swarm.
///
/// Failing to reach the target is not an error, see [`crate::IkOutcome::Unreachable`].
#[derive(Debug, Error, PartialEq)]
pub enum PsoError {
    /// Robot description error.
    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    /// An angle range is empty or not finite.
    #[error("Invalid {name} bounds: [{min}, {max}]")]
    InvalidBounds {
        /// Name of the bounded angle.
        name: &'static str,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// The swarm must hold at least one particle.
    #[error("Swarm size must be at least 1")]
    EmptySwarm,

    /// Each restart cycle must run at least one iteration.
    #[error("Maximum number of iterations must be at least 1")]
    ZeroIterations,

    /// The search was aborted by the caller.
    #[error("Cancelled at iteration {iteration} after {restarts} restarts")]
    Cancelled {
        /// Restarts performed before cancellation.
        restarts: usize,
        /// Iteration of the current cycle.
        iteration: usize,
    },
}
