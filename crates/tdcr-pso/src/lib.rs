#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The inverse kinematics of a continuum robot are solved by searching the
//! configuration space with a particle swarm. The fitness of a particle is the
//! distance between its end-effector and the target, computed with the fast
//! forward kinematics of [`tdcr_kinematics`].

mod error;
pub use error::PsoError;

/// Inverse kinematics entry points.
pub mod ik;

/// Cost functions minimized by the swarm.
pub mod objective;

/// Swarm and search box parameters.
pub mod params;

/// Restarting particle swarm minimizer.
pub mod solver;

/// Swarm state and update rule.
pub mod swarm;

pub use glam::DVec3;
pub use ik::{
    solve_inverse_kinematics, solve_inverse_kinematics_with_cancel, IkOutcome, IkSolution,
};
pub use objective::{EndEffectorObjective, Objective};
pub use params::{AngleBounds, PsoParams};
pub use solver::{minimize, PsoResult, TerminationReason};
pub use swarm::{Particle, Swarm};
