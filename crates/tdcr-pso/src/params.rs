use serde::{Deserialize, Serialize};

use crate::error::PsoError;

/// Parameters of the particle swarm search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoParams {
    /// Number of particles in the swarm.
    pub swarm_size: usize,
    /// Iterations per restart cycle.
    pub max_iterations: usize,
    /// Number of restart cycles before giving up.
    pub max_restarts: usize,
    /// Cost below which the search stops [m].
    pub min_error: f64,
    /// Attraction towards the personal best.
    pub c1: f64,
    /// Attraction towards the global best.
    pub c2: f64,
    /// Inertia weight at the first iteration.
    pub w_max: f64,
    /// Inertia weight at the last iteration.
    pub w_min: f64,
    /// Optional fixed seed for reproducible searches.
    pub random_seed: Option<u64>,
    /// Evaluate the particles of an iteration on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            swarm_size: 15,
            max_iterations: 45,
            max_restarts: 21,
            min_error: 1e-4,
            c1: 1.2,
            c2: 1.2,
            w_max: 0.9,
            w_min: 0.4,
            random_seed: None,
            parallel: false,
        }
    }
}

impl PsoParams {
    /// Inertia weight, decaying linearly from `w_max` to `w_min` over the cycle.
    pub fn inertia_weight(&self, iteration: usize) -> f64 {
        self.w_max - (self.w_max - self.w_min) / self.max_iterations as f64 * iteration as f64
    }

    pub(crate) fn validate(&self) -> Result<(), PsoError> {
        if self.swarm_size == 0 {
            return Err(PsoError::EmptySwarm);
        }
        if self.max_iterations == 0 {
            return Err(PsoError::ZeroIterations);
        }
        Ok(())
    }
}

/// Search box of the configuration angles [deg].
///
/// The first half of a position vector holds the `theta` of every segment and the
/// second half the `phi` of every segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleBounds {
    /// Lower bound of the bending angles.
    pub theta_min: f64,
    /// Upper bound of the bending angles.
    pub theta_max: f64,
    /// Lower bound of the bending plane angles.
    pub phi_min: f64,
    /// Upper bound of the bending plane angles.
    pub phi_max: f64,
}

impl Default for AngleBounds {
    fn default() -> Self {
        Self::from_limits(90.0, 360.0)
    }
}

impl AngleBounds {
    /// Bounds starting from zero up to the given limits.
    pub fn from_limits(theta_limit: f64, phi_limit: f64) -> Self {
        Self {
            theta_min: 0.0,
            theta_max: theta_limit,
            phi_min: 0.0,
            phi_max: phi_limit,
        }
    }

    /// Range `(min, max)` of the `index`-th component of a position vector.
    pub fn position_range(&self, num_seg: usize, index: usize) -> (f64, f64) {
        if index < num_seg {
            (self.theta_min, self.theta_max)
        } else {
            (self.phi_min, self.phi_max)
        }
    }

    /// Largest velocity magnitude of the `index`-th component.
    ///
    /// A particle can not move by more than the width of its range in one step.
    pub fn velocity_limit(&self, num_seg: usize, index: usize) -> f64 {
        let (min, max) = self.position_range(num_seg, index);
        max - min
    }

    /// Whether `position` lies inside the box.
    pub fn contains(&self, position: &[f64]) -> bool {
        let num_seg = position.len() / 2;
        position.iter().enumerate().all(|(i, &x)| {
            let (min, max) = self.position_range(num_seg, i);
            (min..=max).contains(&x)
        })
    }

    pub(crate) fn validate(&self) -> Result<(), PsoError> {
        let ranges = [
            ("theta", self.theta_min, self.theta_max),
            ("phi", self.phi_min, self.phi_max),
        ];
        for (name, min, max) in ranges {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(PsoError::InvalidBounds { name, min, max });
            }
        }
        Ok(())
    }
}
