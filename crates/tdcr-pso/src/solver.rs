use std::sync::atomic::{AtomicBool, Ordering};

use rand::{rngs::StdRng, SeedableRng};

use crate::error::PsoError;
use crate::objective::Objective;
use crate::params::{AngleBounds, PsoParams};
use crate::swarm::Swarm;

/// Reason why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The best cost dropped to `min_error` or below.
    Converged,
    /// Every restart cycle ended above `min_error`.
    RestartsExhausted,
}

/// Result of a particle swarm search.
#[derive(Debug, Clone, PartialEq)]
pub struct PsoResult {
    /// Best position found. On exhaustion, the best over all cycles.
    pub best_position: Vec<f64>,
    /// Cost of the best position.
    pub best_cost: f64,
    /// Iterations run in the final cycle.
    pub iterations: usize,
    /// Restarts performed before the final cycle.
    pub restarts: usize,
    /// Reason for termination.
    pub termination_reason: TerminationReason,
}

impl PsoResult {
    /// Whether the search reached the target cost.
    pub fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::Converged
    }
}

/// Minimize an objective with a restarting particle swarm.
///
/// Each cycle draws a fresh swarm and runs `max_iterations + 1` updates with a
/// linearly decaying inertia weight. The search stops as soon as the global best
/// cost is at most `min_error`, and gives up after `max_restarts` cycles.
///
/// # Arguments
///
/// * `objective` - Cost function to minimize.
/// * `bounds` - Search box of the angles.
/// * `params` - Swarm parameters.
/// * `cancel` - Optional flag checked at the top of every iteration.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or the search is cancelled.
pub fn minimize<O: Objective>(
    objective: &O,
    bounds: &AngleBounds,
    params: &PsoParams,
    cancel: Option<&AtomicBool>,
) -> Result<PsoResult, PsoError> {
    params.validate()?;
    bounds.validate()?;

    let mut rng: StdRng = match params.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let is_cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));

    let mut overall_best: Option<(Vec<f64>, f64)> = None;

    for restart in 0..params.max_restarts {
        let mut swarm = Swarm::initialize(objective, bounds, params, &mut rng)?;
        let mut iterations = 0;

        while iterations <= params.max_iterations {
            if is_cancelled() {
                return Err(PsoError::Cancelled {
                    restarts: restart,
                    iteration: iterations,
                });
            }

            if swarm.best_cost() <= params.min_error {
                break;
            }

            let inertia = params.inertia_weight(iterations);
            swarm = swarm.advance(objective, bounds, params, inertia, &mut rng);
            iterations += 1;
        }

        if swarm.best_cost() <= params.min_error {
            log::debug!(
                "PSO converged after {} restarts and {} iterations with error {}",
                restart,
                iterations,
                swarm.best_cost()
            );
            let (best_position, best_cost) = swarm.into_best();
            return Ok(PsoResult {
                best_position,
                best_cost,
                iterations,
                restarts: restart,
                termination_reason: TerminationReason::Converged,
            });
        }

        log::debug!(
            "PSO restart {} stagnated with error {}",
            restart + 1,
            swarm.best_cost()
        );

        let improves = overall_best
            .as_ref()
            .map_or(true, |(_, cost)| swarm.best_cost() < *cost);
        if improves {
            overall_best = Some(swarm.into_best());
        }
    }

    let (best_position, best_cost) =
        overall_best.unwrap_or_else(|| (vec![0.0; objective.dim()], f64::INFINITY));

    log::warn!(
        "PSO gave up after {} restarts, best error {}",
        params.max_restarts,
        best_cost
    );

    Ok(PsoResult {
        best_position,
        best_cost,
        iterations: params.max_iterations + 1,
        restarts: params.max_restarts,
        termination_reason: TerminationReason::RestartsExhausted,
    })
}
