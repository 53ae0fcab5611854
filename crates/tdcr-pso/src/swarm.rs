//! Swarm state and the canonical particle swarm update.
//!
//! A [`Swarm`] is a plain value: [`Swarm::advance`] consumes it and returns the
//! swarm of the next iteration.

use rand::Rng;
use rayon::prelude::*;

use crate::error::PsoError;
use crate::objective::Objective;
use crate::params::{AngleBounds, PsoParams};

/// A single particle of the swarm.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position.
    pub position: Vec<f64>,
    /// Current velocity.
    pub velocity: Vec<f64>,
    /// Cost of the current position.
    pub cost: f64,
    /// Best position visited by this particle.
    pub best_position: Vec<f64>,
    /// Cost of the best position.
    pub best_cost: f64,
}

/// A set of particles sharing a global best position.
#[derive(Debug, Clone, PartialEq)]
pub struct Swarm {
    particles: Vec<Particle>,
    best_position: Vec<f64>,
    best_cost: f64,
}

fn evaluate<O: Objective>(objective: &O, positions: &[Vec<f64>], parallel: bool) -> Vec<f64> {
    if parallel {
        positions.par_iter().map(|p| objective.cost(p)).collect()
    } else {
        positions.iter().map(|p| objective.cost(p)).collect()
    }
}

impl Swarm {
    /// Draw a fresh swarm uniformly inside the bounds, at rest.
    ///
    /// Returns an error if `params` or `bounds` are invalid.
    pub fn initialize<O, R>(
        objective: &O,
        bounds: &AngleBounds,
        params: &PsoParams,
        rng: &mut R,
    ) -> Result<Self, PsoError>
    where
        O: Objective,
        R: Rng,
    {
        params.validate()?;
        bounds.validate()?;

        let dim = objective.dim();
        let num_seg = dim / 2;

        let positions: Vec<Vec<f64>> = (0..params.swarm_size)
            .map(|_| {
                (0..dim)
                    .map(|i| {
                        let (min, max) = bounds.position_range(num_seg, i);
                        rng.random_range(min..=max)
                    })
                    .collect()
            })
            .collect();

        let costs = evaluate(objective, &positions, params.parallel);

        let particles: Vec<Particle> = positions
            .into_iter()
            .zip(costs)
            .map(|(position, cost)| Particle {
                velocity: vec![0.0; dim],
                best_position: position.clone(),
                best_cost: cost,
                position,
                cost,
            })
            .collect();

        let (best_position, best_cost) = particles
            .iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
            .map(|p| (p.position.clone(), p.cost))
            .ok_or(PsoError::EmptySwarm)?;

        Ok(Self {
            particles,
            best_position,
            best_cost,
        })
    }

    /// Move every particle once and update the personal and global bests.
    ///
    /// All velocities are computed from the bests of the incoming swarm, the bests
    /// are only updated once every particle has moved.
    pub fn advance<O, R>(
        self,
        objective: &O,
        bounds: &AngleBounds,
        params: &PsoParams,
        inertia: f64,
        rng: &mut R,
    ) -> Self
    where
        O: Objective,
        R: Rng,
    {
        let Swarm {
            mut particles,
            mut best_position,
            mut best_cost,
        } = self;

        let dim = objective.dim();
        let num_seg = dim / 2;

        for particle in particles.iter_mut() {
            for i in 0..dim {
                let cognitive = params.c1
                    * rng.random::<f64>()
                    * (particle.best_position[i] - particle.position[i]);
                let social =
                    params.c2 * rng.random::<f64>() * (best_position[i] - particle.position[i]);

                let v_max = bounds.velocity_limit(num_seg, i);
                let velocity =
                    (inertia * particle.velocity[i] + cognitive + social).clamp(-v_max, v_max);

                let (min, max) = bounds.position_range(num_seg, i);
                particle.velocity[i] = velocity;
                particle.position[i] = (particle.position[i] + velocity).clamp(min, max);
            }
        }

        let positions: Vec<Vec<f64>> = particles.iter().map(|p| p.position.clone()).collect();
        let costs = evaluate(objective, &positions, params.parallel);

        for (particle, cost) in particles.iter_mut().zip(costs) {
            particle.cost = cost;
            if cost < particle.best_cost {
                particle.best_cost = cost;
                particle.best_position.clone_from(&particle.position);

                if cost < best_cost {
                    best_cost = cost;
                    best_position.clone_from(&particle.position);
                }
            }
        }

        Self {
            particles,
            best_position,
            best_cost,
        }
    }

    /// The particles of the swarm.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Best position found by the swarm.
    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    /// Cost of the best position.
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Consume the swarm and return its best position and cost.
    pub fn into_best(self) -> (Vec<f64>, f64) {
        (self.best_position, self.best_cost)
    }
}
