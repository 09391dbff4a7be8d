//! SA execution loop.

use super::config::{CoolingSchedule, SaConfig};
use crate::error::Error;
use crate::objective::Objective;
use crate::pso::runner::checked_evaluate;
use crate::random::create_rng;
use rand::Rng;

/// Iterations between step-size adaptations.
const STEP_WINDOW: usize = 100;
/// Acceptance rate below which the step size shrinks.
const LOW_ACCEPTANCE: f64 = 0.1;
/// Acceptance rate above which the step size grows.
const HIGH_ACCEPTANCE: f64 = 0.6;
/// Fraction of dimensions perturbed per neighbor move.
const PERTURBED_FRACTION: f64 = 0.3;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// The best position found.
    pub best: Vec<f64>,

    /// Fitness at `best`: the running minimum over every fitness observed.
    pub best_fitness: f64,

    /// Total iterations executed (always the configured budget).
    pub iterations: usize,

    /// Total objective evaluations (initial solution plus one per iteration).
    pub evaluations: usize,

    /// Temperature when the run finished.
    pub final_temperature: f64,

    /// Step size when the run finished, after adaptation.
    pub final_step_size: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Best fitness after each iteration, preceded by the initial
    /// solution's fitness. Non-increasing.
    pub fitness_history: Vec<f64>,
}

/// Executes the Simulated Annealing loop.
///
/// # Usage
///
/// ```
/// use boxopt::sa::{SaConfig, SaRunner};
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let config = SaConfig::new(2, 100.0, 0.001, 1000)
///     .with_bounds(-5.0, 5.0)
///     .with_seed(42);
/// let result = SaRunner::run(&sphere, &config).unwrap();
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs SA to minimize `objective` over the configured domain.
    ///
    /// Executes the full iteration budget; there is no early exit. Returns
    /// [`Error::Config`] if the configuration is invalid and
    /// [`Error::NonFiniteFitness`] if the objective ever produces a
    /// non-finite value (the run aborts with no partial result).
    pub fn run<O: Objective>(objective: &O, config: &SaConfig) -> Result<SaResult, Error> {
        config.validate().map_err(Error::Config)?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        // Initialize
        let mut current = config.bounds.sample_vec(config.dimensions, &mut rng);
        let mut current_fitness = checked_evaluate(objective, &current, 0)?;
        let mut best = current.clone();
        let mut best_fitness = current_fitness;

        let mut temperature = config.initial_temperature;
        let mut step_size = config.step_size;

        let mut evaluations = 1usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut accepted_in_window = 0usize;

        let mut fitness_history = Vec::with_capacity(config.max_iterations + 1);
        fitness_history.push(best_fitness);

        for iteration in 0..config.max_iterations {
            let neighbor = propose_neighbor(&current, step_size, config, &mut rng);
            let neighbor_fitness = checked_evaluate(objective, &neighbor, iteration)?;
            evaluations += 1;

            if accept(current_fitness, neighbor_fitness, temperature, &mut rng) {
                if neighbor_fitness < current_fitness {
                    improving_moves += 1;
                }
                current = neighbor;
                current_fitness = neighbor_fitness;
                accepted_moves += 1;
                accepted_in_window += 1;

                if current_fitness < best_fitness {
                    best.copy_from_slice(&current);
                    best_fitness = current_fitness;
                }
            }

            // Cool from the iteration index; schedules are never compounded.
            temperature = temperature_at(config, iteration);

            if iteration > 0 && iteration % STEP_WINDOW == 0 {
                let acceptance_rate = accepted_in_window as f64 / STEP_WINDOW as f64;
                if acceptance_rate < LOW_ACCEPTANCE {
                    step_size *= 0.9;
                } else if acceptance_rate > HIGH_ACCEPTANCE {
                    step_size *= 1.1;
                }
                accepted_in_window = 0;
            }

            fitness_history.push(best_fitness);
            objective.on_iteration(iteration + 1, best_fitness);
        }

        log::debug!(
            "sa finished: {} iterations, {accepted_moves} accepted, best fitness {best_fitness}",
            config.max_iterations
        );

        Ok(SaResult {
            best,
            best_fitness,
            iterations: config.max_iterations,
            evaluations,
            final_temperature: temperature,
            final_step_size: step_size,
            accepted_moves,
            improving_moves,
            fitness_history,
        })
    }
}

/// Temperature for the given iteration index, floored at the configured
/// final temperature.
fn temperature_at(config: &SaConfig, iteration: usize) -> f64 {
    let t = match config.cooling {
        CoolingSchedule::Linear => {
            let alpha = iteration as f64 / config.max_iterations as f64;
            config.initial_temperature * (1.0 - alpha) + config.final_temperature * alpha
        }
        CoolingSchedule::Exponential => {
            config.initial_temperature * config.cooling_rate.powf(iteration as f64)
        }
        CoolingSchedule::Logarithmic => {
            config.initial_temperature / (2.0 + iteration as f64).ln()
        }
    };
    t.max(config.final_temperature)
}

/// Number of coordinates perturbed per move: roughly 30% of the
/// dimensions, at least one. Indices are drawn independently, so repeats
/// are permitted.
fn perturbation_count(dimensions: usize) -> usize {
    ((dimensions as f64 * PERTURBED_FRACTION).round() as usize).max(1)
}

/// Proposes a neighbor of `current`: perturb a random subset of
/// coordinates by a uniform offset within the step size, then clamp back
/// into the domain.
fn propose_neighbor<R: Rng>(
    current: &[f64],
    step_size: f64,
    config: &SaConfig,
    rng: &mut R,
) -> Vec<f64> {
    let mut neighbor = current.to_vec();
    for _ in 0..perturbation_count(config.dimensions) {
        let dim = rng.random_range(0..config.dimensions);
        neighbor[dim] += rng.random_range(-step_size..step_size);
    }
    config.bounds.clamp_vec(&mut neighbor);
    neighbor
}

/// Metropolis acceptance criterion.
///
/// Improvements are always accepted. At a temperature at or below zero the
/// search is greedy: nothing else is accepted. Otherwise a worsening move
/// is accepted with probability `exp(-delta / temperature)`.
fn accept<R: Rng>(current_cost: f64, new_cost: f64, temperature: f64, rng: &mut R) -> bool {
    if new_cost < current_cost {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    let probability = (-(new_cost - current_cost) / temperature).exp();
    rng.random_range(0.0..1.0) < probability
}
