//! PSO execution loop.

use super::config::PsoConfig;
use super::types::Particle;
use crate::error::Error;
use crate::objective::Objective;
use crate::random::create_rng;
use rand::Rng;

/// Cognitive coefficient: attraction toward a particle's personal best.
const COGNITIVE_COEF: f64 = 2.0;
/// Social coefficient: attraction toward the swarm's global best.
const SOCIAL_COEF: f64 = 2.0;
/// Inertia weight at the start of the run.
const INERTIA_START: f64 = 0.9;
/// Inertia weight the schedule approaches at the end of the run.
const INERTIA_END: f64 = 0.4;
/// Per-component velocity clamp, against divergence.
const VELOCITY_LIMIT: f64 = 2.0;

/// Result of a PSO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoResult {
    /// The best position found by any particle.
    pub best: Vec<f64>,

    /// Fitness at `best`.
    pub best_fitness: f64,

    /// Total iterations executed (always the configured budget).
    pub iterations: usize,

    /// Total objective evaluations.
    pub evaluations: usize,

    /// Global-best fitness at the end of each iteration. Non-increasing.
    pub fitness_history: Vec<f64>,
}

/// Executes the particle swarm loop.
///
/// # Usage
///
/// ```
/// use boxopt::pso::{PsoConfig, PsoRunner};
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// let config = PsoConfig::new(30, 2, 100).with_bounds(-5.0, 5.0).with_seed(42);
/// let result = PsoRunner::run(&sphere, &config).unwrap();
/// ```
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO to minimize `objective` over the configured domain.
    ///
    /// Executes the full iteration budget; there is no early exit. Returns
    /// [`Error::Config`] if the configuration is invalid and
    /// [`Error::NonFiniteFitness`] if the objective ever produces a
    /// non-finite value (the run aborts with no partial result).
    pub fn run<O: Objective>(objective: &O, config: &PsoConfig) -> Result<PsoResult, Error> {
        config.validate().map_err(Error::Config)?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut swarm: Vec<Particle> = (0..config.num_particles)
            .map(|_| Particle::init(config.dimensions, &config.bounds, &mut rng))
            .collect();

        let mut global_best_position = vec![0.0; config.dimensions];
        let mut global_best_fitness = f64::INFINITY;

        let mut fitness_history = Vec::with_capacity(config.max_iterations);
        let mut evaluations = 0usize;

        for iteration in 0..config.max_iterations {
            evaluate_swarm(objective, &mut swarm, iteration, config.parallel)?;
            evaluations += swarm.len();

            update_personal_bests(&mut swarm);
            update_global_best(&swarm, &mut global_best_position, &mut global_best_fitness);

            fitness_history.push(global_best_fitness);
            objective.on_iteration(iteration + 1, global_best_fitness);

            let inertia = inertia_weight(iteration, config.max_iterations);
            update_velocities(
                &mut swarm,
                &global_best_position,
                inertia,
                &mut rng,
            );
            update_positions(&mut swarm, config);
        }

        log::debug!(
            "pso finished: {} iterations, best fitness {global_best_fitness}",
            config.max_iterations
        );

        Ok(PsoResult {
            best: global_best_position,
            best_fitness: global_best_fitness,
            iterations: config.max_iterations,
            evaluations,
            fitness_history,
        })
    }
}

/// Evaluate every particle's current position.
///
/// Evaluation writes only the particle's own fitness and draws no
/// randomness, so the parallel path produces the same state as the
/// sequential one. Personal/global best updates happen strictly after this
/// returns.
fn evaluate_swarm<O: Objective>(
    objective: &O,
    swarm: &mut [Particle],
    iteration: usize,
    parallel: bool,
) -> Result<(), Error> {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        return swarm.par_iter_mut().try_for_each(|particle| {
            particle.fitness = checked_evaluate(objective, &particle.position, iteration)?;
            Ok(())
        });
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for particle in swarm.iter_mut() {
        particle.fitness = checked_evaluate(objective, &particle.position, iteration)?;
    }
    Ok(())
}

pub(crate) fn checked_evaluate<O: Objective>(
    objective: &O,
    position: &[f64],
    iteration: usize,
) -> Result<f64, Error> {
    let value = objective.evaluate(position);
    if !value.is_finite() {
        return Err(Error::NonFiniteFitness { iteration, value });
    }
    Ok(value)
}

/// Update each particle's personal best. Strict improvement only; ties do
/// not update.
fn update_personal_bests(swarm: &mut [Particle]) {
    for particle in swarm.iter_mut() {
        if particle.fitness < particle.best_fitness {
            particle.best_fitness = particle.fitness;
            particle.best_position.copy_from_slice(&particle.position);
        }
    }
}

/// Scan all personal bests and update the global best. Strict improvement
/// only, so the global best is monotonically non-increasing over the run.
fn update_global_best(
    swarm: &[Particle],
    global_best_position: &mut [f64],
    global_best_fitness: &mut f64,
) {
    for particle in swarm.iter() {
        if particle.best_fitness < *global_best_fitness {
            *global_best_fitness = particle.best_fitness;
            global_best_position.copy_from_slice(&particle.best_position);
        }
    }
}

/// Inertia weight for the given iteration: linear decay from 0.9 toward
/// 0.4, recomputed from the iteration index.
fn inertia_weight(iteration: usize, max_iterations: usize) -> f64 {
    INERTIA_START
        - (INERTIA_START - INERTIA_END) * iteration as f64 / max_iterations as f64
}

/// Velocity update: momentum plus cognitive and social attraction, with
/// fresh uniform draws per dimension per particle. Each component is
/// clamped to `[-VELOCITY_LIMIT, VELOCITY_LIMIT]`.
fn update_velocities<R: Rng>(
    swarm: &mut [Particle],
    global_best_position: &[f64],
    inertia: f64,
    rng: &mut R,
) {
    for particle in swarm.iter_mut() {
        for d in 0..particle.velocity.len() {
            let r1: f64 = rng.random_range(0.0..1.0);
            let r2: f64 = rng.random_range(0.0..1.0);

            let cognitive =
                COGNITIVE_COEF * r1 * (particle.best_position[d] - particle.position[d]);
            let social = SOCIAL_COEF * r2 * (global_best_position[d] - particle.position[d]);

            let v = inertia * particle.velocity[d] + cognitive + social;
            particle.velocity[d] = v.clamp(-VELOCITY_LIMIT, VELOCITY_LIMIT);
        }
    }
}

/// Position update: step along the velocity, then clamp back into the
/// domain (hard clamp to the boundary, not wrap-around).
fn update_positions(swarm: &mut [Particle], config: &PsoConfig) {
    for particle in swarm.iter_mut() {
        for d in 0..particle.position.len() {
            particle.position[d] += particle.velocity[d];
        }
        config.bounds.clamp_vec(&mut particle.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bounds;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_sphere_convergence() {
        let config = PsoConfig::new(30, 2, 100).with_bounds(-5.0, 5.0).with_seed(42);
        let result = PsoRunner::run(&sphere, &config).unwrap();

        assert!(
            result.best_fitness < 1.0,
            "expected near-zero fitness on 2D sphere, got {}",
            result.best_fitness
        );
        assert_eq!(result.iterations, 100);
        assert_eq!(result.evaluations, 30 * 100);
    }

    #[test]
    fn test_history_non_increasing() {
        let config = PsoConfig::new(20, 3, 200).with_bounds(-5.0, 5.0).with_seed(7);
        let result = PsoRunner::run(&sphere, &config).unwrap();

        assert_eq!(result.fitness_history.len(), 200);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "global best must never regress: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(*result.fitness_history.last().unwrap(), result.best_fitness);
    }

    #[test]
    fn test_best_within_bounds() {
        let config = PsoConfig::new(25, 4, 150).with_bounds(-3.0, 3.0).with_seed(11);
        let result = PsoRunner::run(&sphere, &config).unwrap();
        assert!(result.best.iter().all(|&x| (-3.0..=3.0).contains(&x)));
    }

    #[test]
    fn test_determinism() {
        let config = PsoConfig::new(30, 2, 50).with_bounds(-5.0, 5.0).with_seed(123);
        let a = PsoRunner::run(&sphere, &config).unwrap();
        let b = PsoRunner::run(&sphere, &config).unwrap();

        assert_eq!(a.best_fitness.to_bits(), b.best_fitness.to_bits());
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PsoConfig::new(0, 2, 100);
        match PsoRunner::run(&sphere, &config) {
            Err(Error::Config(reason)) => assert!(reason.contains("num_particles")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_objective_aborts() {
        let bad = |_x: &[f64]| f64::NAN;
        let config = PsoConfig::new(10, 2, 100).with_seed(42);
        match PsoRunner::run(&bad, &config) {
            Err(Error::NonFiniteFitness { iteration, .. }) => assert_eq!(iteration, 0),
            other => panic!("expected NonFiniteFitness, got {other:?}"),
        }
    }

    #[test]
    fn test_single_particle_single_dimension() {
        // Degenerate but legal: the lone particle chases itself.
        let config = PsoConfig::new(1, 1, 50).with_bounds(-5.0, 5.0).with_seed(3);
        let result = PsoRunner::run(&sphere, &config).unwrap();
        assert!(result.best_fitness.is_finite());
        assert_eq!(result.best.len(), 1);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let base = PsoConfig::new(30, 3, 60).with_bounds(-5.0, 5.0).with_seed(42);
        let sequential = PsoRunner::run(&sphere, &base).unwrap();
        let parallel = PsoRunner::run(&sphere, &base.clone().with_parallel(true)).unwrap();

        assert_eq!(sequential.best, parallel.best);
        assert_eq!(
            sequential.best_fitness.to_bits(),
            parallel.best_fitness.to_bits()
        );
    }

    // ---- helper-level behavior ----

    #[test]
    fn test_inertia_weight_schedule() {
        assert!((inertia_weight(0, 100) - 0.9).abs() < 1e-12);
        assert!((inertia_weight(50, 100) - 0.65).abs() < 1e-12);
        assert!((inertia_weight(100, 100) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_personal_best_strict_improvement() {
        let bounds = Bounds::new(-1.0, 1.0);
        let mut rng = crate::random::create_rng(0);
        let mut swarm = vec![Particle::init(2, &bounds, &mut rng)];

        swarm[0].best_fitness = 5.0;
        swarm[0].best_position = vec![0.5, 0.5];

        // Equal fitness must not move the personal best.
        swarm[0].fitness = 5.0;
        swarm[0].position = vec![0.1, 0.1];
        update_personal_bests(&mut swarm);
        assert_eq!(swarm[0].best_position, vec![0.5, 0.5]);

        // Strictly better fitness replaces it.
        swarm[0].fitness = 4.0;
        update_personal_bests(&mut swarm);
        assert_eq!(swarm[0].best_position, vec![0.1, 0.1]);
        assert_eq!(swarm[0].best_fitness, 4.0);
    }

    #[test]
    fn test_global_best_takes_swarm_minimum() {
        let bounds = Bounds::new(-1.0, 1.0);
        let mut rng = crate::random::create_rng(0);
        let mut swarm: Vec<Particle> =
            (0..3).map(|_| Particle::init(2, &bounds, &mut rng)).collect();
        swarm[0].best_fitness = 3.0;
        swarm[1].best_fitness = 1.0;
        swarm[1].best_position = vec![0.2, -0.2];
        swarm[2].best_fitness = 2.0;

        let mut gb_position = vec![0.0, 0.0];
        let mut gb_fitness = f64::INFINITY;
        update_global_best(&swarm, &mut gb_position, &mut gb_fitness);

        assert_eq!(gb_fitness, 1.0);
        assert_eq!(gb_position, vec![0.2, -0.2]);
    }

    #[test]
    fn test_velocity_clamped() {
        let bounds = Bounds::new(-100.0, 100.0);
        let mut rng = crate::random::create_rng(5);
        let mut swarm = vec![Particle::init(2, &bounds, &mut rng)];
        swarm[0].position = vec![-90.0, -90.0];
        swarm[0].best_position = vec![90.0, 90.0];

        // Huge attraction gap; every component must still land in ±2.
        update_velocities(&mut swarm, &[90.0, 90.0], 0.9, &mut rng);
        assert!(swarm[0]
            .velocity
            .iter()
            .all(|&v| (-VELOCITY_LIMIT..=VELOCITY_LIMIT).contains(&v)));
    }

    #[test]
    fn test_positions_clamped_to_domain() {
        let config = PsoConfig::new(1, 2, 1).with_bounds(-1.0, 1.0);
        let bounds = Bounds::new(-1.0, 1.0);
        let mut rng = crate::random::create_rng(9);
        let mut swarm = vec![Particle::init(2, &bounds, &mut rng)];
        swarm[0].position = vec![0.9, -0.9];
        swarm[0].velocity = vec![2.0, -2.0];

        update_positions(&mut swarm, &config);
        assert_eq!(swarm[0].position, vec![1.0, -1.0]);
    }
}
