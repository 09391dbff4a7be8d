//! PSO configuration.

use crate::domain::Bounds;

/// Configuration for the Particle Swarm engine.
///
/// Swarm size, dimensionality, and the iteration budget are required; the
/// domain box defaults to `[-10, 10]` on every axis.
///
/// # Examples
///
/// ```
/// use boxopt::pso::PsoConfig;
///
/// let config = PsoConfig::new(30, 2, 100)
///     .with_bounds(-5.0, 5.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    pub num_particles: usize,

    /// Dimensionality of the search space.
    pub dimensions: usize,

    /// Number of iterations to execute. The run always uses the full
    /// budget; there is no convergence-based early exit.
    pub max_iterations: usize,

    /// Search domain, applied per dimension.
    pub bounds: Bounds,

    /// Whether to evaluate particle fitness in parallel using rayon.
    ///
    /// Requires the `parallel` feature; without it the flag is ignored and
    /// evaluation stays sequential. Evaluation draws no randomness, so the
    /// result is identical either way for a fixed seed.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl PsoConfig {
    /// Creates a configuration with the required parameters.
    pub fn new(num_particles: usize, dimensions: usize, max_iterations: usize) -> Self {
        Self {
            num_particles,
            dimensions,
            max_iterations,
            bounds: Bounds::default(),
            parallel: false,
            seed: None,
        }
    }

    /// Sets the domain box.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Bounds::new(min, max);
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_particles < 1 {
            return Err("num_particles must be at least 1".into());
        }
        if self.dimensions < 1 {
            return Err("dimensions must be at least 1".into());
        }
        if self.max_iterations < 1 {
            return Err("max_iterations must be at least 1".into());
        }
        self.bounds.validate()
    }
}
