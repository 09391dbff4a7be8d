//! Derivative-free stochastic optimization over bounded continuous domains.
//!
//! Provides two single-process metaheuristic engines for minimizing a
//! black-box objective `f: R^D -> R` over an axis-aligned box `[min, max]^D`:
//!
//! - **Particle Swarm Optimization (PSO)**: Population-based search driving
//!   a swarm of particles toward the best positions found so far, with
//!   linearly decaying inertia.
//! - **Simulated Annealing (SA)**: Single-solution trajectory search with
//!   Metropolis acceptance, pluggable cooling schedules, and adaptive
//!   perturbation step size.
//!
//! # Architecture
//!
//! The engines only ever *call* the objective; they never inspect it. A
//! problem is anything implementing [`Objective`] — a plain closure
//! `Fn(&[f64]) -> f64` works out of the box. Each run owns its random
//! generator, seeded through the config for bit-identical reproducibility.
//!
//! # Example
//!
//! ```
//! use boxopt::pso::{PsoConfig, PsoRunner};
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let config = PsoConfig::new(30, 2, 100)
//!     .with_bounds(-5.0, 5.0)
//!     .with_seed(42);
//!
//! let result = PsoRunner::run(&sphere, &config).unwrap();
//! assert!(result.best_fitness < 1.0);
//! ```

pub mod domain;
pub mod error;
pub mod objective;
pub mod pso;
pub mod random;
pub mod sa;

pub use domain::Bounds;
pub use error::Error;
pub use objective::Objective;
