//! Particle Swarm Optimization (PSO).
//!
//! A population-based stochastic search. Each particle carries a position,
//! a velocity, and the best position it has personally visited; the swarm
//! shares one global-best record. Velocities blend prior momentum with
//! attraction toward the personal and global bests, with inertia decaying
//! linearly over the run.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"
//!   (linearly decreasing inertia weight)

mod config;
pub(crate) mod runner;
mod types;

pub use config::PsoConfig;
pub use runner::{PsoResult, PsoRunner};
pub use types::Particle;
