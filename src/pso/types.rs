//! Swarm particle state.

use crate::domain::Bounds;
use rand::Rng;

/// One member of the swarm.
///
/// A particle carries its current position and velocity plus the best
/// position (and fitness) it has personally visited. All vectors have the
/// engine's configured dimensionality. Fitness fields start at infinity
/// and are filled in by the first evaluation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    /// Current position in the search domain.
    pub position: Vec<f64>,
    /// Current velocity.
    pub velocity: Vec<f64>,
    /// Best position this particle has visited.
    pub best_position: Vec<f64>,
    /// Fitness at the current position.
    pub fitness: f64,
    /// Fitness at `best_position`.
    pub best_fitness: f64,
}

impl Particle {
    /// Creates a particle with a uniform random position inside the domain
    /// and a uniform random velocity in `[-1, 1]` per dimension.
    ///
    /// The personal best starts at the initial position, unevaluated.
    pub fn init<R: Rng>(dimensions: usize, bounds: &Bounds, rng: &mut R) -> Self {
        let position = bounds.sample_vec(dimensions, rng);
        let velocity: Vec<f64> = (0..dimensions)
            .map(|_| rng.random_range(-1.0..1.0))
            .collect();
        Self {
            best_position: position.clone(),
            position,
            velocity,
            fitness: f64::INFINITY,
            best_fitness: f64::INFINITY,
        }
    }
}
