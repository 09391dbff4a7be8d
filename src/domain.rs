//! Bounded search domain.
//!
//! All search vectors live in the axis-aligned box `[min, max]^D`: the same
//! scalar pair applies to every dimension. The engines clamp every position
//! back into the box after each move (hard clamp to the boundary value, not
//! wrap-around).

use rand::Rng;

/// Axis-aligned box bounds applied identically to every dimension.
///
/// # Examples
///
/// ```
/// use boxopt::domain::Bounds;
///
/// let bounds = Bounds::new(-5.0, 5.0);
/// assert!(bounds.validate().is_ok());
/// assert_eq!(bounds.clamp(7.3), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
        }
    }
}

impl Bounds {
    /// Creates bounds from a scalar pair.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Validates the bounds.
    ///
    /// Requires `min < max` and both endpoints finite.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(format!(
                "bounds must be finite, got [{}, {}]",
                self.min, self.max
            ));
        }
        if self.min >= self.max {
            return Err(format!(
                "min_bound must be less than max_bound, got [{}, {}]",
                self.min, self.max
            ));
        }
        Ok(())
    }

    /// Clamps a scalar into the box.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamps every coordinate of a vector into the box, in place.
    pub fn clamp_vec(&self, vector: &mut [f64]) {
        for value in vector.iter_mut() {
            *value = value.clamp(self.min, self.max);
        }
    }

    /// Draws one coordinate uniformly from the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.min..self.max)
    }

    /// Draws a full `dimensions`-length vector uniformly from the box.
    pub fn sample_vec<R: Rng>(&self, dimensions: usize, rng: &mut R) -> Vec<f64> {
        (0..dimensions).map(|_| self.sample(rng)).collect()
    }

    /// Width of the box along each dimension.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
