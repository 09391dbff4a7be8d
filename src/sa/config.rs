//! SA configuration and cooling schedules.

use crate::domain::Bounds;

/// Cooling schedule for temperature reduction.
///
/// Each schedule is a pure function of the iteration index (temperatures
/// are recomputed, never compounded), and whatever it produces is floored
/// at the configured final temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Linear interpolation: `T_k = T0·(1 − k/K) + Tf·(k/K)`.
    Linear,

    /// Exponential (geometric) cooling: `T_k = T0 · rate^k`.
    ///
    /// The most widely used schedule, and the default.
    #[default]
    Exponential,

    /// Logarithmic cooling: `T_k = T0 / ln(2 + k)`.
    ///
    /// Cools very slowly; useful when the landscape is rugged.
    Logarithmic,
}

impl CoolingSchedule {
    /// Parses a schedule name: `"linear"`, `"exponential"`, or
    /// `"logarithmic"`.
    ///
    /// Any other name is a recoverable configuration error: a warning is
    /// logged and the default `Exponential` is returned, so the run
    /// proceeds.
    pub fn parse(name: &str) -> Self {
        match name {
            "linear" => CoolingSchedule::Linear,
            "exponential" => CoolingSchedule::Exponential,
            "logarithmic" => CoolingSchedule::Logarithmic,
            other => {
                log::warn!("unknown cooling schedule {other:?}, using \"exponential\"");
                CoolingSchedule::Exponential
            }
        }
    }
}

/// Configuration for the Simulated Annealing engine.
///
/// Dimensionality, the temperature endpoints, and the iteration budget are
/// required; everything else has the conventional defaults.
///
/// # Examples
///
/// ```
/// use boxopt::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::new(2, 100.0, 0.001, 1000)
///     .with_bounds(-5.0, 5.0)
///     .with_cooling(CoolingSchedule::Exponential)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Dimensionality of the search space.
    pub dimensions: usize,

    /// Temperature at the start of the run.
    pub initial_temperature: f64,

    /// Floor for the temperature; no schedule drops below it.
    pub final_temperature: f64,

    /// Number of iterations to execute. The run always uses the full
    /// budget; there is no convergence-based early exit.
    pub max_iterations: usize,

    /// Decay base for the exponential schedule.
    pub cooling_rate: f64,

    /// Search domain, applied per dimension.
    pub bounds: Bounds,

    /// Initial neighbor perturbation radius. Adapts during the run based
    /// on the acceptance rate.
    pub step_size: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl SaConfig {
    /// Creates a configuration with the required parameters.
    pub fn new(
        dimensions: usize,
        initial_temperature: f64,
        final_temperature: f64,
        max_iterations: usize,
    ) -> Self {
        Self {
            dimensions,
            initial_temperature,
            final_temperature,
            max_iterations,
            cooling_rate: 0.95,
            bounds: Bounds::default(),
            step_size: 1.0,
            cooling: CoolingSchedule::default(),
            seed: None,
        }
    }

    /// Sets the exponential decay base.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the domain box.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Bounds::new(min, max);
        self
    }

    /// Sets the initial perturbation radius.
    pub fn with_step_size(mut self, step: f64) -> Self {
        self.step_size = step;
        self
    }

    /// Sets the cooling schedule.
    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    /// Sets the cooling schedule by name.
    ///
    /// Unrecognized names fall back to `"exponential"` with a warning; see
    /// [`CoolingSchedule::parse`].
    pub fn with_cooling_schedule(self, name: &str) -> Self {
        self.with_cooling(CoolingSchedule::parse(name))
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    /// Temperatures are deliberately not validated: a temperature at or
    /// below zero simply disables probabilistic acceptance at run time.
    pub fn validate(&self) -> Result<(), String> {
        if self.dimensions < 1 {
            return Err("dimensions must be at least 1".into());
        }
        if self.max_iterations < 1 {
            return Err("max_iterations must be at least 1".into());
        }
        self.bounds.validate()
    }
}
