//! The objective seam between caller and engines.

/// A scalar cost function over `R^D`, opaque to the engines.
///
/// The engines minimize the objective: lower values are better. For
/// maximization, negate the cost. Any closure `Fn(&[f64]) -> f64` that is
/// `Send + Sync` implements this trait, so stateful objectives, wrappers
/// around external evaluators, and plain functions all plug in without
/// touching engine code.
///
/// # Thread Safety
///
/// `Objective` must be `Send + Sync` because the PSO runner may evaluate
/// the swarm in parallel using rayon.
///
/// # Failure
///
/// Evaluation is assumed idempotent and side-effect-free. An objective
/// signals failure by returning a non-finite value (`NaN` or infinity);
/// the engines treat that as fatal and abort the run.
///
/// # Examples
///
/// ```
/// use boxopt::objective::Objective;
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// assert_eq!(sphere.evaluate(&[3.0, 4.0]), 25.0);
/// ```
pub trait Objective: Send + Sync {
    /// Evaluates the objective at `x`. Lower is better.
    fn evaluate(&self, x: &[f64]) -> f64;

    /// Called at the end of each engine iteration with the best fitness
    /// found so far.
    ///
    /// Useful for logging or progress reporting. The default implementation
    /// is a no-op.
    fn on_iteration(&self, _iteration: usize, _best_fitness: f64) {}
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_objective() {
        let offset = 1.5;
        let shifted = move |x: &[f64]| x[0] + offset;
        assert_eq!(shifted.evaluate(&[2.0]), 3.5);
    }

    struct CountingObjective {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl Objective for CountingObjective {
        fn evaluate(&self, x: &[f64]) -> f64 {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            x.iter().sum()
        }
    }

    #[test]
    fn test_stateful_objective() {
        let objective = CountingObjective {
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        objective.evaluate(&[1.0, 2.0]);
        objective.evaluate(&[3.0]);
        assert_eq!(objective.calls.load(std::sync::atomic::Ordering::Relaxed), 2);
    }
}
