/// Weight of the soft total-mass penalty.
///
/// Always active: the requested total is an objective term, never a
/// hard constraint, which is what makes under- and over-determined
/// target sets solvable. The weight is fixed regardless of problem
/// scale (grams vs. kilograms); the original behavior is preserved
/// rather than rescaled, since no intended scaling is specified.
pub const MASS_WEIGHT: f64 = 1.0;

/// Ridge coefficient applied when the caller requests regularization.
///
/// Small enough to leave the fit unchanged in practice; improves
/// conditioning when ingredients have near-identical profiles.
pub const RIDGE_WEIGHT: f64 = 1e-6;

/// Step size used when the normal-matrix diagonal is degenerate.
pub const FALLBACK_STEP: f64 = 1e-3;

/// Configuration for the projected-gradient solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Hard iteration cap; the loop never runs longer than this.
    pub max_iters: usize,
    /// Early exit once the largest coordinate change in one iteration
    /// falls below this threshold.
    pub step_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 4000,
            step_tol: 1e-7,
        }
    }
}

impl Config {
    /// Validates the solver knobs.
    ///
    /// # Errors
    ///
    /// Returns an error if `step_tol` is negative or non-finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.step_tol.is_finite() || self.step_tol < 0.0 {
            return Err("step_tol must be finite and non-negative");
        }
        Ok(())
    }
}
