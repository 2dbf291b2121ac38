use thiserror::Error;

/// Errors that can occur while building or solving a blend problem.
///
/// Every variant is terminal for the solve call: diagnostics and
/// suggestions never run on an invalid problem, and nothing is retried.
/// All are deterministic given the same input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Total mass was missing, non-numeric, zero, or negative.
    #[error("total blend mass must be a positive number of grams, got {got}")]
    InvalidMass { got: f64 },

    /// No nutrient has a present, finite target.
    #[error("no nutrient has a target set")]
    NoTargets,

    /// The ingredient list is empty.
    #[error("the ingredient list is empty")]
    NoIngredients,

    /// No ingredient has a nonzero concentration in any targeted
    /// nutrient.
    #[error("none of the listed ingredients contain a targeted nutrient")]
    NoRelevantIngredients,

    /// The solver converged to a numerically zero total mass.
    #[error("the solved blend collapsed to zero mass")]
    DegenerateSolution,

    /// The solver configuration failed validation.
    #[error("invalid solver config: {reason}")]
    InvalidConfig { reason: &'static str },
}
