/// Indicates whether the solver met the step tolerance or hit the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The largest coordinate change fell below the configured
    /// tolerance.
    Converged,
    /// Reached the iteration cap; the final iterate is still returned.
    MaxIters,
}

/// The solved blend.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Nonnegative grams per ingredient, in input order. Ingredients
    /// that touch no constrained nutrient are exactly 0.
    pub amounts: Vec<f64>,
    /// Final solver status.
    pub status: Status,
    /// Iteration count when the solver finished.
    pub iters: usize,
}

impl Solution {
    /// Total solved mass in grams, the sum of all amounts.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.amounts.iter().sum()
    }
}
