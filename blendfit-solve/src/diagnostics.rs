use blendfit_core::Nutrient;

use crate::{Problem, gradient::Solution};

/// A fit whose mean absolute error is at or below this many percentage
/// points classifies as [`Fit::Good`].
pub const GOOD_MAE: f64 = 0.25;

/// A fit whose mean absolute error is at or below this many percentage
/// points (but above [`GOOD_MAE`]) classifies as [`Fit::Ok`].
pub const OK_MAE: f64 = 1.0;

/// Discrete fit quality, classified from the mean absolute error in
/// percentage points across constrained nutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Mean miss within [`GOOD_MAE`] points.
    Good,
    /// Mean miss within [`OK_MAE`] points; worth tightening.
    Ok,
    /// Mean miss beyond [`OK_MAE`] points; likely not achievable with
    /// the current ingredient list.
    NotAchievable,
}

impl Fit {
    /// Classifies a mean absolute error. Boundaries are inclusive on
    /// the better tier; first match wins.
    #[must_use]
    pub fn classify(mae: f64) -> Self {
        if mae <= GOOD_MAE {
            Fit::Good
        } else if mae <= OK_MAE {
            Fit::Ok
        } else {
            Fit::NotAchievable
        }
    }
}

/// Everything measured about a solved blend.
///
/// Achieved percentages cover every tracked nutrient, not only the
/// constrained ones, so unintended side effects on uncontrolled
/// nutrients are visible. Error metrics cover constrained nutrients
/// only.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    /// Achieved percent by mass per nutrient, indexed by
    /// [`Nutrient::index`].
    pub achieved_pct: [f64; Nutrient::COUNT],
    /// Grams of each nutrient the blend delivers.
    pub nutrient_grams: [f64; Nutrient::COUNT],
    /// Total solved mass in grams.
    pub mass_achieved: f64,
    /// Signed miss in percentage points (achieved − target) per
    /// constrained nutrient, in canonical order.
    pub errors: Vec<(Nutrient, f64)>,
    /// Root-mean-square of the misses.
    pub rmse: f64,
    /// Mean absolute miss.
    pub mae: f64,
    /// Solved minus requested total mass, in grams.
    pub mass_error: f64,
    /// Classified fit quality.
    pub fit: Fit,
}

impl Diagnostics {
    /// Measures a solution against its problem.
    #[must_use]
    pub fn evaluate(problem: &Problem, solution: &Solution) -> Self {
        let mass_achieved = solution.mass();

        let mut nutrient_grams = [0.0; Nutrient::COUNT];
        for (ingredient, &amount) in problem.ingredients().iter().zip(&solution.amounts) {
            for &nutrient in &Nutrient::ALL {
                nutrient_grams[nutrient.index()] += amount * ingredient.profile.fraction(nutrient);
            }
        }

        let mut achieved_pct = [0.0; Nutrient::COUNT];
        if mass_achieved > 0.0 {
            for &nutrient in &Nutrient::ALL {
                achieved_pct[nutrient.index()] =
                    nutrient_grams[nutrient.index()] / mass_achieved * 100.0;
            }
        }

        let errors: Vec<(Nutrient, f64)> = problem
            .targets()
            .constrained()
            .map(|(nutrient, target)| (nutrient, achieved_pct[nutrient.index()] - target))
            .collect();

        let count = errors.len() as f64;
        let rmse = (errors.iter().map(|&(_, e)| e * e).sum::<f64>() / count).sqrt();
        let mae = errors.iter().map(|&(_, e)| e.abs()).sum::<f64>() / count;

        Self {
            achieved_pct,
            nutrient_grams,
            mass_achieved,
            errors,
            rmse,
            mae,
            mass_error: mass_achieved - problem.total_mass(),
            fit: Fit::classify(mae),
        }
    }

    /// Achieved percent by mass for one nutrient.
    #[must_use]
    pub fn achieved(&self, nutrient: Nutrient) -> f64 {
        self.achieved_pct[nutrient.index()]
    }

    /// Signed miss for one nutrient, if it was constrained.
    #[must_use]
    pub fn error(&self, nutrient: Nutrient) -> Option<f64> {
        self.errors
            .iter()
            .find(|&&(n, _)| n == nutrient)
            .map(|&(_, e)| e)
    }
}
