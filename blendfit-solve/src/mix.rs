use blendfit_core::{Ingredient, MassUnit, Nutrient};

/// A hand-specified blend: ingredients with explicit amounts.
///
/// This is the forward problem, with no solving involved: given what
/// was actually weighed out, report the total mass, the grams of each
/// nutrient, and the resulting percentages. Useful for checking a
/// finished or hand-tuned blend against its recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mix {
    entries: Vec<(Ingredient, f64)>,
}

impl Mix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an ingredient with its weighed amount.
    ///
    /// Negative or non-finite amounts read as 0, the same lenient
    /// normalization applied to all user-entered numbers.
    pub fn add(&mut self, ingredient: Ingredient, amount: f64, unit: MassUnit) {
        let grams = unit.to_grams(amount);
        let grams = if grams.is_finite() { grams.max(0.0) } else { 0.0 };
        self.entries.push((ingredient, grams));
    }

    /// Total mass in grams.
    #[must_use]
    pub fn total_grams(&self) -> f64 {
        self.entries.iter().map(|&(_, grams)| grams).sum()
    }

    /// Grams of one nutrient delivered by the whole mix.
    #[must_use]
    pub fn nutrient_grams(&self, nutrient: Nutrient) -> f64 {
        self.entries
            .iter()
            .map(|(ingredient, grams)| grams * ingredient.profile.fraction(nutrient))
            .sum()
    }

    /// Achieved percent by mass; 0 when the mix has no mass.
    #[must_use]
    pub fn achieved_pct(&self, nutrient: Nutrient) -> f64 {
        let total = self.total_grams();
        if total > 0.0 {
            self.nutrient_grams(nutrient) / total * 100.0
        } else {
            0.0
        }
    }
}
