use blendfit_core::{BlendRequest, Ingredient, Nutrient, TargetSet};

use crate::SolveError;

/// A validated blend problem: what to mix, what to hit, and how much to
/// make.
///
/// Construction enforces the invariants the rest of the pipeline relies
/// on: positive total mass, at least one constrained nutrient, at least
/// one ingredient. The value is immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    ingredients: Vec<Ingredient>,
    targets: TargetSet,
    total_mass: f64,
    regularize: bool,
}

impl Problem {
    /// Validates and builds a problem. `total_mass` is in grams.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidMass`] if the mass is not a finite
    /// positive number, [`SolveError::NoTargets`] if no nutrient is
    /// constrained, and [`SolveError::NoIngredients`] if the ingredient
    /// list is empty.
    pub fn new(
        ingredients: Vec<Ingredient>,
        targets: TargetSet,
        total_mass: f64,
        regularize: bool,
    ) -> Result<Self, SolveError> {
        if !total_mass.is_finite() || total_mass <= 0.0 {
            return Err(SolveError::InvalidMass { got: total_mass });
        }
        if targets.is_empty() {
            return Err(SolveError::NoTargets);
        }
        if ingredients.is_empty() {
            return Err(SolveError::NoIngredients);
        }
        Ok(Self {
            ingredients,
            targets,
            total_mass,
            regularize,
        })
    }

    /// Builds a problem from the raw form-shaped request, applying the
    /// lenient string parsing and unit conversion first.
    ///
    /// # Errors
    ///
    /// Same as [`Problem::new`]; an unparsable total mass field reports
    /// as [`SolveError::InvalidMass`].
    pub fn from_request(request: &BlendRequest) -> Result<Self, SolveError> {
        let total_mass = request.total_grams().unwrap_or(f64::NAN);
        Self::new(
            request.ingredients(),
            request.targets(),
            total_mass,
            request.regularize,
        )
    }

    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    #[must_use]
    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Requested total mass in grams.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    #[must_use]
    pub fn regularize(&self) -> bool {
        self.regularize
    }

    /// Assembles the dense constraint system over the active-ingredient
    /// subset.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NoRelevantIngredients`] if no ingredient
    /// touches any constrained nutrient.
    pub(crate) fn assemble(&self) -> Result<System, SolveError> {
        let constrained: Vec<(Nutrient, f64)> = self.targets.constrained().collect();

        let active: Vec<usize> = (0..self.ingredients.len())
            .filter(|&i| {
                // Blank rows are common in saved sessions; skip them
                // before scanning the constrained nutrients.
                let profile = &self.ingredients[i].profile;
                !profile.is_empty() && constrained.iter().any(|&(n, _)| profile.get(n) > 0.0)
            })
            .collect();
        if active.is_empty() {
            return Err(SolveError::NoRelevantIngredients);
        }

        let a: Vec<Vec<f64>> = constrained
            .iter()
            .map(|&(n, _)| {
                active
                    .iter()
                    .map(|&i| self.ingredients[i].profile.fraction(n))
                    .collect()
            })
            .collect();
        let b: Vec<f64> = constrained
            .iter()
            .map(|&(_, target)| target / 100.0 * self.total_mass)
            .collect();

        Ok(System { active, a, b })
    }
}

/// The dense constraint system for the active-ingredient subset.
///
/// Rows follow the constrained nutrients in canonical nutrient order;
/// columns follow the active ingredients in input order. Ingredients
/// outside `active` are mathematically inert for the current targets
/// and stay at amount 0.
#[derive(Debug, Clone)]
pub(crate) struct System {
    /// Indices into the problem's ingredient list, in input order.
    pub active: Vec<usize>,
    /// `a[row][col]` is the mass fraction of `nutrient(row)` in
    /// `active[col]`.
    pub a: Vec<Vec<f64>>,
    /// Grams of each constrained nutrient the target asks for.
    pub b: Vec<f64>,
}
