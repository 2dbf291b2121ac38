use crate::Nutrient;

/// Clamps a percent-by-mass value into `[0, 100]`.
///
/// Non-finite values read as 0, the same silent normalization applied
/// to every other piece of partially filled form data.
#[must_use]
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Declared nutrient concentrations for one ingredient, percent by mass.
///
/// Values are stored as entered and clamped into `[0, 100]` on read, so
/// an out-of-range declaration can never leak into the math.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    declared: [f64; Nutrient::COUNT],
}

impl Profile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, nutrient: Nutrient, pct: f64) {
        self.declared[nutrient.index()] = pct;
    }

    /// Declared concentration, clamped into `[0, 100]`.
    #[must_use]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        clamp_pct(self.declared[nutrient.index()])
    }

    /// Declared concentration as a mass fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self, nutrient: Nutrient) -> f64 {
        self.get(nutrient) / 100.0
    }

    /// True if no nutrient has a nonzero declared concentration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Nutrient::ALL.iter().all(|&n| self.get(n) == 0.0)
    }
}

/// A named substance with a declared nutrient profile.
///
/// Ingredients never carry an amount on input; the solver produces the
/// amounts. The name is opaque and only surfaces in advisory text.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub profile: Profile,
}

impl Ingredient {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile: Profile::new(),
        }
    }

    /// Builder-style helper for declaring one concentration.
    #[must_use]
    pub fn with(mut self, nutrient: Nutrient, pct: f64) -> Self {
        self.profile.set(nutrient, pct);
        self
    }
}
