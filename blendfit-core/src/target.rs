use crate::Nutrient;

/// Per-nutrient target percentages for a solve.
///
/// A nutrient is constrained iff its target is a present, finite value.
/// An absent target means "don't care" and is a different thing from a
/// target of 0%: the former drops the nutrient from the objective, the
/// latter actively pushes it toward zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetSet {
    targets: [Option<f64>; Nutrient::COUNT],
}

impl TargetSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, nutrient: Nutrient, pct: f64) {
        self.targets[nutrient.index()] = Some(pct);
    }

    /// Removes the target, returning the nutrient to "don't care".
    pub fn clear(&mut self, nutrient: Nutrient) {
        self.targets[nutrient.index()] = None;
    }

    /// The target percentage, clamped into `[0, 100]`.
    ///
    /// A stored non-finite value reads as absent rather than as a
    /// constraint.
    #[must_use]
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        self.targets[nutrient.index()]
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(0.0, 100.0))
    }

    /// Constrained nutrients with their targets, in canonical order.
    pub fn constrained(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL
            .into_iter()
            .filter_map(move |n| self.get(n).map(|t| (n, t)))
    }

    /// True if no nutrient is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constrained().next().is_none()
    }
}
