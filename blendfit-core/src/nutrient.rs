use std::fmt;

use serde::{Deserialize, Serialize};

/// A nutrient tracked by the blender, declared as percent by mass.
///
/// The set is fixed: eight core macronutrients followed by seven
/// extended micronutrients. Declaration order is the canonical order
/// for every iteration in the system, which keeps constraint-matrix
/// rows and tie-breaking deterministic across solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    N,
    P2O5,
    K2O,
    Ca,
    Mg,
    S,
    Fe,
    Si,
    Mn,
    Zn,
    Cu,
    B,
    Mo,
    Cl,
    Ni,
}

impl Nutrient {
    /// Number of tracked nutrients.
    pub const COUNT: usize = 15;

    /// Every nutrient, in canonical order.
    pub const ALL: [Nutrient; Nutrient::COUNT] = [
        Nutrient::N,
        Nutrient::P2O5,
        Nutrient::K2O,
        Nutrient::Ca,
        Nutrient::Mg,
        Nutrient::S,
        Nutrient::Fe,
        Nutrient::Si,
        Nutrient::Mn,
        Nutrient::Zn,
        Nutrient::Cu,
        Nutrient::B,
        Nutrient::Mo,
        Nutrient::Cl,
        Nutrient::Ni,
    ];

    /// The core macronutrients shown by default.
    pub const CORE: [Nutrient; 8] = [
        Nutrient::N,
        Nutrient::P2O5,
        Nutrient::K2O,
        Nutrient::Ca,
        Nutrient::Mg,
        Nutrient::S,
        Nutrient::Fe,
        Nutrient::Si,
    ];

    /// The extended micronutrient set.
    pub const MICRO: [Nutrient; 7] = [
        Nutrient::Mn,
        Nutrient::Zn,
        Nutrient::Cu,
        Nutrient::B,
        Nutrient::Mo,
        Nutrient::Cl,
        Nutrient::Ni,
    ];

    /// Position in the canonical order, for dense per-nutrient arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The chemical symbol used in form fields and advisory text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Nutrient::N => "N",
            Nutrient::P2O5 => "P2O5",
            Nutrient::K2O => "K2O",
            Nutrient::Ca => "Ca",
            Nutrient::Mg => "Mg",
            Nutrient::S => "S",
            Nutrient::Fe => "Fe",
            Nutrient::Si => "Si",
            Nutrient::Mn => "Mn",
            Nutrient::Zn => "Zn",
            Nutrient::Cu => "Cu",
            Nutrient::B => "B",
            Nutrient::Mo => "Mo",
            Nutrient::Cl => "Cl",
            Nutrient::Ni => "Ni",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
