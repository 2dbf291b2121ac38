use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Mass, Volume},
    mass::{gram, kilogram, ounce, pound},
    volume::{gallon, liter},
};

/// Units accepted for the total blend mass.
///
/// Serialized as the short labels the form uses (`"g"`, `"kg"`, `"oz"`,
/// `"lb"`), which is also what the UI persists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    #[default]
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
}

impl MassUnit {
    /// Converts an amount in this unit to grams, the canonical mass unit
    /// for all solver arithmetic.
    #[must_use]
    pub fn to_grams(self, amount: f64) -> f64 {
        let mass = match self {
            MassUnit::Gram => Mass::new::<gram>(amount),
            MassUnit::Kilogram => Mass::new::<kilogram>(amount),
            MassUnit::Ounce => Mass::new::<ounce>(amount),
            MassUnit::Pound => Mass::new::<pound>(amount),
        };
        mass.get::<gram>()
    }

    /// Converts grams back into this unit, for display.
    #[must_use]
    pub fn from_grams(self, grams: f64) -> f64 {
        let mass = Mass::new::<gram>(grams);
        match self {
            MassUnit::Gram => mass.get::<gram>(),
            MassUnit::Kilogram => mass.get::<kilogram>(),
            MassUnit::Ounce => mass.get::<ounce>(),
            MassUnit::Pound => mass.get::<pound>(),
        }
    }
}

/// Units accepted for a dissolved solution volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[default]
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "gal")]
    Gallon,
}

impl VolumeUnit {
    /// Converts an amount in this unit to liters.
    #[must_use]
    pub fn to_liters(self, amount: f64) -> f64 {
        let volume = match self {
            VolumeUnit::Liter => Volume::new::<liter>(amount),
            VolumeUnit::Gallon => Volume::new::<gallon>(amount),
        };
        volume.get::<liter>()
    }
}

/// Concentration of a dissolved nutrient in mg per liter (ppm).
///
/// Returns 0 when the volume is not a positive, finite number.
#[must_use]
pub fn ppm(nutrient_grams: f64, volume: f64, unit: VolumeUnit) -> f64 {
    let liters = unit.to_liters(volume);
    if liters.is_finite() && liters > 0.0 {
        nutrient_grams * 1000.0 / liters
    } else {
        0.0
    }
}
