use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Ingredient, MassUnit, Nutrient, TargetSet, clamp_pct};

/// Parses a form field as a number, treating blank or unparsable text
/// as absent.
///
/// This is how "don't care" targets are expressed: the distinction
/// between an empty field and an explicit `0` is preserved all the way
/// into [`TargetSet`].
#[must_use]
pub fn parse_target(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a concentration field; blank or unparsable text reads as 0.
fn parse_pct(text: &str) -> f64 {
    clamp_pct(parse_target(text).unwrap_or(0.0))
}

/// One ingredient row exactly as the form supplies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestRow {
    #[serde(default)]
    pub name: String,
    /// Percent strings per nutrient; blank or unparsable entries read
    /// as 0.
    #[serde(default)]
    pub analysis: BTreeMap<Nutrient, String>,
}

impl RequestRow {
    /// Converts the row into an ingredient.
    ///
    /// A blank name falls back to a positional label so advisory text
    /// can always point at something.
    #[must_use]
    pub fn to_ingredient(&self, index: usize) -> Ingredient {
        let name = self.name.trim();
        let mut ingredient = if name.is_empty() {
            Ingredient::new(format!("Fertilizer {}", index + 1))
        } else {
            Ingredient::new(name)
        };
        for (&nutrient, text) in &self.analysis {
            ingredient.profile.set(nutrient, parse_pct(text));
        }
        ingredient
    }
}

fn default_regularize() -> bool {
    true
}

/// The raw solver request, shaped exactly like the data the surrounding
/// UI collects and persists verbatim across sessions.
///
/// String-typed numeric fields are expected to be partial or in
/// progress; they are normalized leniently here and never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendRequest {
    #[serde(default)]
    pub rows: Vec<RequestRow>,
    /// Target percent strings; blank or unparsable entries are
    /// unconstrained.
    #[serde(default)]
    pub target: BTreeMap<Nutrient, String>,
    /// Total blend mass as entered.
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub total_unit: MassUnit,
    #[serde(default = "default_regularize")]
    pub regularize: bool,
}

impl Default for BlendRequest {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            target: BTreeMap::new(),
            total: String::new(),
            total_unit: MassUnit::default(),
            regularize: default_regularize(),
        }
    }
}

impl BlendRequest {
    /// Parses every row into an ingredient, in input order.
    #[must_use]
    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| row.to_ingredient(i))
            .collect()
    }

    /// Parses the target fields; blank and unparsable entries stay
    /// unconstrained.
    #[must_use]
    pub fn targets(&self) -> TargetSet {
        let mut targets = TargetSet::new();
        for (&nutrient, text) in &self.target {
            if let Some(pct) = parse_target(text) {
                targets.set(nutrient, pct);
            }
        }
        targets
    }

    /// The requested total mass converted to grams, if the field parses.
    #[must_use]
    pub fn total_grams(&self) -> Option<f64> {
        parse_target(&self.total).map(|amount| self.total_unit.to_grams(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn blank_target_is_unconstrained_not_zero() {
        let mut request = BlendRequest::default();
        request.target.insert(Nutrient::N, "3".into());
        request.target.insert(Nutrient::P2O5, "".into());
        request.target.insert(Nutrient::K2O, "0".into());
        request.target.insert(Nutrient::Ca, "n/a".into());

        let targets = request.targets();
        assert_eq!(targets.get(Nutrient::N), Some(3.0));
        assert_eq!(targets.get(Nutrient::P2O5), None);
        assert_eq!(targets.get(Nutrient::K2O), Some(0.0));
        assert_eq!(targets.get(Nutrient::Ca), None);
    }

    #[test]
    fn unparsable_analysis_reads_as_zero() {
        let mut row = RequestRow {
            name: "  Urea ".into(),
            ..RequestRow::default()
        };
        row.analysis.insert(Nutrient::N, "46".into());
        row.analysis.insert(Nutrient::P2O5, "oops".into());
        row.analysis.insert(Nutrient::K2O, "".into());

        let ingredient = row.to_ingredient(0);
        assert_eq!(ingredient.name, "Urea");
        assert_eq!(ingredient.profile.get(Nutrient::N), 46.0);
        assert_eq!(ingredient.profile.get(Nutrient::P2O5), 0.0);
        assert_eq!(ingredient.profile.get(Nutrient::K2O), 0.0);
    }

    #[test]
    fn blank_name_gets_positional_label() {
        let row = RequestRow::default();
        assert_eq!(row.to_ingredient(1).name, "Fertilizer 2");
    }

    #[test]
    fn total_converts_through_the_selected_unit() {
        let request = BlendRequest {
            total: "1.5".into(),
            total_unit: MassUnit::Kilogram,
            ..BlendRequest::default()
        };
        assert_relative_eq!(request.total_grams().unwrap(), 1500.0, epsilon = 1e-9);

        let blank = BlendRequest::default();
        assert_eq!(blank.total_grams(), None);
    }

    #[test]
    fn round_trips_through_json() {
        let mut request = BlendRequest {
            total: "1000".into(),
            total_unit: MassUnit::Gram,
            regularize: true,
            ..BlendRequest::default()
        };
        let mut row = RequestRow {
            name: "MKP".into(),
            ..RequestRow::default()
        };
        row.analysis.insert(Nutrient::P2O5, "52".into());
        row.analysis.insert(Nutrient::K2O, "34".into());
        request.rows.push(row);
        request.target.insert(Nutrient::P2O5, "5".into());

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"totalUnit\":\"g\""));
        assert!(json.contains("\"P2O5\":\"52\""));

        let back: BlendRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let request: BlendRequest = serde_json::from_str("{}").unwrap();
        assert!(request.rows.is_empty());
        assert!(request.targets().is_empty());
        assert_eq!(request.total_unit, MassUnit::Gram);
        assert!(request.regularize);
    }
}
