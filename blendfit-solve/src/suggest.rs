use blendfit_core::{Ingredient, Nutrient};

use crate::{Diagnostics, Fit, Problem, gradient::Solution};

/// Half-width of the band around a target that counts as close enough,
/// in percentage points. Misses inside the band get no corrective
/// advice.
pub const NEAR_BAND: f64 = 0.15;

/// A strongest available source below this declared percent is flagged
/// as a structural bottleneck rather than a dosing problem.
pub const WEAK_SOURCE_PCT: f64 = 10.0;

/// Solved amounts at or below this many grams are treated as unused.
pub const TRACE_GRAMS: f64 = 1e-6;

/// How many missed nutrients get targeted advice.
const WORST_COUNT: usize = 3;

/// How many candidate ingredients each piece of advice names.
const TOP_SOURCES: usize = 2;

/// Builds ordered advisory text explaining why the fit is imperfect and
/// what ingredient change would improve it.
///
/// A good fit yields no suggestions at all. Otherwise the worst-missed
/// targets get concrete advice, followed by three fixed lines of
/// general guidance. The function is pure: same inputs, same lines.
#[must_use]
pub fn suggest(problem: &Problem, solution: &Solution, diagnostics: &Diagnostics) -> Vec<String> {
    if diagnostics.fit == Fit::Good {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for (nutrient, error) in worst_misses(diagnostics) {
        advise(&mut lines, problem, solution, nutrient, error);
    }

    lines.push(
        "Add a more concentrated single-purpose ingredient, especially for the biggest miss."
            .to_string(),
    );
    lines.push(
        "Leave targets blank for nutrients you do not care about; fewer constraints fit easier."
            .to_string(),
    );
    lines.push("Add more candidate ingredients; more options make the fit easier.".to_string());
    lines
}

/// The constrained nutrients with the largest absolute miss, at most
/// [`WORST_COUNT`] of them. The sort is stable, so equal misses keep
/// canonical nutrient order.
fn worst_misses(diagnostics: &Diagnostics) -> Vec<(Nutrient, f64)> {
    let mut misses = diagnostics.errors.clone();
    misses.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    misses.truncate(WORST_COUNT);
    misses
}

/// All ingredients ranked by declared concentration of `nutrient`,
/// descending. The sort is stable, so ties keep input order.
fn ranked_sources(problem: &Problem, nutrient: Nutrient) -> Vec<(&Ingredient, f64)> {
    let mut ranked: Vec<(&Ingredient, f64)> = problem
        .ingredients()
        .iter()
        .map(|ingredient| (ingredient, ingredient.profile.get(nutrient)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

fn name_with_pct(sources: &[(&Ingredient, f64)]) -> String {
    sources
        .iter()
        .map(|(ingredient, pct)| format!("{} {pct}%", ingredient.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn advise(
    lines: &mut Vec<String>,
    problem: &Problem,
    solution: &Solution,
    nutrient: Nutrient,
    error: f64,
) {
    let ranked = ranked_sources(problem, nutrient);
    let top: Vec<(&Ingredient, f64)> = ranked
        .into_iter()
        .filter(|&(_, pct)| pct > 0.0)
        .take(TOP_SOURCES)
        .collect();

    if top.is_empty() {
        lines.push(format!(
            "{nutrient}: none of the listed ingredients supply {nutrient}. \
             Add a {nutrient} source or remove this target."
        ));
        return;
    }

    if error < -NEAR_BAND {
        lines.push(format!(
            "{nutrient} is low by {:.2} points. Add or increase a stronger {nutrient} source \
             (best listed: {}).",
            error.abs(),
            name_with_pct(&top),
        ));
        if top[0].1 < WEAK_SOURCE_PCT {
            lines.push(format!(
                "{nutrient} bottleneck: the strongest {nutrient} source is only {}%, \
                 which can put a tight target out of reach.",
                top[0].1,
            ));
        }
    } else if error > NEAR_BAND {
        // Rank by grams of the nutrient each solved ingredient actually
        // delivers, not by declared strength.
        let mut contributors: Vec<(&Ingredient, f64, f64)> = problem
            .ingredients()
            .iter()
            .zip(&solution.amounts)
            .filter(|&(ingredient, &amount)| {
                amount > TRACE_GRAMS && ingredient.profile.get(nutrient) > 0.0
            })
            .map(|(ingredient, &amount)| {
                (ingredient, amount, amount * ingredient.profile.fraction(nutrient))
            })
            .collect();
        contributors.sort_by(|a, b| b.2.total_cmp(&a.2));
        contributors.truncate(TOP_SOURCES);

        if contributors.is_empty() {
            lines.push(format!(
                "{nutrient} is high by {error:.2} points. Reduce a {nutrient}-rich ingredient \
                 (best listed: {}).",
                name_with_pct(&top),
            ));
        } else {
            let cut = contributors
                .iter()
                .map(|(ingredient, amount, _)| format!("{} (~{amount:.1} g)", ingredient.name))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("{nutrient} is high by {error:.2} points. Reduce: {cut}."));
        }
    } else {
        lines.push(format!("{nutrient}: already close."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, gradient, gradient::Status};
    use blendfit_core::TargetSet;

    fn report(problem: &Problem) -> (Solution, Diagnostics) {
        let solution = gradient::solve(problem, &Config::default()).unwrap();
        let diagnostics = Diagnostics::evaluate(problem, &solution);
        (solution, diagnostics)
    }

    #[test]
    fn good_fit_produces_no_suggestions() {
        // A single 10% N ingredient hits a 10% N target exactly.
        let blend = Ingredient::new("Blend").with(Nutrient::N, 10.0);
        let mut targets = TargetSet::new();
        targets.set(Nutrient::N, 10.0);
        let problem = Problem::new(vec![blend], targets, 1000.0, true).unwrap();

        let (solution, diagnostics) = report(&problem);
        assert_eq!(diagnostics.fit, Fit::Good);
        assert!(suggest(&problem, &solution, &diagnostics).is_empty());
    }

    #[test]
    fn names_the_missing_source() {
        // Urea covers N; nothing covers Fe, but N keeps the problem
        // solvable, so the advisory path reports the gap.
        let urea = Ingredient::new("Urea").with(Nutrient::N, 46.0);
        let mut targets = TargetSet::new();
        targets.set(Nutrient::N, 5.0);
        targets.set(Nutrient::Fe, 1.0);
        let problem = Problem::new(vec![urea], targets, 1000.0, true).unwrap();

        let (solution, diagnostics) = report(&problem);
        let lines = suggest(&problem, &solution, &diagnostics);

        assert!(
            lines
                .iter()
                .any(|l| l.contains("none of the listed ingredients supply Fe"))
        );
    }

    #[test]
    fn flags_a_weak_source_as_a_bottleneck() {
        // The only N source is 5%, so a 10% N target is structurally
        // out of reach: achieved N can never exceed 5%.
        let weak = Ingredient::new("Compost").with(Nutrient::N, 5.0);
        let mut targets = TargetSet::new();
        targets.set(Nutrient::N, 10.0);
        let problem = Problem::new(vec![weak], targets, 1000.0, true).unwrap();

        let (solution, diagnostics) = report(&problem);
        assert!(diagnostics.error(Nutrient::N).unwrap() < -NEAR_BAND);

        let lines = suggest(&problem, &solution, &diagnostics);
        assert!(lines.iter().any(|l| l.contains("N is low by")));
        assert!(lines.iter().any(|l| l.contains("bottleneck")));
        assert!(lines.iter().any(|l| l.contains("Compost 5%")));
    }

    #[test]
    fn names_the_heaviest_contributor_when_over_target() {
        // 100% N against a 10% target: the mass penalty forces far more
        // N into the blend than the target wants.
        let pure = Ingredient::new("Pure N").with(Nutrient::N, 100.0);
        let mut targets = TargetSet::new();
        targets.set(Nutrient::N, 10.0);
        let problem = Problem::new(vec![pure], targets, 1000.0, true).unwrap();

        let (solution, diagnostics) = report(&problem);
        assert!(diagnostics.error(Nutrient::N).unwrap() > NEAR_BAND);

        let lines = suggest(&problem, &solution, &diagnostics);
        assert!(
            lines
                .iter()
                .any(|l| l.contains("N is high by") && l.contains("Reduce: Pure N (~"))
        );
    }

    #[test]
    fn always_ends_with_the_general_guidance() {
        let weak = Ingredient::new("Compost").with(Nutrient::N, 5.0);
        let mut targets = TargetSet::new();
        targets.set(Nutrient::N, 10.0);
        let problem = Problem::new(vec![weak], targets, 1000.0, true).unwrap();

        let (solution, diagnostics) = report(&problem);
        let lines = suggest(&problem, &solution, &diagnostics);

        let tail: Vec<&String> = lines.iter().rev().take(3).collect();
        assert!(tail[2].contains("more concentrated single-purpose ingredient"));
        assert!(tail[1].contains("Leave targets blank"));
        assert!(tail[0].contains("more candidate ingredients"));
    }

    #[test]
    fn over_target_without_a_contributor_names_the_best_source() {
        // The N surplus cannot be traced to a solved amount: the only N
        // source got zero grams, so the advice falls back to naming the
        // strongest declared source instead of something to reduce.
        let urea = Ingredient::new("Urea").with(Nutrient::N, 46.0);
        let mkp = Ingredient::new("MKP").with(Nutrient::P2O5, 52.0);
        let mut targets = TargetSet::new();
        targets.set(Nutrient::N, 1.0);
        let problem = Problem::new(vec![urea, mkp], targets, 100.0, true).unwrap();

        let solution = Solution {
            amounts: vec![0.0, 100.0],
            status: Status::Converged,
            iters: 1,
        };
        let diagnostics = Diagnostics {
            achieved_pct: [0.0; Nutrient::COUNT],
            nutrient_grams: [0.0; Nutrient::COUNT],
            mass_achieved: 100.0,
            errors: vec![(Nutrient::N, 2.0)],
            rmse: 2.0,
            mae: 2.0,
            mass_error: 0.0,
            fit: Fit::NotAchievable,
        };

        let lines = suggest(&problem, &solution, &diagnostics);
        assert!(lines.iter().any(|l| {
            l.contains("N is high by 2.00 points") && l.contains("best listed: Urea 46%")
        }));
    }

    #[test]
    fn near_band_miss_reads_as_already_close() {
        // The fit as a whole is only Ok, but this particular miss sits
        // inside the band, so no corrective advice is given for it.
        let urea = Ingredient::new("Urea").with(Nutrient::N, 46.0);
        let mut targets = TargetSet::new();
        targets.set(Nutrient::N, 10.0);
        let problem = Problem::new(vec![urea], targets, 100.0, true).unwrap();

        let solution = Solution {
            amounts: vec![100.0],
            status: Status::Converged,
            iters: 1,
        };
        let diagnostics = Diagnostics {
            achieved_pct: [0.0; Nutrient::COUNT],
            nutrient_grams: [0.0; Nutrient::COUNT],
            mass_achieved: 100.0,
            errors: vec![(Nutrient::N, 0.1)],
            rmse: 0.5,
            mae: 0.5,
            mass_error: 0.0,
            fit: Fit::Ok,
        };

        let lines = suggest(&problem, &solution, &diagnostics);
        assert!(lines.contains(&"N: already close.".to_string()));
    }

    #[test]
    fn worst_misses_break_ties_in_canonical_order() {
        let diagnostics = Diagnostics {
            achieved_pct: [0.0; Nutrient::COUNT],
            nutrient_grams: [0.0; Nutrient::COUNT],
            mass_achieved: 100.0,
            errors: vec![
                (Nutrient::N, 0.5),
                (Nutrient::P2O5, -2.0),
                (Nutrient::K2O, 2.0),
                (Nutrient::Ca, -0.5),
            ],
            rmse: 0.0,
            mae: 1.25,
            mass_error: 0.0,
            fit: Fit::NotAchievable,
        };

        let misses = worst_misses(&diagnostics);
        let order: Vec<Nutrient> = misses.iter().map(|&(n, _)| n).collect();
        // |P2O5| == |K2O|, so P2O5 keeps its earlier position; the 0.5s
        // tie too and N comes before Ca.
        assert_eq!(order, vec![Nutrient::P2O5, Nutrient::K2O, Nutrient::N]);
    }
}
