//! Projected gradient descent on the penalized normal equations.
//!
//! The solver minimizes
//!
//! ```text
//! ||A x - b||^2 + MASS_WEIGHT * (sum(x) - M)^2 + ridge * ||x||^2
//! ```
//!
//! subject to `x >= 0`, where `M` is the requested total mass. The mass
//! term is always active, which keeps the quadratic form positive
//! definite even when the nutrient system is rank deficient, so a
//! unique minimizer exists for every valid problem.

mod config;
mod solution;

pub use config::{Config, FALLBACK_STEP, MASS_WEIGHT, RIDGE_WEIGHT};
pub use solution::{Solution, Status};

use crate::{Problem, SolveError, problem::System};

/// Solves the blend problem with projected gradient descent.
///
/// The iteration count is hard-capped by `config.max_iters`, so the
/// worst-case cost is bounded regardless of input. Identical inputs
/// take an identical floating-point path and produce bit-identical
/// solutions.
///
/// # Errors
///
/// Returns an error if the config is invalid, the problem has no
/// relevant ingredients, or the solved mass is not strictly positive.
pub fn solve(problem: &Problem, config: &Config) -> Result<Solution, SolveError> {
    config
        .validate()
        .map_err(|reason| SolveError::InvalidConfig { reason })?;

    let system = problem.assemble()?;
    let count = system.active.len();
    let total = problem.total_mass();
    let ridge = if problem.regularize() { RIDGE_WEIGHT } else { 0.0 };

    let (ata, atb) = normal_system(&system, total, ridge);
    let step = step_size(&ata);

    // Uniform start: spread the requested mass over the active set.
    let mut x = vec![total / count as f64; count];
    let mut status = Status::MaxIters;
    let mut iters = config.max_iters;

    for iter in 1..=config.max_iters {
        let gradient: Vec<f64> = (0..count)
            .map(|i| {
                let row = &ata[i];
                let dot: f64 = row.iter().zip(&x).map(|(m, v)| m * v).sum();
                dot - atb[i]
            })
            .collect();

        let mut max_change = 0.0_f64;
        for (value, g) in x.iter_mut().zip(&gradient) {
            let next = (*value - step * g).max(0.0);
            max_change = max_change.max((next - *value).abs());
            *value = next;
        }

        if max_change < config.step_tol {
            status = Status::Converged;
            iters = iter;
            break;
        }
    }

    // Map back onto the full ingredient ordering; inert ingredients
    // stay at exactly 0.
    let mut amounts = vec![0.0; problem.ingredients().len()];
    for (col, &i) in system.active.iter().enumerate() {
        amounts[i] = x[col];
    }

    let mass: f64 = amounts.iter().sum();
    if !mass.is_finite() || mass <= 0.0 {
        return Err(SolveError::DegenerateSolution);
    }

    Ok(Solution {
        amounts,
        status,
        iters,
    })
}

/// The penalized objective the solver minimizes, evaluated at a full
/// amounts vector (one entry per ingredient, in input order).
///
/// Exposed so convergence behavior can be checked independently of the
/// descent loop.
#[must_use]
pub fn objective(problem: &Problem, amounts: &[f64]) -> f64 {
    let total = problem.total_mass();
    let mut value = 0.0;

    for (nutrient, target) in problem.targets().constrained() {
        let wanted = target / 100.0 * total;
        let delivered: f64 = problem
            .ingredients()
            .iter()
            .zip(amounts)
            .map(|(ingredient, &amount)| amount * ingredient.profile.fraction(nutrient))
            .sum();
        value += (delivered - wanted) * (delivered - wanted);
    }

    let mass: f64 = amounts.iter().sum();
    value += MASS_WEIGHT * (mass - total) * (mass - total);

    if problem.regularize() {
        value += RIDGE_WEIGHT * amounts.iter().map(|&a| a * a).sum::<f64>();
    }

    value
}

/// Expands the penalty terms into the normal-equation matrix and
/// right-hand side.
///
/// `ATA = AᵗA + MASS_WEIGHT·𝟙𝟙ᵗ + ridge·I` and
/// `ATb = Aᵗb + MASS_WEIGHT·M·𝟙`. The all-ones term is the algebraic
/// expansion of the squared mass penalty; it couples every pair of
/// variables.
fn normal_system(system: &System, total: f64, ridge: f64) -> (Vec<Vec<f64>>, Vec<f64>) {
    let count = system.active.len();
    let rows = system.a.len();

    let mut ata = vec![vec![0.0; count]; count];
    let mut atb = vec![0.0; count];

    for i in 0..count {
        for j in 0..count {
            let mut sum = 0.0;
            for r in 0..rows {
                sum += system.a[r][i] * system.a[r][j];
            }
            ata[i][j] = sum + MASS_WEIGHT;
        }
        ata[i][i] += ridge;

        let mut sum = 0.0;
        for r in 0..rows {
            sum += system.a[r][i] * system.b[r];
        }
        atb[i] = sum + MASS_WEIGHT * total;
    }

    (ata, atb)
}

/// Fixed step size `1 / (2 · max diagonal entry)`, which keeps plain
/// gradient descent stable for this positive-semidefinite quadratic.
fn step_size(ata: &[Vec<f64>]) -> f64 {
    let diag_max = ata
        .iter()
        .enumerate()
        .map(|(i, row)| row[i])
        .fold(0.0_f64, f64::max);
    if diag_max.is_finite() && diag_max > 0.0 {
        1.0 / (2.0 * diag_max)
    } else {
        FALLBACK_STEP
    }
}
