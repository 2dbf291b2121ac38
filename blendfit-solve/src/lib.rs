//! Nonnegative blend solving for Blendfit.
//!
//! Given a set of ingredients with declared nutrient profiles, a set of
//! target percentages, and a requested total mass, this crate finds the
//! nonnegative per-ingredient amounts that best match the targets,
//! measures how close the result is, and explains what ingredient
//! change would tighten an imperfect fit.
//!
//! The pipeline is a pure function of its inputs and runs in four
//! stages, each feeding the next with an immutable value:
//!
//! 1. [`Problem`] — validated input and constraint assembly.
//! 2. [`gradient`] — the projected-gradient solver.
//! 3. [`Diagnostics`] — achieved percentages, misses, and fit tier.
//! 4. [`suggest`] — advisory text for imperfect fits.
//!
//! [`solve`] runs the first three; suggestions are generated on demand
//! and never fed back into the solver.

mod diagnostics;
mod error;
pub mod gradient;
mod mix;
mod problem;
mod suggest;

pub use diagnostics::{Diagnostics, Fit, GOOD_MAE, OK_MAE};
pub use error::SolveError;
pub use gradient::{Config, Solution, Status};
pub use mix::Mix;
pub use problem::Problem;
pub use suggest::{NEAR_BAND, TRACE_GRAMS, WEAK_SOURCE_PCT, suggest};

/// A solved blend together with its measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub solution: Solution,
    pub diagnostics: Diagnostics,
}

/// Runs the pipeline with the default solver configuration.
///
/// Suggestions are not generated here; call [`suggest`] on the report
/// when the fit warrants it.
///
/// # Errors
///
/// Short-circuits with a [`SolveError`] if the problem has no relevant
/// ingredients or the solve collapses to zero mass. Diagnostics never
/// run on a failed solve.
pub fn solve(problem: &Problem) -> Result<Report, SolveError> {
    solve_with(problem, &Config::default())
}

/// Runs the pipeline with an explicit solver configuration.
///
/// # Errors
///
/// Same as [`solve`], plus [`SolveError::InvalidConfig`] if the config
/// fails validation.
pub fn solve_with(problem: &Problem, config: &Config) -> Result<Report, SolveError> {
    let solution = gradient::solve(problem, config)?;
    let diagnostics = Diagnostics::evaluate(problem, &solution);
    Ok(Report {
        solution,
        diagnostics,
    })
}
