//! Domain types for Blendfit, a nonnegative fertilizer blend solver.
//!
//! This crate defines the value types shared across the solver pipeline:
//! the fixed [`Nutrient`] set, clamped concentration [`Profile`]s,
//! [`Ingredient`]s, per-nutrient [`TargetSet`]s, mass and volume units,
//! and the raw form-shaped [`BlendRequest`] the surrounding UI supplies
//! and persists.
//!
//! Everything here is an immutable value passed between pipeline stages;
//! nothing holds shared state.

mod nutrient;
mod profile;
mod request;
mod target;
mod units;

pub use nutrient::Nutrient;
pub use profile::{Ingredient, Profile, clamp_pct};
pub use request::{BlendRequest, RequestRow, parse_target};
pub use target::TargetSet;
pub use units::{MassUnit, VolumeUnit, ppm};
