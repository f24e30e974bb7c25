//! # Quantity Surveying Equations
//!
//! The primitive formulas every estimator in this crate is built from.
//! Keeping them in one place makes them easy to check against the
//! detailing handbooks and keeps the calculators consistent.
//!
//! ## Modules
//!
//! - [`concrete`] - Concrete volumes
//! - [`reinforcement`] - Bar area, unit weight, cutting lengths, bar counts
//!
//! ## Three ways to weigh steel
//!
//! 1. Area × assumed bar length × density ([`steel_weight_from_area`])
//! 2. Percentage of concrete volume ([`steel_weight_from_percentage`])
//! 3. Cutting length × unit weight ([`unit_weight_per_meter`], used by the
//!    beam/column/slab take-offs)
//!
//! They are different approximations and give different answers for the
//! same element. A single result only ever uses one of them.

pub mod concrete;
pub mod reinforcement;

pub use concrete::member_concrete_volume;

pub use reinforcement::{
    beam_main_bar_cutting_length,
    clear_bar_length,
    link_cutting_length,
    spacing_count,
    steel_bar_area,
    steel_weight_from_area,
    steel_weight_from_percentage,
    unit_weight,
    unit_weight_per_meter,
    HOOK_ALLOWANCE,
    MAIN_BAR_BEND_ALLOWANCE,
    STEEL_DENSITY_KG_M3,
    UNIT_WEIGHT_DIVISOR,
};
