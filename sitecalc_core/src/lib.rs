//! # sitecalc_core - Concrete & Reinforcement Estimation Engine
//!
//! `sitecalc_core` computes concrete volumes, reinforcement quantities and
//! costs for reinforced concrete work. All inputs and outputs are
//! JSON-serializable so the same engine can sit behind a CLI, a form UI or
//! an automation script.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Quiet on incomplete input**: Zero or missing values withhold a
//!   result instead of producing errors or NaN
//! - **JSON-First**: All types implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use sitecalc_core::estimate::{quick_estimate, Member, RateConfig, SteelBarGroup};
//!
//! let footing = Member::new("F1", 1.5, 1.5, 0.45, 6)
//!     .with_bars(SteelBarGroup::new(8, 12.0));
//!
//! let result = quick_estimate(&footing, &RateConfig::default());
//! println!("{:.3} m³, ₹ {:.0}", result.concrete_volume_m3, result.total_cost);
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Primitive formulas (bar area, unit weight, cutting lengths)
//! - [`calculations`] - Bar-by-bar steel take-offs for beams, columns, slabs
//! - [`estimate`] - Member estimates, quick estimate, project totals
//! - [`materials`] - Nominal reinforcement bar sizes
//! - [`units`] - Type-safe metric unit wrappers
//! - [`input`] - Lenient parsing of typed form values
//! - [`project`] - Project container and settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod equations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod estimate;
pub mod input;
pub mod materials;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{ElementSteelResult, StructuralElement};
pub use errors::{CalcError, CalcResult};
pub use estimate::{project_totals, Member, ProjectTotals, RateConfig, SteelBarGroup, SteelWeightMethod};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_project, save_project, FileLock};
pub use project::{GlobalSettings, Project, ProjectMetadata};
