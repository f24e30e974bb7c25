//! # Slab Steel Take-off
//!
//! Reinforcement weight of a one-way slab panel: main bars spanning the
//! width and distribution bars spanning the length, each on a spacing.
//!
//! ```text
//!        ←──────── L ────────→
//!     ┌──┬──┬──┬──┬──┬──┬──┬──┐  ↑
//!     │  │  │  │  │  │  │  │  │  W    main bars run across W,
//!     ├──┼──┼──┼──┼──┼──┼──┼──┤  │    spaced along L
//!     │  │  │  │  │  │  │  │  │  ↓
//!     └──┴──┴──┴──┴──┴──┴──┴──┘
//! ```
//!
//! Bars are straight between covers. Thickness is recorded for the
//! schedule only; it does not enter the take-off.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{require_positive, BarSchedule};
use crate::equations::reinforcement::{clear_bar_length, spacing_count};
use crate::errors::{CalcError, CalcResult};

/// Typical clear cover for slabs (IS 456), mm
pub const DEFAULT_SLAB_COVER_MM: f64 = 20.0;

fn default_cover_mm() -> f64 {
    DEFAULT_SLAB_COVER_MM
}

/// Input parameters for a slab take-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabInput {
    /// User label for this slab panel (e.g., "S-1")
    #[serde(default)]
    pub label: String,

    /// Panel length in meters (main bars are spaced along it)
    pub length_m: f64,

    /// Panel width in meters (main bars run across it)
    pub width_m: f64,

    /// Slab thickness in mm
    #[serde(default)]
    pub thickness_mm: f64,

    /// Clear cover in mm
    #[serde(default = "default_cover_mm")]
    pub cover_mm: f64,

    /// Main bar diameter in mm
    pub main_bar_dia_mm: f64,

    /// Main bar spacing in mm
    pub main_bar_spacing_mm: f64,

    /// Distribution bar diameter in mm
    pub dist_bar_dia_mm: f64,

    /// Distribution bar spacing in mm
    pub dist_bar_spacing_mm: f64,
}

impl Default for SlabInput {
    fn default() -> Self {
        SlabInput {
            label: String::new(),
            length_m: 0.0,
            width_m: 0.0,
            thickness_mm: 0.0,
            cover_mm: DEFAULT_SLAB_COVER_MM,
            main_bar_dia_mm: 0.0,
            main_bar_spacing_mm: 0.0,
            dist_bar_dia_mm: 0.0,
            dist_bar_spacing_mm: 0.0,
        }
    }
}

impl SlabInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_m", self.length_m)?;
        require_positive("width_m", self.width_m)?;
        require_positive("cover_mm", self.cover_mm)?;
        require_positive("main_bar_dia_mm", self.main_bar_dia_mm)?;
        require_positive("main_bar_spacing_mm", self.main_bar_spacing_mm)?;
        require_positive("dist_bar_dia_mm", self.dist_bar_dia_mm)?;
        require_positive("dist_bar_spacing_mm", self.dist_bar_spacing_mm)?;
        if self.thickness_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "thickness_mm",
                self.thickness_mm.to_string(),
                "Thickness cannot be negative",
            ));
        }
        for (field, span) in [("width_m", self.width_m), ("length_m", self.length_m)] {
            if clear_bar_length(span, self.cover_mm) <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    span.to_string(),
                    "Panel is smaller than its covers",
                ));
            }
        }
        Ok(())
    }
}

/// Results from a slab take-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabSteelResult {
    /// Main (span-direction) bars
    pub main_bars: BarSchedule,

    /// Distribution bars
    pub distribution_bars: BarSchedule,

    /// Sum of both bar sets (kg)
    pub total_weight_kg: f64,
}

/// Calculate slab reinforcement weight.
///
/// Returns `None` while the input is incomplete.
pub fn calculate(input: &SlabInput) -> Option<SlabSteelResult> {
    if let Err(reason) = input.validate() {
        debug!(label = %input.label, %reason, "slab take-off withheld");
        return None;
    }

    let main_bars = BarSchedule::new(
        format!("Main Bars ({} mm)", input.main_bar_dia_mm),
        input.main_bar_dia_mm,
        clear_bar_length(input.width_m, input.cover_mm),
        spacing_count(input.length_m, input.main_bar_spacing_mm),
    );

    let distribution_bars = BarSchedule::new(
        format!("Distribution Bars ({} mm)", input.dist_bar_dia_mm),
        input.dist_bar_dia_mm,
        clear_bar_length(input.length_m, input.cover_mm),
        spacing_count(input.width_m, input.dist_bar_spacing_mm),
    );

    let total_weight_kg = main_bars.weight_kg + distribution_bars.weight_kg;

    Some(SlabSteelResult {
        main_bars,
        distribution_bars,
        total_weight_kg,
    })
}
