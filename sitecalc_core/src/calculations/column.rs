//! # Column Steel Take-off
//!
//! Reinforcement weight of a rectangular column: straight vertical main
//! bars and closed lateral ties.
//!
//! ## Assumptions
//!
//! - Main bars run the clear height with no bends, laps or starter bars
//! - Ties at a uniform spacing over the height, both ends included
//! - Tie cutting length uses the same perimeter + 10d hook rule as beam stirrups

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{require_core, require_count, require_positive, BarSchedule};
use crate::equations::reinforcement::{link_cutting_length, spacing_count};
use crate::errors::CalcResult;

/// Typical clear cover for columns (IS 456), mm
pub const DEFAULT_COLUMN_COVER_MM: f64 = 40.0;

fn default_cover_mm() -> f64 {
    DEFAULT_COLUMN_COVER_MM
}

/// Input parameters for a column take-off.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "height_m": 3.0,
///   "width_mm": 230.0,
///   "depth_mm": 300.0,
///   "cover_mm": 40.0,
///   "main_bar_dia_mm": 12.0,
///   "main_bar_count": 4,
///   "tie_dia_mm": 8.0,
///   "tie_spacing_mm": 150.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    /// User label for this column (e.g., "C-1", "Corner column")
    #[serde(default)]
    pub label: String,

    /// Column height in meters
    pub height_m: f64,

    /// Section width in mm
    pub width_mm: f64,

    /// Section depth in mm
    pub depth_mm: f64,

    /// Clear cover in mm
    #[serde(default = "default_cover_mm")]
    pub cover_mm: f64,

    /// Main bar diameter in mm
    pub main_bar_dia_mm: f64,

    /// Number of main bars
    pub main_bar_count: u32,

    /// Tie bar diameter in mm
    pub tie_dia_mm: f64,

    /// Tie center-to-center spacing in mm
    pub tie_spacing_mm: f64,
}

impl Default for ColumnInput {
    fn default() -> Self {
        ColumnInput {
            label: String::new(),
            height_m: 0.0,
            width_mm: 0.0,
            depth_mm: 0.0,
            cover_mm: DEFAULT_COLUMN_COVER_MM,
            main_bar_dia_mm: 0.0,
            main_bar_count: 0,
            tie_dia_mm: 0.0,
            tie_spacing_mm: 0.0,
        }
    }
}

impl ColumnInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("height_m", self.height_m)?;
        require_positive("width_mm", self.width_mm)?;
        require_positive("depth_mm", self.depth_mm)?;
        require_positive("cover_mm", self.cover_mm)?;
        require_positive("main_bar_dia_mm", self.main_bar_dia_mm)?;
        require_count("main_bar_count", self.main_bar_count)?;
        require_positive("tie_dia_mm", self.tie_dia_mm)?;
        require_positive("tie_spacing_mm", self.tie_spacing_mm)?;
        require_core("width_mm", self.width_mm, self.cover_mm)?;
        require_core("depth_mm", self.depth_mm, self.cover_mm)?;
        Ok(())
    }

    /// Cutting length of one tie (m)
    pub fn tie_cutting_length_m(&self) -> f64 {
        link_cutting_length(self.width_mm, self.depth_mm, self.cover_mm, self.tie_dia_mm)
    }

    /// Number of ties up the column
    pub fn tie_count(&self) -> f64 {
        spacing_count(self.height_m, self.tie_spacing_mm)
    }
}

/// Results from a column take-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSteelResult {
    /// Vertical bars
    pub main_bars: BarSchedule,

    /// Lateral ties
    pub ties: BarSchedule,

    /// Sum of both bar sets (kg)
    pub total_weight_kg: f64,
}

/// Calculate column reinforcement weight.
///
/// Returns `None` while the input is incomplete.
pub fn calculate(input: &ColumnInput) -> Option<ColumnSteelResult> {
    if let Err(reason) = input.validate() {
        debug!(label = %input.label, %reason, "column take-off withheld");
        return None;
    }

    // Straight bars: cutting length is the raw height
    let main_bars = BarSchedule::new(
        format!("Main Bars ({} mm)", input.main_bar_dia_mm),
        input.main_bar_dia_mm,
        input.height_m,
        input.main_bar_count as f64,
    );

    let ties = BarSchedule::new(
        format!("Lateral Ties ({} mm)", input.tie_dia_mm),
        input.tie_dia_mm,
        input.tie_cutting_length_m(),
        input.tie_count(),
    );

    let total_weight_kg = main_bars.weight_kg + ties.weight_kg;

    Some(ColumnSteelResult {
        main_bars,
        ties,
        total_weight_kg,
    })
}
