//! # Beam Steel Take-off
//!
//! Reinforcement weight of a rectangular beam: straight main bars with a
//! 9d bend allowance at each end, and closed stirrups with 135° hooks.
//!
//! ## Assumptions
//!
//! - One layer of identical main bars running the full beam length
//! - Stirrups at a uniform spacing over the whole length, both ends included
//! - Cover applies to the stirrup on every face
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::calculations::beam::{calculate, BeamInput};
//!
//! let input = BeamInput {
//!     label: "B-1".to_string(),
//!     length_m: 6.0,
//!     width_mm: 230.0,
//!     depth_mm: 450.0,
//!     cover_mm: 25.0,
//!     main_bar_dia_mm: 16.0,
//!     main_bar_count: 4,
//!     stirrup_dia_mm: 8.0,
//!     stirrup_spacing_mm: 200.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.main_bars.total_length_m - 24.952).abs() < 1e-6);
//! assert_eq!(result.stirrups.bar_count, 31.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{require_core, require_count, require_positive, BarSchedule};
use crate::equations::reinforcement::{
    beam_main_bar_cutting_length, link_cutting_length, spacing_count,
};
use crate::errors::{CalcError, CalcResult};

/// Typical clear cover for beams (IS 456), mm
pub const DEFAULT_BEAM_COVER_MM: f64 = 25.0;

fn default_cover_mm() -> f64 {
    DEFAULT_BEAM_COVER_MM
}

/// Input parameters for a beam take-off.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "length_m": 6.0,
///   "width_mm": 230.0,
///   "depth_mm": 450.0,
///   "cover_mm": 25.0,
///   "main_bar_dia_mm": 16.0,
///   "main_bar_count": 4,
///   "stirrup_dia_mm": 8.0,
///   "stirrup_spacing_mm": 200.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// User label for this beam (e.g., "B-1", "Plinth beam")
    #[serde(default)]
    pub label: String,

    /// Beam length in meters
    pub length_m: f64,

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

    /// Stirrup bar diameter in mm
    pub stirrup_dia_mm: f64,

    /// Stirrup center-to-center spacing in mm
    pub stirrup_spacing_mm: f64,
}

impl Default for BeamInput {
    fn default() -> Self {
        BeamInput {
            label: String::new(),
            length_m: 0.0,
            width_mm: 0.0,
            depth_mm: 0.0,
            cover_mm: DEFAULT_BEAM_COVER_MM,
            main_bar_dia_mm: 0.0,
            main_bar_count: 0,
            stirrup_dia_mm: 0.0,
            stirrup_spacing_mm: 0.0,
        }
    }
}

impl BeamInput {
    /// Validate input parameters.
    ///
    /// Returns the first field that is missing, zero or negative, or a
    /// section too small for its cover.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_m", self.length_m)?;
        require_positive("width_mm", self.width_mm)?;
        require_positive("depth_mm", self.depth_mm)?;
        require_positive("cover_mm", self.cover_mm)?;
        require_positive("main_bar_dia_mm", self.main_bar_dia_mm)?;
        require_count("main_bar_count", self.main_bar_count)?;
        require_positive("stirrup_dia_mm", self.stirrup_dia_mm)?;
        require_positive("stirrup_spacing_mm", self.stirrup_spacing_mm)?;
        require_core("width_mm", self.width_mm, self.cover_mm)?;
        require_core("depth_mm", self.depth_mm, self.cover_mm)?;
        if self.main_bar_cutting_length_m() <= 0.0 {
            return Err(CalcError::invalid_input(
                "length_m",
                self.length_m.to_string(),
                "Beam is shorter than its end covers",
            ));
        }
        Ok(())
    }

    /// Cutting length of one main bar (m)
    pub fn main_bar_cutting_length_m(&self) -> f64 {
        beam_main_bar_cutting_length(self.length_m, self.cover_mm, self.main_bar_dia_mm)
    }

    /// Cutting length of one stirrup (m)
    pub fn stirrup_cutting_length_m(&self) -> f64 {
        link_cutting_length(self.width_mm, self.depth_mm, self.cover_mm, self.stirrup_dia_mm)
    }

    /// Number of stirrups along the beam
    pub fn stirrup_count(&self) -> f64 {
        spacing_count(self.length_m, self.stirrup_spacing_mm)
    }
}

/// Results from a beam take-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamSteelResult {
    /// Longitudinal bars
    pub main_bars: BarSchedule,

    /// Shear stirrups
    pub stirrups: BarSchedule,

    /// Sum of both bar sets (kg)
    pub total_weight_kg: f64,
}

/// Calculate beam reinforcement weight.
///
/// # Returns
///
/// * `Some(BeamSteelResult)` - Take-off for complete input
/// * `None` - Input incomplete; call [`BeamInput::validate`] for the reason
pub fn calculate(input: &BeamInput) -> Option<BeamSteelResult> {
    if let Err(reason) = input.validate() {
        debug!(label = %input.label, %reason, "beam take-off withheld");
        return None;
    }

    let main_bars = BarSchedule::new(
        format!("Main Bars ({} mm)", input.main_bar_dia_mm),
        input.main_bar_dia_mm,
        input.main_bar_cutting_length_m(),
        input.main_bar_count as f64,
    );

    let stirrups = BarSchedule::new(
        format!("Stirrups ({} mm)", input.stirrup_dia_mm),
        input.stirrup_dia_mm,
        input.stirrup_cutting_length_m(),
        input.stirrup_count(),
    );

    let total_weight_kg = main_bars.weight_kg + stirrups.weight_kg;

    Some(BeamSteelResult {
        main_bars,
        stirrups,
        total_weight_kg,
    })
}
