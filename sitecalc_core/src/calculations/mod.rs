//! # Steel Weight Take-offs
//!
//! Bar-by-bar reinforcement weights for single structural elements, using
//! cutting length × unit weight. Each element type follows the pattern:
//!
//! - `*Input` - Geometry and reinforcement (JSON-serializable)
//! - `*SteelResult` - One [`BarSchedule`] per bar set plus the total
//! - `calculate(input) -> Option<*SteelResult>` - Pure calculation,
//!   `None` while the input is incomplete
//! - `*Input::validate()` - Names the field that keeps the result withheld
//!
//! ## Available Elements
//!
//! - [`beam`] - Main bars with 9d bends plus stirrups
//! - [`column`] - Straight main bars plus lateral ties
//! - [`slab`] - Main bars plus distribution bars, both on a spacing

pub mod beam;
pub mod column;
pub mod slab;

use serde::{Deserialize, Serialize};

use crate::equations::reinforcement::unit_weight;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Meters, Millimeters};

// Re-export commonly used types
pub use beam::{BeamInput, BeamSteelResult};
pub use column::{ColumnInput, ColumnSteelResult};
pub use slab::{SlabInput, SlabSteelResult};

/// One set of identical bars in a take-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSchedule {
    /// Human-readable bar mark, e.g. "Main Bars (16 mm)"
    pub description: String,

    /// Bar diameter (mm)
    pub diameter_mm: f64,

    /// Cutting length of one bar (m)
    pub cutting_length_m: f64,

    /// Number of bars (may be fractional for spacing-derived counts)
    pub bar_count: f64,

    /// Cutting length × count (m)
    pub total_length_m: f64,

    /// Nominal mass per meter (kg/m)
    pub unit_weight_kg_per_m: f64,

    /// Total length × unit weight (kg)
    pub weight_kg: f64,
}

impl BarSchedule {
    /// Build a schedule line from one bar's cutting length and the count.
    pub fn new(description: impl Into<String>, diameter_mm: f64, cutting_length_m: f64, bar_count: f64) -> Self {
        let total_length = Meters(cutting_length_m) * bar_count;
        let unit = unit_weight(Millimeters(diameter_mm));
        BarSchedule {
            description: description.into(),
            diameter_mm,
            cutting_length_m,
            bar_count,
            total_length_m: total_length.0,
            unit_weight_kg_per_m: unit.0,
            weight_kg: (unit * total_length).0,
        }
    }
}

/// Closed set of elements the steel-weight calculator handles.
///
/// This allows storing heterogeneous take-offs in a single collection
/// while keeping one calculation function per element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StructuralElement {
    Beam(BeamInput),
    Column(ColumnInput),
    Slab(SlabInput),
}

impl StructuralElement {
    /// Get the user-provided label for this element
    pub fn label(&self) -> &str {
        match self {
            StructuralElement::Beam(b) => &b.label,
            StructuralElement::Column(c) => &c.label,
            StructuralElement::Slab(s) => &s.label,
        }
    }

    /// Get the element type as a string
    pub fn element_type(&self) -> &'static str {
        match self {
            StructuralElement::Beam(_) => "Beam",
            StructuralElement::Column(_) => "Column",
            StructuralElement::Slab(_) => "Slab",
        }
    }

    /// Report the first field that keeps the take-off withheld.
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            StructuralElement::Beam(b) => b.validate(),
            StructuralElement::Column(c) => c.validate(),
            StructuralElement::Slab(s) => s.validate(),
        }
    }

    /// Run the take-off for this element, or `None` while input is incomplete.
    pub fn steel_weight(&self) -> Option<ElementSteelResult> {
        match self {
            StructuralElement::Beam(b) => beam::calculate(b).map(ElementSteelResult::Beam),
            StructuralElement::Column(c) => column::calculate(c).map(ElementSteelResult::Column),
            StructuralElement::Slab(s) => slab::calculate(s).map(ElementSteelResult::Slab),
        }
    }
}

/// Result of [`StructuralElement::steel_weight`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementSteelResult {
    Beam(BeamSteelResult),
    Column(ColumnSteelResult),
    Slab(SlabSteelResult),
}

impl ElementSteelResult {
    /// Sum of all bar set weights (kg)
    pub fn total_weight_kg(&self) -> f64 {
        match self {
            ElementSteelResult::Beam(r) => r.total_weight_kg,
            ElementSteelResult::Column(r) => r.total_weight_kg,
            ElementSteelResult::Slab(r) => r.total_weight_kg,
        }
    }

    /// Bar sets in schedule order
    pub fn schedules(&self) -> Vec<&BarSchedule> {
        match self {
            ElementSteelResult::Beam(r) => vec![&r.main_bars, &r.stirrups],
            ElementSteelResult::Column(r) => vec![&r.main_bars, &r.ties],
            ElementSteelResult::Slab(r) => vec![&r.main_bars, &r.distribution_bars],
        }
    }
}

/// Require a strictly positive value (NaN fails too).
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::incomplete_input(
            field,
            format!("{} must be greater than zero", value),
        ))
    }
}

/// Require a non-zero bar count.
pub(crate) fn require_count(field: &str, count: u32) -> CalcResult<()> {
    if count > 0 {
        Ok(())
    } else {
        Err(CalcError::incomplete_input(field, "At least one bar is required"))
    }
}

/// Require that cover leaves a positive core inside a section dimension.
pub(crate) fn require_core(field: &str, dimension_mm: f64, cover_mm: f64) -> CalcResult<()> {
    if dimension_mm - 2.0 * cover_mm > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            dimension_mm.to_string(),
            format!("Must exceed twice the cover ({} mm)", 2.0 * cover_mm),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_schedule_totals() {
        let line = BarSchedule::new("Main Bars (16 mm)", 16.0, 6.238, 4.0);
        assert!((line.total_length_m - 24.952).abs() < 1e-9);
        assert!((line.weight_kg - 24.952 * 256.0 / 162.2).abs() < 1e-9);
    }

    #[test]
    fn test_require_positive_rejects_nan_and_zero() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", -1.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
    }

    #[test]
    fn test_element_dispatch() {
        let element = StructuralElement::Column(ColumnInput {
            label: "C1".to_string(),
            height_m: 3.0,
            width_mm: 230.0,
            depth_mm: 300.0,
            cover_mm: 40.0,
            main_bar_dia_mm: 12.0,
            main_bar_count: 4,
            tie_dia_mm: 8.0,
            tie_spacing_mm: 150.0,
        });
        assert_eq!(element.element_type(), "Column");
        assert_eq!(element.label(), "C1");

        let result = element.steel_weight().unwrap();
        let parts: f64 = result.schedules().iter().map(|s| s.weight_kg).sum();
        assert!((result.total_weight_kg() - parts).abs() < 1e-9);
    }

    #[test]
    fn test_element_withheld_when_incomplete() {
        let element = StructuralElement::Slab(SlabInput {
            label: "S1".to_string(),
            length_m: 4.0,
            width_m: 3.0,
            thickness_mm: 150.0,
            cover_mm: 20.0,
            main_bar_dia_mm: 10.0,
            main_bar_spacing_mm: 0.0,
            dist_bar_dia_mm: 8.0,
            dist_bar_spacing_mm: 200.0,
        });
        assert!(element.steel_weight().is_none());
        assert_eq!(element.validate().unwrap_err().error_code(), "INCOMPLETE_INPUT");
    }

    #[test]
    fn test_element_serialization_is_tagged() {
        let element = StructuralElement::Beam(BeamInput {
            label: "B1".to_string(),
            ..BeamInput::default()
        });
        let json = serde_json::to_string(&element).unwrap();
        assert!(json.contains("\"type\":\"Beam\""));
        let roundtrip: StructuralElement = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, element);
    }
}
