//! Reinforcement Bar Sizes
//!
//! Nominal diameters of deformed reinforcement bars stocked on most sites
//! (IS 1786). Calculators accept any diameter; this table is what the
//! front ends offer for selection and what `bars` prints.

use serde::{Deserialize, Serialize};

use crate::equations::reinforcement::{steel_bar_area, unit_weight_per_meter};
use crate::errors::{CalcError, CalcResult};

/// Nominal bar sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RebarSize {
    #[serde(rename = "8")]
    D8,
    #[serde(rename = "10")]
    D10,
    #[serde(rename = "12")]
    D12,
    #[serde(rename = "16")]
    D16,
    #[serde(rename = "20")]
    D20,
    #[serde(rename = "25")]
    D25,
    #[serde(rename = "32")]
    D32,
}

impl RebarSize {
    /// All nominal sizes, smallest first
    pub const ALL: [RebarSize; 7] = [
        RebarSize::D8,
        RebarSize::D10,
        RebarSize::D12,
        RebarSize::D16,
        RebarSize::D20,
        RebarSize::D25,
        RebarSize::D32,
    ];

    /// Nominal diameter in mm
    pub fn diameter_mm(&self) -> f64 {
        match self {
            RebarSize::D8 => 8.0,
            RebarSize::D10 => 10.0,
            RebarSize::D12 => 12.0,
            RebarSize::D16 => 16.0,
            RebarSize::D20 => 20.0,
            RebarSize::D25 => 25.0,
            RebarSize::D32 => 32.0,
        }
    }

    /// Find the nominal size for an exact diameter
    pub fn from_mm(diameter_mm: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.diameter_mm() == diameter_mm)
    }

    /// Parse from common string representations ("16", "16mm", "T16", "Ø16")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let cleaned = s
            .trim()
            .to_uppercase()
            .replace("MM", "")
            .replace(['T', 'Y', 'Ø', '#', ' '], "");
        cleaned
            .parse::<f64>()
            .ok()
            .and_then(Self::from_mm)
            .ok_or_else(|| {
                CalcError::invalid_input("bar_size", s, "Not a nominal bar size (8, 10, 12, 16, 20, 25, 32)")
            })
    }

    /// Cross-sectional area of one bar (mm²)
    pub fn area_mm2(&self) -> f64 {
        steel_bar_area(1, self.diameter_mm())
    }

    /// Nominal mass per meter (kg/m)
    pub fn unit_weight_kg_per_m(&self) -> f64 {
        unit_weight_per_meter(self.diameter_mm())
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RebarSize::D8 => "8 mm",
            RebarSize::D10 => "10 mm",
            RebarSize::D12 => "12 mm",
            RebarSize::D16 => "16 mm",
            RebarSize::D20 => "20 mm",
            RebarSize::D25 => "25 mm",
            RebarSize::D32 => "32 mm",
        }
    }
}

impl std::fmt::Display for RebarSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tabulated properties of one nominal bar size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarProperties {
    pub size: RebarSize,
    pub diameter_mm: f64,
    pub area_mm2: f64,
    pub unit_weight_kg_per_m: f64,
}

impl From<RebarSize> for RebarProperties {
    fn from(size: RebarSize) -> Self {
        RebarProperties {
            size,
            diameter_mm: size.diameter_mm(),
            area_mm2: size.area_mm2(),
            unit_weight_kg_per_m: size.unit_weight_kg_per_m(),
        }
    }
}

/// Properties of every nominal bar size
pub fn rebar_table() -> Vec<RebarProperties> {
    RebarSize::ALL.into_iter().map(RebarProperties::from).collect()
}
