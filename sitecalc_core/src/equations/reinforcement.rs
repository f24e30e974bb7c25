//! # Reinforcement Formulas
//!
//! Bar areas, unit weights and cutting lengths for steel reinforcement.
//! Detailing follows the usual IS 456 site conventions.
//!
//! ## Notation
//!
//! - `d` = Nominal bar diameter (mm)
//! - `n` = Number of bars
//! - `c` = Clear cover to the reinforcement (mm)
//! - `s` = Center-to-center bar spacing (mm)
//! - `L` = Span, height or slab extent the bars run along (m)
//! - `W`, `D` = Section width and depth (mm)
//!
//! ## Units
//!
//! Spans are in meters; everything measured across a section is in
//! millimeters. Cutting lengths are returned in meters.
//!
//! ## References
//!
//! - IS 456:2000 Plain and Reinforced Concrete, clause 26
//! - IS 1786:2008 High strength deformed steel bars (nominal mass d²/162)
//! - SP 34 Handbook on Concrete Reinforcement and Detailing

use std::f64::consts::PI;

use crate::units::{CubicMeters, KgPerMeter, Kilograms, Meters, Millimeters, SqM, SqMm};

/// Density of reinforcing steel (kg/m³)
pub const STEEL_DENSITY_KG_M3: f64 = 7850.0;

/// Divisor of the nominal-mass formula `d² / 162.2` (kg/m with d in mm)
pub const UNIT_WEIGHT_DIVISOR: f64 = 162.2;

/// Development/bend allowance at each end of a beam main bar, in bar diameters
pub const MAIN_BAR_BEND_ALLOWANCE: f64 = 9.0;

/// Hook allowance at each end of a stirrup or tie (135° hook), in bar diameters
pub const HOOK_ALLOWANCE: f64 = 10.0;

// =============================================================================
// AREA AND WEIGHT
// =============================================================================

/// Calculate the combined cross-sectional area of a group of bars
///
/// # Formula
/// A = n × π × (d/2)²
///
/// # Arguments
/// * `count` - Number of bars
/// * `diameter_mm` - Bar diameter in mm
///
/// # Returns
/// Area in mm². Zero when either the count or the diameter is not positive.
///
/// # Example
/// ```rust
/// use sitecalc_core::equations::reinforcement::steel_bar_area;
///
/// // 4 bars of 20 mm
/// let area = steel_bar_area(4, 20.0);
/// assert!((area - 1256.637).abs() < 0.001);
/// assert_eq!(steel_bar_area(0, 20.0), 0.0);
/// ```
pub fn steel_bar_area(count: u32, diameter_mm: f64) -> f64 {
    if count == 0 || !(diameter_mm > 0.0) {
        return 0.0;
    }
    let radius = diameter_mm / 2.0;
    count as f64 * PI * radius.powi(2)
}

/// Nominal mass per meter of a bar
///
/// # Formula
/// w = d² / 162.2
///
/// This is the standard site approximation of `π/4 × d² × 7850 / 10⁶`.
///
/// # Example
/// ```rust
/// use sitecalc_core::equations::reinforcement::unit_weight_per_meter;
///
/// assert!((unit_weight_per_meter(16.0) - 1.578).abs() < 0.001);
/// assert!((unit_weight_per_meter(8.0) - 0.395).abs() < 0.001);
/// ```
pub fn unit_weight_per_meter(diameter_mm: f64) -> f64 {
    unit_weight(Millimeters(diameter_mm)).0
}

/// Typed form of [`unit_weight_per_meter`]
pub fn unit_weight(diameter: Millimeters) -> KgPerMeter {
    if !(diameter.0 > 0.0) {
        return KgPerMeter(0.0);
    }
    KgPerMeter(diameter.0.powi(2) / UNIT_WEIGHT_DIVISOR)
}

/// Steel weight by the area × assumed bar length method
///
/// Treats the whole bar area as running for `assumed_bar_length_m`. For a
/// member the assumed length is its length times its quantity. This is a
/// rough approximation, not a take-off; never combine it with the
/// cutting-length weights of the same element.
///
/// # Formula
/// W = (A / 10⁶) × L_assumed × ρ_steel
///
/// # Example
/// ```rust
/// use sitecalc_core::equations::reinforcement::steel_weight_from_area;
///
/// // 1000 mm² over 10 m is 0.01 m³ of steel
/// let w = steel_weight_from_area(1000.0, 10.0);
/// assert!((w - 78.5).abs() < 1e-9);
/// ```
pub fn steel_weight_from_area(total_area_mm2: f64, assumed_bar_length_m: f64) -> f64 {
    let area: SqM = SqMm(total_area_mm2).into();
    steel_mass(area * Meters(assumed_bar_length_m)).0
}

/// Steel weight as a percentage of the concrete volume
///
/// Used when bar-by-bar detail is not available.
///
/// # Formula
/// W = V_concrete × (p / 100) × ρ_steel
///
/// A non-positive percentage gives zero.
pub fn steel_weight_from_percentage(concrete_volume_m3: f64, steel_percent: f64) -> f64 {
    if !(steel_percent > 0.0) {
        return 0.0;
    }
    steel_mass(CubicMeters(concrete_volume_m3) * (steel_percent / 100.0)).0
}

/// Mass of a volume of steel
pub fn steel_mass(volume: CubicMeters) -> Kilograms {
    Kilograms(volume.0 * STEEL_DENSITY_KG_M3)
}

// =============================================================================
// CUTTING LENGTHS
// =============================================================================

/// Clear length of a straight bar between covers
///
/// # Formula
/// l = L − 2c/1000
#[inline]
pub fn clear_bar_length(span_m: f64, cover_mm: f64) -> f64 {
    let cover: Meters = Millimeters(cover_mm).into();
    span_m - 2.0 * cover.0
}

/// Cutting length of a beam main bar
///
/// ```text
///   ╷                              ╷
///   └──────────────────────────────┘   9d bend at each end
///   │c│←────── L − 2c ──────────→│c│
/// ```
///
/// # Formula
/// l = L − 2c/1000 + 2 × 9d/1000
///
/// # Example
/// ```rust
/// use sitecalc_core::equations::reinforcement::beam_main_bar_cutting_length;
///
/// // 6 m beam, 25 mm cover, 16 mm bars
/// let l = beam_main_bar_cutting_length(6.0, 25.0, 16.0);
/// assert!((l - 6.238).abs() < 1e-9);
/// ```
#[inline]
pub fn beam_main_bar_cutting_length(span_m: f64, cover_mm: f64, diameter_mm: f64) -> f64 {
    let bend: Meters = Millimeters(2.0 * MAIN_BAR_BEND_ALLOWANCE * diameter_mm).into();
    clear_bar_length(span_m, cover_mm) + bend.0
}

/// Cutting length of a closed rectangular stirrup or tie
///
/// ```text
///   ┌─────a─────┐
///   │           │
///   b           b     a = W − 2c, b = D − 2c
///   │           │
///   └─────a─────┘  + 10d hook at each end
/// ```
///
/// # Formula
/// l = (2a + 2b + 2 × 10d) / 1000
///
/// # Arguments
/// * `width_mm`, `depth_mm` - Section dimensions
/// * `cover_mm` - Clear cover
/// * `diameter_mm` - Stirrup/tie bar diameter
#[inline]
pub fn link_cutting_length(width_mm: f64, depth_mm: f64, cover_mm: f64, diameter_mm: f64) -> f64 {
    let a = Millimeters(width_mm) - Millimeters(2.0 * cover_mm);
    let b = Millimeters(depth_mm) - Millimeters(2.0 * cover_mm);
    let hooks = Millimeters(2.0 * HOOK_ALLOWANCE * diameter_mm);
    let perimeter = a * 2.0 + b * 2.0 + hooks;
    Meters::from(perimeter).0
}

/// Number of bars placed at a spacing along a run, both ends included
///
/// # Formula
/// n = L_mm / s + 1
///
/// The count is not rounded; a spacing that does not divide the run
/// evenly gives a fractional count.
///
/// # Example
/// ```rust
/// use sitecalc_core::equations::reinforcement::spacing_count;
///
/// assert_eq!(spacing_count(6.0, 200.0), 31.0);
/// ```
#[inline]
pub fn spacing_count(span_m: f64, spacing_mm: f64) -> f64 {
    let span: Millimeters = Meters(span_m).into();
    span.0 / spacing_mm + 1.0
}
