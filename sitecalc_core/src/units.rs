//! # Unit Types
//!
//! Type-safe wrappers for the metric units used on site. These are plain
//! f64 newtypes: JSON stays clean (just numbers) and the conversions that
//! actually bite in take-offs (mm vs m) are explicit.
//!
//! ## Conventions
//!
//! Reinforcement work mixes two length scales:
//! - Member spans, heights and slab extents: meters (m)
//! - Section sizes, cover, bar diameters and spacings: millimeters (mm)
//! - Bar area: square millimeters (mm²)
//! - Concrete: cubic meters (m³)
//! - Steel: kilograms (kg), unit weight in kg/m
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::units::{Meters, Millimeters};
//!
//! let cover = Millimeters(25.0);
//! let cover_m: Meters = cover.into();
//! assert!((cover_m.0 - 0.025).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Area / Volume Units
// ============================================================================

/// Area in square millimeters (bar cross-sections)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqMm> for SqM {
    fn from(mm2: SqMm) -> Self {
        SqM(mm2.0 / 1.0e6)
    }
}

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Linear mass in kilograms per meter (bar unit weight)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerMeter(pub f64);

impl Mul<Meters> for KgPerMeter {
    type Output = Kilograms;
    fn mul(self, rhs: Meters) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

impl Mul<f64> for CubicMeters {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        CubicMeters(self.0 * rhs)
    }
}

impl Mul<Meters> for SqM {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Length Arithmetic (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let m = Meters(6.0);
        let mm: Millimeters = m.into();
        assert_eq!(mm.0, 6000.0);
    }

    #[test]
    fn test_sq_mm_to_sq_m() {
        let area: SqM = SqMm(1_000_000.0).into();
        assert_eq!(area.0, 1.0);
    }

    #[test]
    fn test_unit_weight_times_length() {
        let w = KgPerMeter(2.0) * Meters(3.5);
        assert_eq!(w, Kilograms(7.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(450.0);
        let b = Millimeters(50.0);
        assert_eq!((a - b).0, 400.0);
        assert_eq!((a + b).0, 500.0);
        assert_eq!((b * 2.0).0, 100.0);
        assert_eq!((a / 3.0).0, 150.0);
    }

    #[test]
    fn test_serialization() {
        let m = Meters(12.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
