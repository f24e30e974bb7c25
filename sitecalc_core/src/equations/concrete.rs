//! # Concrete Quantity Formulas
//!
//! Gross concrete volumes of prismatic members. No deductions are made for
//! the steel displaced by reinforcement.

/// Concrete volume of `quantity` identical rectangular members
///
/// # Formula
/// V = L × W × D × Q
///
/// # Arguments
/// * `length_m`, `width_m`, `depth_m` - Member dimensions in meters
/// * `quantity` - Number of identical members
///
/// # Returns
/// Volume in m³; 0 unless every dimension is positive
///
/// # Example
/// ```rust
/// use sitecalc_core::equations::concrete::member_concrete_volume;
///
/// // Four 300 x 300 columns, 3 m tall
/// let v = member_concrete_volume(0.3, 0.3, 3.0, 4);
/// assert!((v - 1.08).abs() < 1e-9);
/// ```
#[inline]
pub fn member_concrete_volume(length_m: f64, width_m: f64, depth_m: f64, quantity: u32) -> f64 {
    if !(length_m > 0.0 && width_m > 0.0 && depth_m > 0.0) {
        return 0.0;
    }
    length_m * width_m * depth_m * quantity as f64
}
