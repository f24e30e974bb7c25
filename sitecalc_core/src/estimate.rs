//! # Member Estimates and Project Totals
//!
//! Quantity and cost estimates for lists of prismatic members (columns,
//! beams, footings, slabs measured as L × W × D boxes). This is the engine
//! behind the quick field estimator and the detailed project desk.
//!
//! Steel is estimated per member from its bar groups using one
//! [`SteelWeightMethod`] for the whole estimate. The bar-by-bar take-offs
//! in [`crate::calculations`] are a separate, more detailed method and are
//! never summed into these totals.
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::estimate::{project_totals, Member, RateConfig, SteelBarGroup};
//!
//! let columns = Member::new("Column C1", 0.3, 0.3, 3.0, 4)
//!     .with_bars(SteelBarGroup::new(4, 20.0));
//!
//! let totals = project_totals(&[columns], &RateConfig::default());
//! assert!((totals.concrete_volume_m3 - 1.08).abs() < 1e-9);
//! assert!(totals.grand_total > totals.material_cost);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::equations::{
    member_concrete_volume, steel_bar_area, steel_weight_from_area, steel_weight_from_percentage,
};

/// Default concrete rate (₹/m³)
pub const DEFAULT_CONCRETE_RATE: f64 = 8000.0;
/// Default steel rate (₹/kg)
pub const DEFAULT_STEEL_RATE: f64 = 65.0;
/// Default concrete labor rate (₹/m³)
pub const DEFAULT_CONCRETE_LABOR_RATE: f64 = 1500.0;
/// Default steel labor rate (₹/kg)
pub const DEFAULT_STEEL_LABOR_RATE: f64 = 15.0;

/// A group of identical longitudinal bars in a member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelBarGroup {
    /// Number of bars
    pub count: u32,

    /// Bar diameter in mm
    pub diameter_mm: f64,
}

impl SteelBarGroup {
    pub fn new(count: u32, diameter_mm: f64) -> Self {
        SteelBarGroup { count, diameter_mm }
    }

    /// Combined cross-sectional area (mm²)
    pub fn area_mm2(&self) -> f64 {
        steel_bar_area(self.count, self.diameter_mm)
    }
}

impl Default for SteelBarGroup {
    fn default() -> Self {
        SteelBarGroup::new(4, 20.0)
    }
}

/// A set of identical rectangular members.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "7d6f2f4e-3a53-4c43-9d4c-5a8b1f0c2e11",
///   "name": "Column C1",
///   "length_m": 0.3,
///   "width_m": 0.3,
///   "depth_m": 3.0,
///   "quantity": 4,
///   "bars": [{ "count": 4, "diameter_mm": 20.0 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Stable identifier within a project
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Length in meters
    pub length_m: f64,

    /// Width in meters
    pub width_m: f64,

    /// Depth (or thickness, or height) in meters
    pub depth_m: f64,

    /// Number of identical members
    pub quantity: u32,

    /// Longitudinal bar groups
    #[serde(default)]
    pub bars: Vec<SteelBarGroup>,
}

impl Member {
    /// Create a member with no bars.
    pub fn new(name: impl Into<String>, length_m: f64, width_m: f64, depth_m: f64, quantity: u32) -> Self {
        Member {
            id: Uuid::new_v4(),
            name: name.into(),
            length_m,
            width_m,
            depth_m,
            quantity,
            bars: Vec::new(),
        }
    }

    /// Add a bar group (builder style).
    pub fn with_bars(mut self, group: SteelBarGroup) -> Self {
        self.bars.push(group);
        self
    }

    /// Blank member as added from the project desk: zero dimensions,
    /// quantity 1, 4 bars of 20 mm.
    pub fn placeholder(index: usize) -> Self {
        Member::new(format!("Member {}", index), 0.0, 0.0, 0.0, 1).with_bars(SteelBarGroup::default())
    }

    /// The starter row of a new project desk: four 300 × 300 columns, 3 m tall.
    pub fn sample_column() -> Self {
        Member::new("Column C1", 0.3, 0.3, 3.0, 4).with_bars(SteelBarGroup::default())
    }

    /// Concrete volume of all `quantity` members (m³)
    pub fn concrete_volume_m3(&self) -> f64 {
        member_concrete_volume(self.length_m, self.width_m, self.depth_m, self.quantity)
    }

    /// Combined bar area of one member section (mm²)
    pub fn steel_area_mm2(&self) -> f64 {
        self.bars.iter().map(SteelBarGroup::area_mm2).sum()
    }

    /// Bar length assumed by the area method: length × quantity (m).
    /// Zero until all three dimensions are positive.
    pub fn assumed_bar_length_m(&self) -> f64 {
        if !self.has_dimensions() {
            return 0.0;
        }
        self.length_m * self.quantity as f64
    }

    /// Whether all three dimensions are entered (the desk hides the
    /// per-member preview until they are).
    pub fn has_dimensions(&self) -> bool {
        self.length_m > 0.0 && self.width_m > 0.0 && self.depth_m > 0.0
    }
}

/// Material and labor rates.
///
/// ## JSON Example
///
/// ```json
/// {
///   "concrete_rate": 8000.0,
///   "steel_rate": 65.0,
///   "concrete_labor_rate": 1500.0,
///   "steel_labor_rate": 15.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Concrete supply rate per m³
    pub concrete_rate: f64,

    /// Steel supply rate per kg
    pub steel_rate: f64,

    /// Concrete placing labor per m³
    pub concrete_labor_rate: f64,

    /// Steel fixing labor per kg
    pub steel_labor_rate: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        RateConfig {
            concrete_rate: DEFAULT_CONCRETE_RATE,
            steel_rate: DEFAULT_STEEL_RATE,
            concrete_labor_rate: DEFAULT_CONCRETE_LABOR_RATE,
            steel_labor_rate: DEFAULT_STEEL_LABOR_RATE,
        }
    }
}

impl RateConfig {
    /// Material cost of the given quantities
    pub fn material_cost(&self, concrete_volume_m3: f64, steel_weight_kg: f64) -> f64 {
        concrete_volume_m3 * self.concrete_rate + steel_weight_kg * self.steel_rate
    }

    /// Labor cost of the given quantities
    pub fn labor_cost(&self, concrete_volume_m3: f64, steel_weight_kg: f64) -> f64 {
        concrete_volume_m3 * self.concrete_labor_rate + steel_weight_kg * self.steel_labor_rate
    }
}

/// How member steel weight is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SteelWeightMethod {
    /// Bar area × (member length × quantity) × steel density
    #[default]
    AssumedBarLength,

    /// A fixed percentage of the concrete volume × steel density
    PercentageOfVolume { steel_percent: f64 },
}

impl SteelWeightMethod {
    /// Steel weight of one member row (kg)
    pub fn member_weight_kg(&self, member: &Member) -> f64 {
        match self {
            SteelWeightMethod::AssumedBarLength => {
                steel_weight_from_area(member.steel_area_mm2(), member.assumed_bar_length_m())
            }
            SteelWeightMethod::PercentageOfVolume { steel_percent } => {
                steel_weight_from_percentage(member.concrete_volume_m3(), *steel_percent)
            }
        }
    }

    /// Get display name
    pub fn display_name(&self) -> String {
        match self {
            SteelWeightMethod::AssumedBarLength => "bar area x member length".to_string(),
            SteelWeightMethod::PercentageOfVolume { steel_percent } => {
                format!("{}% of concrete volume", steel_percent)
            }
        }
    }
}

/// Per-member preview shown on the project desk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberEstimate {
    pub member_id: Uuid,
    pub concrete_volume_m3: f64,
    pub steel_area_mm2: f64,
    pub steel_weight_kg: f64,
    /// Concrete + steel supply only
    pub material_cost: f64,
}

/// Estimate one member.
pub fn estimate_member(member: &Member, rates: &RateConfig, method: SteelWeightMethod) -> MemberEstimate {
    let concrete_volume_m3 = member.concrete_volume_m3();
    let steel_weight_kg = method.member_weight_kg(member);
    MemberEstimate {
        member_id: member.id,
        concrete_volume_m3,
        steel_area_mm2: member.steel_area_mm2(),
        steel_weight_kg,
        material_cost: rates.material_cost(concrete_volume_m3, steel_weight_kg),
    }
}

/// Result of the quick field estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickEstimate {
    pub concrete_volume_m3: f64,
    pub steel_area_mm2: f64,
    pub steel_weight_kg: f64,
    /// Concrete and steel supply at the material rates; labor is not included
    pub total_cost: f64,
}

/// Quick single-member estimate using the area × assumed length method.
///
/// # Example
///
/// ```rust
/// use sitecalc_core::estimate::{quick_estimate, Member, RateConfig, SteelBarGroup};
///
/// let footing = Member::new("F1", 1.2, 1.2, 0.45, 1).with_bars(SteelBarGroup::new(4, 20.0));
/// let result = quick_estimate(&footing, &RateConfig::default());
/// assert!((result.concrete_volume_m3 - 0.648).abs() < 1e-9);
/// ```
pub fn quick_estimate(member: &Member, rates: &RateConfig) -> QuickEstimate {
    let line = estimate_member(member, rates, SteelWeightMethod::AssumedBarLength);
    QuickEstimate {
        concrete_volume_m3: line.concrete_volume_m3,
        steel_area_mm2: line.steel_area_mm2,
        steel_weight_kg: line.steel_weight_kg,
        total_cost: line.material_cost,
    }
}

/// Aggregated project quantities and costs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectTotals {
    pub concrete_volume_m3: f64,
    pub steel_area_mm2: f64,
    pub steel_weight_kg: f64,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub grand_total: f64,
}

/// Project totals using the default (area × assumed length) steel method.
pub fn project_totals(members: &[Member], rates: &RateConfig) -> ProjectTotals {
    project_totals_by(members, rates, SteelWeightMethod::AssumedBarLength)
}

/// Project totals with an explicit steel-weight method.
///
/// Quantities are summed first and costed once, so the result does not
/// depend on member order beyond floating-point rounding.
pub fn project_totals_by(members: &[Member], rates: &RateConfig, method: SteelWeightMethod) -> ProjectTotals {
    let (concrete_volume_m3, steel_area_mm2, steel_weight_kg) =
        members.iter().fold((0.0, 0.0, 0.0), |(volume, area, weight), member| {
            (
                volume + member.concrete_volume_m3(),
                area + member.steel_area_mm2(),
                weight + method.member_weight_kg(member),
            )
        });

    let material_cost = rates.material_cost(concrete_volume_m3, steel_weight_kg);
    let labor_cost = rates.labor_cost(concrete_volume_m3, steel_weight_kg);

    ProjectTotals {
        concrete_volume_m3,
        steel_area_mm2,
        steel_weight_kg,
        material_cost,
        labor_cost,
        grand_total: material_cost + labor_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_column_quantities() {
        let member = Member::sample_column();
        let line = estimate_member(&member, &RateConfig::default(), SteelWeightMethod::AssumedBarLength);

        assert!((line.concrete_volume_m3 - 1.08).abs() < 1e-9);
        assert!((line.steel_area_mm2 - 1256.637).abs() < 0.001);
        // 1256.637e-6 m² × (0.3 × 4) m × 7850
        assert!((line.steel_weight_kg - 11.8375).abs() < 0.001);
        // 1.08 × 8000 + 11.8375 × 65
        assert!((line.material_cost - 9409.44).abs() < 0.1);
    }

    #[test]
    fn test_multiple_bar_groups_add() {
        let member = Member::new("B1", 4.0, 0.23, 0.45, 1)
            .with_bars(SteelBarGroup::new(2, 16.0))
            .with_bars(SteelBarGroup::new(2, 12.0));
        let expected = steel_bar_area(2, 16.0) + steel_bar_area(2, 12.0);
        assert!((member.steel_area_mm2() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_quick_estimate_excludes_labor() {
        let member = Member::sample_column();
        let rates = RateConfig::default();
        let quick = quick_estimate(&member, &rates);
        let totals = project_totals(&[member], &rates);
        assert!((quick.total_cost - totals.material_cost).abs() < 1e-9);
        assert!(totals.grand_total > quick.total_cost);
    }

    #[test]
    fn test_empty_project_is_all_zero() {
        let totals = project_totals(&[], &RateConfig::default());
        assert_eq!(totals, ProjectTotals::default());
    }

    #[test]
    fn test_totals_costing() {
        let members = vec![
            Member::sample_column(),
            Member::new("Beam B1", 4.0, 0.23, 0.45, 2).with_bars(SteelBarGroup::new(4, 16.0)),
        ];
        let rates = RateConfig {
            concrete_rate: 100.0,
            steel_rate: 10.0,
            concrete_labor_rate: 20.0,
            steel_labor_rate: 2.0,
        };
        let t = project_totals(&members, &rates);

        assert!((t.material_cost - (t.concrete_volume_m3 * 100.0 + t.steel_weight_kg * 10.0)).abs() < 1e-9);
        assert!((t.labor_cost - (t.concrete_volume_m3 * 20.0 + t.steel_weight_kg * 2.0)).abs() < 1e-9);
        assert_eq!(t.grand_total, t.material_cost + t.labor_cost);
    }

    #[test]
    fn test_order_independent() {
        let a = Member::sample_column();
        let b = Member::new("Slab", 4.0, 3.0, 0.15, 1).with_bars(SteelBarGroup::new(20, 10.0));
        let c = Member::new("Footing", 1.5, 1.5, 0.5, 6).with_bars(SteelBarGroup::new(8, 12.0));
        let rates = RateConfig::default();

        let forward = project_totals(&[a.clone(), b.clone(), c.clone()], &rates);
        let reverse = project_totals(&[c, b, a], &rates);
        assert!((forward.grand_total - reverse.grand_total).abs() < 1e-6);
        assert!((forward.steel_weight_kg - reverse.steel_weight_kg).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_method() {
        let member = Member::sample_column();
        let method = SteelWeightMethod::PercentageOfVolume { steel_percent: 2.0 };
        let t = project_totals_by(&[member], &RateConfig::default(), method);
        // 1.08 m³ × 2% × 7850
        assert!((t.steel_weight_kg - 169.56).abs() < 1e-9);
    }

    #[test]
    fn test_methods_differ() {
        let member = Member::sample_column();
        let rates = RateConfig::default();
        let by_area = project_totals(&[member.clone()], &rates);
        let by_percent = project_totals_by(
            &[member],
            &rates,
            SteelWeightMethod::PercentageOfVolume { steel_percent: 1.0 },
        );
        assert_eq!(by_area.concrete_volume_m3, by_percent.concrete_volume_m3);
        assert!(by_area.steel_weight_kg != by_percent.steel_weight_kg);
    }

    #[test]
    fn test_zero_dimension_member_contributes_nothing() {
        let blank = Member::placeholder(2);
        assert!(!blank.has_dimensions());
        let t = project_totals(&[blank], &RateConfig::default());
        assert_eq!(t.concrete_volume_m3, 0.0);
        assert_eq!(t.steel_weight_kg, 0.0);
        assert!(t.steel_area_mm2 > 0.0);
        assert_eq!(t.grand_total, 0.0);
    }

    #[test]
    fn test_negative_member_does_not_cancel_real_ones() {
        let rates = RateConfig::default();
        let negative = Member::new("neg", -3.0, 0.3, 0.3, 4).with_bars(SteelBarGroup::default());
        assert!(!negative.has_dimensions());

        let line = estimate_member(&negative, &rates, SteelWeightMethod::AssumedBarLength);
        assert_eq!(line.concrete_volume_m3, 0.0);
        assert_eq!(line.steel_weight_kg, 0.0);
        assert_eq!(line.material_cost, 0.0);

        for method in [
            SteelWeightMethod::AssumedBarLength,
            SteelWeightMethod::PercentageOfVolume { steel_percent: 1.5 },
        ] {
            let with = project_totals_by(&[Member::sample_column(), negative.clone()], &rates, method);
            let without = project_totals_by(&[Member::sample_column()], &rates, method);
            assert_eq!(with.concrete_volume_m3, without.concrete_volume_m3);
            assert_eq!(with.steel_weight_kg, without.steel_weight_kg);
            assert_eq!(with.grand_total, without.grand_total);
            assert!(with.grand_total > 0.0);
        }
    }

    #[test]
    fn test_quick_estimate_never_negative() {
        let member = Member::new("Quick estimate", -3.0, 0.3, 0.3, 1).with_bars(SteelBarGroup::default());
        let quick = quick_estimate(&member, &RateConfig::default());
        assert_eq!(quick.concrete_volume_m3, 0.0);
        assert_eq!(quick.steel_weight_kg, 0.0);
        assert_eq!(quick.total_cost, 0.0);
    }

    #[test]
    fn test_method_serialization() {
        let json = serde_json::to_string(&SteelWeightMethod::PercentageOfVolume { steel_percent: 1.5 }).unwrap();
        assert_eq!(json, r#"{"method":"percentage_of_volume","steel_percent":1.5}"#);
        let default: SteelWeightMethod = serde_json::from_str(r#"{"method":"assumed_bar_length"}"#).unwrap();
        assert_eq!(default, SteelWeightMethod::AssumedBarLength);
    }

    #[test]
    fn test_rates_default_missing_fields() {
        let rates: RateConfig = serde_json::from_str(r#"{"steel_rate": 70.0}"#).unwrap();
        assert_eq!(rates.steel_rate, 70.0);
        assert_eq!(rates.concrete_rate, DEFAULT_CONCRETE_RATE);
    }
}
