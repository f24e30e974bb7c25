//! # Form Input Parsing
//!
//! Lenient text-to-number conversion for values typed into a form or a
//! prompt. Nothing here fails: unparsable or empty text becomes 0, and the
//! calculators then treat the zero as "not entered yet".
//!
//! ```rust
//! use sitecalc_core::input::{parse_count, parse_decimal};
//!
//! assert_eq!(parse_decimal(" 6.5 "), 6.5);
//! assert_eq!(parse_decimal("12mm"), 12.0);
//! assert_eq!(parse_decimal(""), 0.0);
//! assert_eq!(parse_count("4.7"), 4);
//! assert_eq!(parse_count("-3"), 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::estimate::{Member, RateConfig, SteelBarGroup};

/// Parse a decimal, accepting a leading numeric prefix ("12mm" → 12).
///
/// Empty, unparsable or non-finite text gives 0.
pub fn parse_decimal(text: &str) -> f64 {
    let prefix = numeric_prefix(text.trim_start(), true);
    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a whole count, accepting a leading integer prefix ("4.7" → 4).
///
/// Negative, empty or unparsable text gives 0; overflow saturates.
pub fn parse_count(text: &str) -> u32 {
    let prefix = numeric_prefix(text.trim_start(), false);
    if prefix.starts_with('-') {
        return 0;
    }
    let digits = prefix.trim_start_matches('+');
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Longest prefix that looks like a number: sign, digits and, for
/// decimals, a fraction and exponent.
fn numeric_prefix(text: &str, decimal: bool) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if decimal {
        if end < bytes.len() && bytes[end] == b'.' {
            let mut frac_end = end + 1;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if has_digits || frac_end > end + 1 {
                has_digits = true;
                end = frac_end;
            }
        }
        if has_digits && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
                exp_end += 1;
            }
            let exp_digits = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits {
                end = exp_end;
            }
        }
    }

    if has_digits {
        &text[..end]
    } else {
        ""
    }
}

/// Raw text state of the quick field estimator, with its starting values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickEstimatorForm {
    pub concrete_rate: String,
    pub steel_rate: String,
    pub length: String,
    pub width: String,
    pub depth: String,
    pub quantity: String,
    pub number_of_bars: String,
    pub bar_diameter_mm: String,
}

impl Default for QuickEstimatorForm {
    fn default() -> Self {
        QuickEstimatorForm {
            concrete_rate: "8000".to_string(),
            steel_rate: "65".to_string(),
            length: String::new(),
            width: String::new(),
            depth: String::new(),
            quantity: "1".to_string(),
            number_of_bars: "4".to_string(),
            bar_diameter_mm: "20".to_string(),
        }
    }
}

impl QuickEstimatorForm {
    /// Convert the form text into engine inputs.
    ///
    /// Labor rates are not part of the quick form and are left at zero.
    pub fn to_inputs(&self) -> (Member, RateConfig) {
        let member = Member::new(
            "Quick estimate",
            parse_decimal(&self.length),
            parse_decimal(&self.width),
            parse_decimal(&self.depth),
            parse_count(&self.quantity),
        )
        .with_bars(SteelBarGroup::new(
            parse_count(&self.number_of_bars),
            parse_decimal(&self.bar_diameter_mm),
        ));

        let rates = RateConfig {
            concrete_rate: parse_decimal(&self.concrete_rate),
            steel_rate: parse_decimal(&self.steel_rate),
            concrete_labor_rate: 0.0,
            steel_labor_rate: 0.0,
        };

        (member, rates)
    }
}
