//! Presentation formatting.
//!
//! Volumes print to 3 decimals, areas to whole mm², take-off lengths and
//! weights to 2 decimals, and money to whole units with Indian digit
//! grouping (12,34,567).

/// Group the digits of a whole number the Indian way: the last three
/// digits, then pairs.
pub fn group_indian(whole: u64) -> String {
    let digits = whole.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Money rounded to whole units, e.g. `₹ 1,23,457`.
pub fn currency(symbol: &str, amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{} 0", symbol);
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{} {}", sign, symbol, group_indian(rounded.abs() as u64))
}

/// Concrete volume, `1.080 m³`
pub fn volume(m3: f64) -> String {
    format!("{:.3} m³", m3)
}

/// Bar area, `1257 mm²`
pub fn area(mm2: f64) -> String {
    format!("{:.0} mm²", mm2)
}

/// Steel weight, `39.38 kg`
pub fn weight(kg: f64) -> String {
    format!("{:.2} kg", kg)
}

/// Take-off length, `24.95 m`
pub fn length(m: f64) -> String {
    format!("{:.2} m", m)
}

/// Bar count; spacing-derived counts can be fractional.
pub fn count(bars: f64) -> String {
    if bars.fract() == 0.0 {
        format!("{:.0}", bars)
    } else {
        format!("{:.2}", bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1000), "1,000");
        assert_eq!(group_indian(123456), "1,23,456");
        assert_eq!(group_indian(1234567), "12,34,567");
        assert_eq!(group_indian(12345678), "1,23,45,678");
    }

    #[test]
    fn test_currency_rounds_to_whole_units() {
        assert_eq!(currency("₹", 9409.44), "₹ 9,409");
        assert_eq!(currency("₹", 123456.5), "₹ 1,23,457");
        assert_eq!(currency("₹", 0.0), "₹ 0");
        assert_eq!(currency("₹", -1500.0), "-₹ 1,500");
        assert_eq!(currency("₹", f64::NAN), "₹ 0");
    }

    #[test]
    fn test_measurements() {
        assert_eq!(volume(1.08), "1.080 m³");
        assert_eq!(area(1256.637), "1257 mm²");
        assert_eq!(weight(39.3817), "39.38 kg");
        assert_eq!(length(24.952), "24.95 m");
        assert_eq!(count(31.0), "31");
        assert_eq!(count(30.5), "30.50");
    }
}
