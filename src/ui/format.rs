//! Display formatting for metric values.
//!
//! The service reports missing metrics as `null`, so every formatter takes an
//! `Option<f64>` and has a fixed rendering for "no value".

/// Abbreviated magnitude: `1.50B`, `2.30M`, `4.00K`, or two decimals below a thousand.
pub fn format_number(value: Option<f64>) -> String {
    let Some(num) = value else {
        return "0".to_string();
    };
    if num >= 1e9 {
        format!("{:.2}B", num / 1e9)
    } else if num >= 1e6 {
        format!("{:.2}M", num / 1e6)
    } else if num >= 1e3 {
        format!("{:.2}K", num / 1e3)
    } else {
        format!("{:.2}", num)
    }
}

/// US dollars with thousands separators and 2 to 8 fraction digits.
pub fn format_currency(value: Option<f64>) -> String {
    let Some(num) = value.filter(|v| v.is_finite()) else {
        return "$0.00".to_string();
    };

    let fixed = format!("{:.8}", num.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    // Rounding can produce "-0": only sign values that survive it.
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');
    let sign = if num < 0.0 && !is_zero { "-" } else { "" };

    format!("{}${}.{}", sign, group_thousands(int_part), frac)
}

/// Signed percentage with two decimals; `--%` when unknown.
pub fn format_percent_change(value: Option<f64>) -> String {
    match value {
        None => "--%".to_string(),
        Some(v) if v > 0.0 => format!("+{:.2}%", v),
        Some(v) if v < 0.0 => format!("{:.2}%", v),
        Some(_) => "0.00%".to_string(),
    }
}

pub fn format_velocity(value: Option<f64>) -> String {
    format!("{:.3}", value.unwrap_or(0.0))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_abbreviates_large_values() {
        assert_eq!(format_number(Some(1_500_000_000.0)), "1.50B");
        assert_eq!(format_number(Some(2_345_678.0)), "2.35M");
        assert_eq!(format_number(Some(4_000.0)), "4.00K");
        assert_eq!(format_number(Some(1_000.0)), "1.00K");
    }

    #[test]
    fn number_rounds_small_values_to_two_decimals() {
        assert_eq!(format_number(Some(999.994)), "999.99");
        assert_eq!(format_number(Some(0.5)), "0.50");
        assert_eq!(format_number(Some(-12_345.0)), "-12345.00");
        assert_eq!(format_number(None), "0");
    }

    #[test]
    fn currency_uses_separators_and_variable_precision() {
        assert_eq!(format_currency(Some(43_250.5)), "$43,250.50");
        assert_eq!(format_currency(Some(0.000_123_45)), "$0.00012345");
        assert_eq!(format_currency(Some(1_234_567.0)), "$1,234,567.00");
        assert_eq!(format_currency(Some(12.3456)), "$12.3456");
        assert_eq!(format_currency(Some(-5.5)), "-$5.50");
        assert_eq!(format_currency(Some(-0.000_000_001)), "$0.00");
        assert_eq!(format_currency(None), "$0.00");
    }

    #[test]
    fn percent_change_is_signed() {
        assert_eq!(format_percent_change(Some(1.234)), "+1.23%");
        assert_eq!(format_percent_change(Some(-0.5)), "-0.50%");
        assert_eq!(format_percent_change(Some(0.0)), "0.00%");
        assert_eq!(format_percent_change(None), "--%");
    }

    #[test]
    fn velocity_has_three_decimals() {
        assert_eq!(format_velocity(Some(0.04217)), "0.042");
        assert_eq!(format_velocity(None), "0.000");
    }
}
