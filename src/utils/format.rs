/// Parse a user-entered amount, tolerating currency symbols, thousands
/// separators, and surrounding whitespace. Returns None for anything that
/// is not a non-negative finite number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let value: f64 = cleaned.parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Format an amount with two decimal places for display
pub fn format_amount(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "0.00".to_string()
    }
}
