/// Group the integer digits of `value` in threes
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a money amount rounded to whole units, e.g. `1,234,568` or `-12,000`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let whole = value.abs().round() as u64;
    let grouped = group_thousands(whole);
    if value < 0.0 && whole > 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a money amount with two decimals, e.g. `11,122.22`
pub fn format_amount_precise(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let cents_total = (value.abs() * 100.0).round() as u64;
    let grouped = group_thousands(cents_total / 100);
    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{:02}", cents_total % 100)
}

/// Format a fraction as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
