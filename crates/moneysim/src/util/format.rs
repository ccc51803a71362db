/// Group an unsigned whole number with thousands separators
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a currency value, e.g. `-$1,234.50`
pub fn format_currency(value: f64) -> String {
    // Round once on the cent total so 0.999 becomes $1.00, not $0.100
    let total_cents = (value.abs() * 100.0).round() as u64;
    let dollars = group_thousands(total_cents / 100);
    let cents = total_cents % 100;

    if value < 0.0 && total_cents > 0 {
        format!("-${dollars}.{cents:02}")
    } else {
        format!("${dollars}.{cents:02}")
    }
}

/// Format a currency delta with an explicit sign, e.g. `+$25.00`
pub fn format_currency_delta(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_currency(value))
    } else {
        format_currency(value)
    }
}

/// Format a 0 to 100 share
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}
