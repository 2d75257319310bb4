//! Number formatting shared by every renderer.

/// One decimal place, e.g. `98.8`. Non-finite values print as `0.0`.
pub fn one_decimal(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.1}")
    } else {
        "0.0".to_string()
    }
}

/// One decimal place with a percent sign, e.g. `98.8%`.
pub fn percent_1dp(v: f64) -> String {
    format!("{}%", one_decimal(v))
}

/// Round to a whole count and group thousands with commas, e.g. `67,678,000`.
pub fn count_with_separators(v: f64) -> String {
    let rounded = if v.is_finite() && v > 0.0 { v.round() } else { 0.0 };
    // f64 → u64 saturates; counts here are bounded by the universe.
    group_thousands(rounded as u64)
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
