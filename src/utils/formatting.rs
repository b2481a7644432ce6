//! Formatting utilities used for CLI and export outputs.

/// Seconds → `02h 05m`. Leftover seconds are dropped.
pub fn secs2readable(secs: i64) -> String {
    let abs_s = secs.abs();
    let hours = abs_s / 3600;
    let minutes = (abs_s % 3600) / 60;
    let sign = if secs < 0 { "-" } else { "" };

    format!("{}{:02}h {:02}m", sign, hours, minutes)
}

/// Group the digits of a non-negative integer: `12345` → `12,345`.
pub fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Currency is floored, never rounded: `999.9` → `¥999`.
pub fn format_currency(amount: f64, symbol: &str, separator: &str) -> String {
    let floored = amount.floor();
    let sign = if floored < 0.0 { "-" } else { "" };
    format!(
        "{}{}{}",
        sign,
        symbol,
        group_thousands(floored.abs() as u64, separator)
    )
}

/// Meters → `1.23 km` (or `850 m` below one kilometre).
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}
