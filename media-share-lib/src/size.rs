//! Human readable byte counts.

const UNITS: &[(f64, &str)] = &[
    (1e3, "kb"),
    (1e6, "mb"),
    (1e9, "gb"),
    (1e12, "tb"),
];

const LIMIT: f64 = 1e15;

/// Format a byte count, e.g. `1500000` becomes `"1.5 mb"`.
///
/// Each unit is shown with one decimal, rounded. Counts of 1e15 and up are
/// returned as the plain integer.
pub fn format_size(bytes: u64) -> String {
    let value = bytes as f64;
    if value < 1e3 {
        return format!("{} bytes", bytes);
    }
    if value >= LIMIT {
        return bytes.to_string();
    }

    // Pick the largest threshold not above the value.
    let (threshold, unit) = UNITS
        .iter()
        .rev()
        .find(|(t, _)| value >= *t)
        .copied()
        .unwrap_or(UNITS[0]);

    let rounded = (value / (threshold / 10.0)).round() / 10.0;
    format!("{} {}", rounded, unit)
}
