use std::sync::LazyLock;

use regex::Regex;

pub const INVALID_DURATION: &str = "Invalid Duration";

/// ISO-8601 duration, every component optional. Not anchored: the first
/// `P...` occurrence in the input is used.
static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?")
        .expect("Invalid ISO duration regex")
});

const UNITS: [&str; 7] = ["year", "month", "week", "day", "hour", "minute", "second"];

/// Convert an ISO-8601 duration to a phrase like `"2 hours, 15 minutes"`.
///
/// Returns `None` for absent or empty input and for durations whose
/// components are all zero. Input that doesn't match the grammar at all
/// yields [`INVALID_DURATION`].
pub fn format_duration(duration: Option<&str>) -> Option<String> {
    let duration = duration.filter(|d| !d.is_empty())?;

    let Some(captures) = ISO_DURATION.captures(duration) else {
        return Some(INVALID_DURATION.to_string());
    };

    let parts: Vec<String> = UNITS
        .iter()
        .enumerate()
        .filter_map(|(i, unit)| {
            // Overflowing values count as missing
            let value: u64 = captures
                .get(i + 1)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            match value {
                0 => None,
                1 => Some(format!("1 {unit}")),
                n => Some(format!("{n} {unit}s")),
            }
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
