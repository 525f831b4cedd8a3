use rust_decimal::Decimal;

/// Format an amount as currency with thousand separators and 2 decimal places.
/// e.g. `-1234567.891` → `"-$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let rounded = val.round_dp(2);
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Truncate to `max` visible characters, ending with "…" when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let kept: String = s.chars().take(max - 1).collect();
    format!("{kept}…")
}

#[cfg(test)]
#[path = "util_tests.rs"]
mod util_tests;
