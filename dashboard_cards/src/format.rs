//! Display formatting for card payloads
//!
//! Totals are preformatted strings so the rendering side never re-derives
//! them. Non-finite inputs (the ratio sentinel) format as "n/a" instead of
//! leaking NaN into visible text.

use chrono::NaiveDate;

/// Format a count with thousands separators, truncating toward zero.
///
/// # Arguments
/// * `value` - Count-like total, usually a sum of whole units
///
/// # Returns
/// * `String` - e.g. `12,345`, or `n/a` for a non-finite input
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let whole = value.trunc() as i64;
    let grouped = group_thousands(&whole.abs().to_string());
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a ratio metric to two decimals with thousands separators.
///
/// # Arguments
/// * `value` - Ratio of two summed metrics
///
/// # Returns
/// * `String` - e.g. `1,234.50`, or `n/a` for a non-finite input
pub fn format_ratio(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rendered = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let grouped = group_thousands(int_part);
    if value < 0.0 {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Day-level period label, e.g. `12 May 2025`
pub fn period_label(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Month-level label, e.g. `May 2025`
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Week-commencing label, e.g. `WC 12 May 2025`
pub fn week_commencing_label(date: NaiveDate) -> String {
    format!("WC {}", period_label(date))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
