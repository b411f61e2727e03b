//! Display formatting for quote values.
//!
//! All functions are pure and follow US locale conventions: `,` thousands
//! separators, `.` decimal point, `Jan 5, 2024` dates and 12-hour clock
//! times. Absent values render as [`NOT_AVAILABLE`]. Rounding is half away
//! from zero on the exact binary value of the input.

use chrono::DateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder rendered for absent or unrepresentable values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Currency used by [`format_currency`] when the caller has no preference.
pub const DEFAULT_CURRENCY: &str = "USD";

/// CSS class applied to non-negative changes.
pub const POSITIVE_CHANGE_CLASS: &str = "text-green-600";

/// CSS class applied to negative changes.
pub const NEGATIVE_CHANGE_CLASS: &str = "text-red-600";

const MAX_FRACTION_DIGITS: u32 = 20;

/// Magnitude tiers for [`format_large_number`], largest first.
const MAGNITUDE_TIERS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Formats `value` as a two-decimal currency amount, e.g. `$1,234.56`.
pub fn format_currency(value: Option<f64>, currency: &str) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    let amount = group_thousands(&fixed_digits(value.abs(), 2));
    format!("{}{}{}", sign(value), currency_prefix(currency), amount)
}

/// Formats `value` with exactly `decimals` fraction digits and grouping.
pub fn format_number(value: Option<f64>, decimals: u32) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    let digits = fixed_digits(value.abs(), decimals.min(MAX_FRACTION_DIGITS));
    format!("{}{}", sign(value), group_thousands(&digits))
}

/// Abbreviates large magnitudes with a `T`/`B`/`M`/`K` suffix.
///
/// Values below one thousand (negatives included) keep their full form with
/// grouping and at most three fraction digits. A negative value that rounds
/// to zero keeps its sign, so `-0.0001` renders as `-0`.
pub fn format_large_number(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    for (threshold, suffix) in MAGNITUDE_TIERS {
        if value >= threshold {
            return format!("{}{}", fixed_digits(value / threshold, 2), suffix);
        }
    }

    let digits = fixed_digits(value.abs(), 3);
    let trimmed = if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits.as_str()
    };
    format!("{}{}", sign(value), group_thousands(trimmed))
}

/// Formats a percentage with two decimals, prefixing `+` when `value >= 0`.
pub fn format_percentage(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    let prefix = if value >= 0.0 { "+" } else { "-" };
    format!("{}{}%", prefix, fixed_digits(value.abs(), 2))
}

/// Formats an epoch-seconds timestamp as a short date, e.g. `Jan 5, 2024`.
///
/// Zero is treated as absent.
pub fn format_date(timestamp: Option<i64>) -> String {
    format_timestamp(timestamp, "%b %-d, %Y")
}

/// Formats an epoch-seconds timestamp as a short date with a 12-hour time,
/// e.g. `Jan 5, 2024, 03:04 PM`.
pub fn format_date_time(timestamp: Option<i64>) -> String {
    format_timestamp(timestamp, "%b %-d, %Y, %I:%M %p")
}

/// Picks the styling class for a price change. Absent values get no class.
pub fn change_color_class(value: Option<f64>) -> &'static str {
    match value {
        None => "",
        Some(v) if v >= 0.0 => POSITIVE_CHANGE_CLASS,
        Some(_) => NEGATIVE_CHANGE_CLASS,
    }
}

fn format_timestamp(timestamp: Option<i64>, pattern: &str) -> String {
    timestamp
        .filter(|ts| *ts != 0)
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 {
        "-"
    } else {
        ""
    }
}

fn currency_prefix(currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    match code.as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        "INR" => "₹".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        _ => format!("{}\u{a0}", code),
    }
}

/// Renders a non-negative value with exactly `decimals` fraction digits.
fn fixed_digits(abs: f64, decimals: u32) -> String {
    if let Some(decimal) = Decimal::from_f64_retain(abs) {
        let mut rounded =
            decimal.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(decimals);
        // rescale silently lowers the scale when the digits overflow 96 bits.
        if rounded.scale() == decimals {
            return rounded.to_string();
        }
    }
    // Outside the Decimal range; the float formatter is exact enough here.
    format!("{:.*}", decimals as usize, abs)
}

/// Inserts `,` separators into the integer part of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let len = int_part.len();
    let mut out = String::with_capacity(digits.len() + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
