//! Number presentation (en-US conventions).
//!
//! Rounding is half away from zero everywhere, matching how the dashboards
//! have always displayed figures. Absent or non-finite input renders as `"0"`.

use serde::Serialize;

/// Crossover between `full` and `compact` in tooltips.
pub const TOOLTIP_COMPACT_THRESHOLD: f64 = 10_000.0;

const COMPACT_TIERS: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

/// Abbreviated form with at most one fractional digit: `1234` -> `"1.2K"`.
pub fn compact(n: impl Into<Option<f64>>) -> String {
    let Some(n) = finite(n) else {
        return "0".to_string();
    };
    let abs = n.abs();

    let mut tier = COMPACT_TIERS
        .iter()
        .rposition(|(scale, _)| abs >= *scale)
        .unwrap_or(0);
    let mut scaled = round_to(abs / COMPACT_TIERS[tier].0, 1);
    // 999_960 rounds to 1000.0K, which reads as 1M.
    if scaled >= 1000.0 && tier + 1 < COMPACT_TIERS.len() {
        tier += 1;
        scaled = round_to(abs / COMPACT_TIERS[tier].0, 1);
    }

    if scaled == 0.0 {
        return "0".to_string();
    }

    let digits = format!("{scaled:.1}");
    let digits = digits.strip_suffix(".0").unwrap_or(&digits);
    let sign = if n < 0.0 { "-" } else { "" };
    format!("{sign}{digits}{}", COMPACT_TIERS[tier].1)
}

/// Integer-rounded form with thousands separators: `1234567.6` -> `"1,234,568"`.
pub fn full(n: impl Into<Option<f64>>) -> String {
    let Some(n) = finite(n) else {
        return "0".to_string();
    };
    let rounded = n.abs().round();
    if rounded == 0.0 {
        return "0".to_string();
    }

    let digits = format!("{rounded:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `full` below the tooltip threshold (by magnitude), `compact` from it on.
pub fn tooltip(n: impl Into<Option<f64>>) -> String {
    let Some(n) = finite(n) else {
        return "0".to_string();
    };
    if n.abs() < TOOLTIP_COMPACT_THRESHOLD {
        full(n)
    } else {
        compact(n)
    }
}

/// `prefix` glued in front of a tooltip-formatted value (`"$"` + `"12.5K"`).
pub fn tooltip_with_prefix(prefix: &str, n: impl Into<Option<f64>>) -> String {
    format!("{prefix}{}", tooltip(n))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaClass {
    Positive,
    Negative,
}

/// A rendered period-over-period change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeltaBadge {
    pub text: String,
    pub class: DeltaClass,
}

/// Signed percentage with two decimals; absent delta renders no badge.
///
/// Zero counts as positive (`"+0.00%"`).
pub fn delta(d: Option<f64>) -> Option<DeltaBadge> {
    let d = finite(d)?;
    let pct = round_to(d * 100.0, 2);
    let class = if d >= 0.0 {
        DeltaClass::Positive
    } else {
        DeltaClass::Negative
    };
    let sign = match class {
        DeltaClass::Positive => "+",
        DeltaClass::Negative => "",
    };
    Some(DeltaBadge {
        text: format!("{sign}{pct:.2}%"),
        class,
    })
}

fn finite(n: impl Into<Option<f64>>) -> Option<f64> {
    n.into().filter(|v| v.is_finite())
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (v * factor).round() / factor
}
