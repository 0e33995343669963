//! Number formatting helpers shared by the renderers

/// Format nanoseconds with an adaptive unit (ns, µs, ms, s)
pub fn format_duration(nanos: f64) -> String {
    if !nanos.is_finite() {
        return "n/a".to_string();
    }
    let abs = nanos.abs();
    if abs < 1_000.0 {
        format!("{:.2} ns", nanos)
    } else if abs < 1_000_000.0 {
        format!("{:.2} µs", nanos / 1_000.0)
    } else if abs < 1_000_000_000.0 {
        format!("{:.2} ms", nanos / 1_000_000.0)
    } else {
        format!("{:.3} s", nanos / 1_000_000_000.0)
    }
}

/// Format `value` with `digits` significant decimal digits.
///
/// Integer digits are never rounded away, so large values may show more.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let digits = digits.max(1) as i32;
    let magnitude = if value == 0.0 {
        0
    } else {
        value.abs().log10().floor() as i32
    };
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    format!("{:.*}", decimals, value)
}

/// Format a coefficient of variation; NaN is spelled out
pub fn format_cv(cv: f64) -> String {
    if cv.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", cv)
    }
}

/// Format the CV of π estimates in scientific notation; exact zero stays `0`
pub fn format_pi_cv(cv: f64) -> String {
    if cv.is_nan() {
        "NaN".to_string()
    } else if cv == 0.0 {
        "0".to_string()
    } else {
        format!("{:.3e}", cv)
    }
}
