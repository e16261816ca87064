// ── Display formatting helpers ──

use chrono::{DateTime, Local, NaiveDateTime};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const DATE_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable byte count using 1024 steps, rounded to two decimals.
///
/// Missing, NaN, infinite and negative inputs render as `"N/A"`.
pub fn format_file_size(bytes: Option<f64>) -> String {
    let Some(bytes) = bytes.filter(|b| b.is_finite() && *b >= 0.0) else {
        return "N/A".to_owned();
    };
    if bytes <= 0.0 {
        return "0 Bytes".to_owned();
    }

    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

/// Local-time rendering of an API timestamp.
///
/// Empty input renders as `"N/A"`; anything unparseable is returned verbatim.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "N/A".to_owned();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DATE_DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(DATE_DISPLAY).to_string();
        }
    }
    raw.to_owned()
}

/// `format_date` for optional fields.
pub fn format_optional_date(raw: Option<&str>) -> String {
    raw.map_or_else(|| "N/A".to_owned(), format_date)
}

/// Progress as a 0..=100 percentage.
///
/// Values up to 1.0 are read as a fraction; larger values as a percentage.
pub fn progress_percent(progress: Option<f64>) -> f64 {
    match progress {
        Some(p) if p.is_finite() && p > 0.0 => {
            let pct = if p <= 1.0 { p * 100.0 } else { p };
            pct.min(100.0)
        }
        _ => 0.0,
    }
}

/// `"total_downloads"` → `"TOTAL DOWNLOADS"`.
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

/// Render a JSON value the way a template would interpolate it: strings
/// without quotes, `null` as `"N/A"`, everything else as compact JSON.
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "N/A".to_owned(),
        other => other.to_string(),
    }
}

/// Subscription tier name. Current API versions send a number.
pub fn format_plan(plan: Option<&serde_json::Value>) -> String {
    match plan {
        None | Some(serde_json::Value::Null) => "Free".to_owned(),
        Some(serde_json::Value::Number(n)) => match n.as_u64() {
            Some(0) => "Free".to_owned(),
            Some(1) => "Essential".to_owned(),
            Some(2) => "Pro".to_owned(),
            Some(3) => "Standard".to_owned(),
            _ => n.to_string(),
        },
        Some(serde_json::Value::String(s)) if s.is_empty() => "Free".to_owned(),
        Some(other) => display_value(other),
    }
}
