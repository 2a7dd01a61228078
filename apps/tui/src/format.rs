// pt-BR display formatting for counts, timestamps and day labels.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const MISSING: &str = "--";

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// `1234567` -> `1.234.567`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Extracts the calendar date from the timestamp shapes the API produces.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|parsed| parsed.date())
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

/// `dd/mm/yyyy`; `--` when absent, the raw value when it cannot be parsed.
pub fn format_date(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None | Some("") => MISSING.to_string(),
        Some(raw) => parse_day(raw).map_or_else(
            || raw.to_string(),
            |day| day.format("%d/%m/%Y").to_string(),
        ),
    }
}

/// Axis label for the daily chart: `dd/mm`.
pub fn format_day_label(value: &str) -> String {
    parse_day(value).map_or_else(|| value.to_string(), |day| day.format("%d/%m").to_string())
}

pub fn format_frp(value: Option<f64>) -> String {
    format!("{:.1}", value.filter(|v| v.is_finite()).unwrap_or(0.0))
}

pub fn text_or_missing(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separator() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.000");
        assert_eq!(format_count(1_234_567), "1.234.567");
        assert_eq!(format_count(12_345), "12.345");
    }

    #[test]
    fn dates_from_every_backend_shape() {
        assert_eq!(format_date(Some("2025-11-02T17:40:00")), "02/11/2025");
        assert_eq!(format_date(Some("2025-11-02 17:40:00")), "02/11/2025");
        assert_eq!(format_date(Some("2025-11-02T17:40:00.123")), "02/11/2025");
        assert_eq!(format_date(Some("2025-11-02T17:40:00+00:00")), "02/11/2025");
        assert_eq!(format_date(Some("11/02/2025 17:40")), "02/11/2025");
        assert_eq!(format_date(Some("2025-11-02")), "02/11/2025");
    }

    #[test]
    fn missing_and_unparseable_dates() {
        assert_eq!(format_date(None), "--");
        assert_eq!(format_date(Some("  ")), "--");
        assert_eq!(format_date(Some("ontem")), "ontem");
    }

    #[test]
    fn day_labels() {
        assert_eq!(format_day_label("2024-01-05"), "05/01");
        assert_eq!(format_day_label("sem data"), "sem data");
    }

    #[test]
    fn frp_and_text_cells() {
        assert_eq!(format_frp(Some(12.345)), "12.3");
        assert_eq!(format_frp(None), "0.0");
        assert_eq!(format_frp(Some(f64::NAN)), "0.0");
        assert_eq!(text_or_missing(Some("ALTAMIRA")), "ALTAMIRA");
        assert_eq!(text_or_missing(Some("")), "--");
        assert_eq!(text_or_missing(None), "--");
    }
}
