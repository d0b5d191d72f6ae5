use chrono::{Duration, NaiveDate};

use crate::model::CellValue;

/// Days between the spreadsheet epoch (1899-12-30) and the Unix epoch.
const SERIAL_UNIX_OFFSET: i64 = 25569;

/// Largest serial still rendered as a date (9999-12-31).
const SERIAL_MAX: f64 = 2_958_465.0;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y", "%d-%m-%Y"];

/// Decode a raw cell into a canonical `YYYY-MM-DD` string, or `""`.
///
/// Numeric cells are day-count serials relative to the spreadsheet
/// epoch. Text cells try the common calendar formats first and fall
/// back to a serial-in-text interpretation (text exports keep the
/// serials). Never fails; unparsable input absorbs to `""`.
pub fn decode_date(raw: &CellValue) -> String {
    match raw {
        CellValue::Number(n) => serial_to_iso(*n),
        CellValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return String::new();
            }
            for fmt in DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                    return date.format("%Y-%m-%d").to_string();
                }
            }
            s.parse::<f64>().map(serial_to_iso).unwrap_or_default()
        }
        CellValue::Empty => String::new(),
    }
}

fn serial_to_iso(serial: f64) -> String {
    if !serial.is_finite() || !(0.0..=SERIAL_MAX).contains(&serial) {
        return String::new();
    }
    let days = serial.floor() as i64 - SERIAL_UNIX_OFFSET;
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(days)))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Decode a raw cell into a zero-padded `HH:MM` string.
///
/// Numeric cells are day fractions (0.5 → "12:00"). Text passes
/// through verbatim unless it is itself a day fraction. Absent input
/// yields the `"TBD"` sentinel.
pub fn decode_time(raw: &CellValue) -> String {
    match raw {
        CellValue::Number(n) => fraction_to_hhmm(*n),
        CellValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return "TBD".to_string();
            }
            if let Ok(fraction) = s.parse::<f64>() {
                if (0.0..1.0).contains(&fraction) {
                    return fraction_to_hhmm(fraction);
                }
            }
            s.to_string()
        }
        CellValue::Empty => "TBD".to_string(),
    }
}

fn fraction_to_hhmm(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "TBD".to_string();
    }
    // Datetime serials carry whole days; only the fraction is time.
    let total_minutes = (fraction * 24.0 * 60.0).floor() as i64;
    let total_minutes = total_minutes.rem_euclid(24 * 60);
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Case- and whitespace-insensitive canonical form for identity
/// matching and diffing. Idempotent.
pub fn normalize_for_comparison(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
