use chrono::NaiveDate;

/// Date layouts seen in the sheet, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Best-effort parse of a sheet date; `None` for anything unrecognized
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// ISO-8601 (`YYYY-MM-DD`) form used by the page's date filter
pub fn iso_date(raw: &str) -> Option<String> {
    normalize_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}
