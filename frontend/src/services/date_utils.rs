use chrono::Datelike;
use shared::visited::parse_trip_date;

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "janvier", 2 => "février", 3 => "mars", 4 => "avril",
        5 => "mai", 6 => "juin", 7 => "juillet", 8 => "août",
        9 => "septembre", 10 => "octobre", 11 => "novembre", 12 => "décembre",
        _ => "",
    }
}

/// Format a YYYY-MM-DD or RFC 3339 date for display (e.g. "10 janvier 2024")
pub fn format_date_for_display(date_str: &str) -> String {
    match parse_trip_date(date_str) {
        Some(date) => format!("{} {} {}", date.day(), month_name(date.month()), date.year()),
        None => date_str.to_string(),
    }
}

/// "du 10 janvier 2024 au 12 janvier 2024", or only the start when open-ended
pub fn format_date_range(start: &str, end: Option<&str>) -> String {
    match end.filter(|e| !e.is_empty()) {
        Some(end) => format!(
            "du {} au {}",
            format_date_for_display(start),
            format_date_for_display(end)
        ),
        None => format!("le {}", format_date_for_display(start)),
    }
}

/// Get current date in YYYY-MM-DD format, used as the max of date inputs
pub fn get_current_date() -> String {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    format!("{:04}-{:02}-{:02}", year as u32, month as u32, day as u32)
}

/// Filled star rating, e.g. "★★★☆☆"
pub fn stars(note: u8) -> String {
    let filled = note.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_date_for_display() {
        assert_eq!(format_date_for_display("2024-01-10"), "10 janvier 2024");
        assert_eq!(format_date_for_display("2023-08-05T09:00:00Z"), "5 août 2023");
        assert_eq!(format_date_for_display("bientôt"), "bientôt");
    }

    #[wasm_bindgen_test]
    fn test_format_date_range() {
        assert_eq!(format_date_range("2024-01-10", Some("")), "le 10 janvier 2024");
        assert_eq!(
            format_date_range("2024-01-10", Some("2024-01-12")),
            "du 10 janvier 2024 au 12 janvier 2024"
        );
    }

    #[wasm_bindgen_test]
    fn test_stars() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[wasm_bindgen_test]
    fn test_current_date_shape() {
        assert_eq!(get_current_date().len(), 10);
    }
}
