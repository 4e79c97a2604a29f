use chrono::NaiveDate;

/// Get current date in YYYY-MM-DD format
pub fn get_current_date() -> String {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    
    format!("{:04}-{:02}-{:02}", year as u32, month as u32, day as u32)
}

/// Today in the browser's local time zone
pub fn today() -> NaiveDate {
    NaiveDate::parse_from_str(&get_current_date(), "%Y-%m-%d").unwrap_or_default()
}
