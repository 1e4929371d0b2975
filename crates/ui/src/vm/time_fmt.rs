use chrono::{DateTime, Utc};

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    format!("{minutes} min")
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::time::fixed_now;

    #[test]
    fn formats_dates_and_minutes() {
        assert_eq!(format_date(fixed_now()), "Nov 14, 2023");
        assert_eq!(format_minutes(0), "0 min");
        assert_eq!(format_minutes(45), "45 min");
    }
}
