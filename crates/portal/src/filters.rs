//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::NaiveDate;

/// Format a whole-rupiah amount with dot separators.
///
/// Usage in templates: `{{ room.monthly_price|rupiah }}`
#[askama::filter_fn]
pub fn rupiah(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_rupiah(&amount.to_string()))
}

/// Format a date the way the rest of the site writes dates (DD-MM-YYYY).
///
/// Usage in templates: `{{ announcement.effective_date|tanggal }}`
#[askama::filter_fn]
pub fn tanggal(date: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_tanggal(&date.to_string()))
}

fn format_rupiah(raw: &str) -> String {
    raw.parse::<i64>().map_or_else(
        |_| raw.to_owned(),
        |value| kostpanel_core::Rupiah::new(value).display(),
    )
}

fn format_tanggal(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_or_else(
        |_| raw.to_owned(),
        |date| date.format("%d-%m-%Y").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_groups_digits() {
        assert_eq!(format_rupiah("1500000"), "Rp1.500.000");
    }

    #[test]
    fn rupiah_passes_through_non_numeric_input() {
        assert_eq!(format_rupiah("n/a"), "n/a");
    }

    #[test]
    fn tanggal_is_day_first() {
        assert_eq!(format_tanggal("2026-08-07"), "07-08-2026");
    }
}
