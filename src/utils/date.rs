use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a YYYY-MM-DD date argument.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Parse an inclusive date range, rejecting reversed bounds.
pub fn parse_range(from: &str, to: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;

    if end < start {
        return Err(AppError::InvalidDate(format!(
            "Range end {to} precedes start {from}"
        )));
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2025-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );
        assert!(parse_date("01/09/2025").is_err());
    }

    #[test]
    fn rejects_reversed_ranges() {
        assert!(parse_range("2025-09-10", "2025-09-01").is_err());
        parse_range("2025-09-01", "2025-09-01").unwrap();
    }
}
