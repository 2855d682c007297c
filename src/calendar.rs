//! Month sequences for the yearly conversion loop

use crate::errors::{ConvertError, Result};
use chrono::{Datelike, Months, NaiveDate};
use std::ops::RangeInclusive;

pub const FIRST_MONTH: u32 = 1;
pub const LAST_MONTH: u32 = 12;

/// Validates a year span and returns it as an inclusive range.
pub fn year_range(start_year: i32, end_year: i32) -> Result<RangeInclusive<i32>> {
    if start_year > end_year {
        return Err(ConvertError::InvalidYearRange {
            start: start_year,
            end: end_year,
        });
    }
    Ok(start_year..=end_year)
}

/// First day of the given month.
pub fn month_start(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ConvertError::InvalidDate { year, month })
}

/// Whole calendar months from `start` to `end`. Negative spans count as zero.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Month-start dates of `year`, January through December.
pub fn month_starts(year: i32) -> Result<Vec<NaiveDate>> {
    let start = month_start(year, FIRST_MONTH)?;
    let end = month_start(year, LAST_MONTH)?;
    let n_months = months_between(start, end) + 1;

    (0..n_months)
        .map(|offset| {
            start
                .checked_add_months(Months::new(offset))
                .ok_or(ConvertError::InvalidDate {
                    year,
                    month: FIRST_MONTH + offset,
                })
        })
        .collect()
}

/// Number of days in the given month of the Gregorian calendar.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = month_start(year, month)?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or(ConvertError::InvalidDate { year, month })?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_starts_cover_the_year() {
        for year in 1981..=2020 {
            let dates = month_starts(year).unwrap();
            assert_eq!(dates.len(), 12);
            assert_eq!(dates[0], NaiveDate::from_ymd_opt(year, 1, 1).unwrap());
            for (i, date) in dates.iter().enumerate() {
                assert_eq!(date.year(), year);
                assert_eq!(date.month(), i as u32 + 1);
                assert_eq!(date.day(), 1);
            }
        }
    }

    #[test]
    fn test_months_between() {
        let jan = month_start(1981, 1).unwrap();
        let dec = month_start(1981, 12).unwrap();
        assert_eq!(months_between(jan, dec), 11);
        assert_eq!(months_between(jan, jan), 0);
        assert_eq!(months_between(dec, jan), 0);

        let next_feb = month_start(1982, 2).unwrap();
        assert_eq!(months_between(jan, next_feb), 13);

        let jan_15 = NaiveDate::from_ymd_opt(1981, 1, 15).unwrap();
        let feb_10 = NaiveDate::from_ymd_opt(1981, 2, 10).unwrap();
        assert_eq!(months_between(jan_15, feb_10), 0);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1981, 1).unwrap(), 31);
        assert_eq!(days_in_month(1981, 2).unwrap(), 28);
        assert_eq!(days_in_month(1984, 2).unwrap(), 29);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(1981, 4).unwrap(), 30);
        assert_eq!(days_in_month(1981, 12).unwrap(), 31);
        assert!(days_in_month(1981, 13).is_err());
    }

    #[test]
    fn test_year_range() {
        assert_eq!(year_range(1981, 2020).unwrap().count(), 40);
        assert_eq!(year_range(1995, 1995).unwrap().count(), 1);
        match year_range(2020, 1981) {
            Err(ConvertError::InvalidYearRange { start, end }) => {
                assert_eq!((start, end), (2020, 1981));
            }
            _ => panic!("Expected InvalidYearRange error"),
        }
    }
}
