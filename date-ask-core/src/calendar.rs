//! The one month the date picker is allowed to show.

use chrono::{Datelike, NaiveDate};

use crate::error::{DateAskError, DateAskResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBounds {
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthBounds {
    /// The calendar month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        MonthBounds { first, last }
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    pub fn check(&self, date: NaiveDate) -> DateAskResult<()> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(DateAskError::DateOutsideMonth {
                date,
                first: self.first,
                last: self.last,
            })
        }
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let last = self.last;
        self.first.iter_days().take_while(move |d| *d <= last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn june() {
        let bounds = MonthBounds::containing(ymd(2024, 6, 15));
        assert_eq!(bounds.first(), ymd(2024, 6, 1));
        assert_eq!(bounds.last(), ymd(2024, 6, 30));
        assert_eq!(bounds.days().count(), 30);
    }

    #[test]
    fn leap_february() {
        let bounds = MonthBounds::containing(ymd(2024, 2, 1));
        assert_eq!(bounds.last(), ymd(2024, 2, 29));
    }

    #[test]
    fn december_rolls_over_the_year() {
        let bounds = MonthBounds::containing(ymd(2023, 12, 31));
        assert_eq!(bounds.first(), ymd(2023, 12, 1));
        assert_eq!(bounds.last(), ymd(2023, 12, 31));
    }

    #[test]
    fn rejects_neighbouring_months() {
        let bounds = MonthBounds::containing(ymd(2024, 6, 15));
        assert!(bounds.check(ymd(2024, 6, 1)).is_ok());
        assert!(bounds.check(ymd(2024, 6, 30)).is_ok());
        assert!(matches!(
            bounds.check(ymd(2024, 5, 31)),
            Err(DateAskError::DateOutsideMonth { .. })
        ));
        assert!(bounds.check(ymd(2024, 7, 1)).is_err());
    }
}
