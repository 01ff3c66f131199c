//! Bid month range validation and enumeration.

use crate::errors::{AppError, AppResult};
use crate::models::BidMonth;

/// Inclusive range of bid months with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: BidMonth,
    end: BidMonth,
}

impl DateRange {
    /// Validates that `start` does not come after `end`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `start > end`. This runs before any
    /// network activity, so a bad range never reaches the portal.
    pub fn new(start: BidMonth, end: BidMonth) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidRange {
                from: start.to_string(),
                to: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from raw year/month parts as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a year is outside 1-9999 or a month outside
    /// 1-12, or `InvalidRange` if the start month falls after the end month.
    pub fn from_parts(
        start_year: i32,
        start_month: u32,
        end_year: i32,
        end_month: u32,
    ) -> AppResult<Self> {
        let start = BidMonth::new(start_year, start_month)
            .ok_or_else(|| out_of_range("Start", start_year, start_month))?;
        let end = BidMonth::new(end_year, end_month)
            .ok_or_else(|| out_of_range("End", end_year, end_month))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> BidMonth {
        self.start
    }

    pub fn end(&self) -> BidMonth {
        self.end
    }
}

fn out_of_range(which: &str, year: i32, month: u32) -> AppError {
    AppError::InvalidInput(format!(
        "{which} year must be {}-{} and month 1-12, got: {year}/{month}",
        BidMonth::MIN_YEAR,
        BidMonth::MAX_YEAR
    ))
}

/// The months to export, after clamping to the most recent `max_months`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthPlan {
    months: Vec<BidMonth>,
    requested: usize,
}

impl MonthPlan {
    /// Enumerates every month from `range.start()` to `range.end()` inclusive,
    /// one calendar month apart, then keeps only the last `max_months`.
    pub fn new(range: &DateRange, max_months: usize) -> Self {
        let mut months = Vec::new();
        let mut next = Some(range.start());
        while let Some(current) = next.filter(|m| *m <= range.end()) {
            months.push(current);
            next = current.succ();
        }

        let requested = months.len();
        if requested > max_months {
            months.drain(..requested - max_months);
        }

        Self { months, requested }
    }

    pub fn months(&self) -> &[BidMonth] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Number of months in the range before clamping.
    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn is_truncated(&self) -> bool {
        self.requested > self.months.len()
    }

    /// First month that will actually be exported.
    pub fn effective_start(&self) -> Option<BidMonth> {
        self.months.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{DateRange, MonthPlan};
    use crate::errors::AppError;
    use crate::models::BidMonth;

    fn month(year: i32, month: u32) -> BidMonth {
        BidMonth::new(year, month).unwrap()
    }

    fn ids(plan: &MonthPlan) -> Vec<String> {
        plan.months().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let result = DateRange::new(month(2024, 5), month(2024, 4));
        match result {
            Err(AppError::InvalidRange { from, to }) => {
                assert_eq!(from, "202405");
                assert_eq!(to, "202404");
            }
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn test_start_after_end_across_years_is_rejected() {
        assert!(DateRange::from_parts(2025, 1, 2024, 12).is_err());
    }

    #[test]
    fn test_from_parts_rejects_bad_month() {
        assert!(matches!(
            DateRange::from_parts(2024, 13, 2024, 12),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            DateRange::from_parts(2024, 1, 2024, 0),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_parts_rejects_years_outside_four_digits() {
        for (start_year, end_year) in [(i32::MAX, i32::MAX), (-3, -3), (-1, 12345), (0, 2024)] {
            assert!(matches!(
                DateRange::from_parts(start_year, 5, end_year, 1),
                Err(AppError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_last_representable_month_terminates() {
        let range = DateRange::from_parts(9999, 11, 9999, 12).unwrap();
        let plan = MonthPlan::new(&range, 24);
        assert_eq!(ids(&plan), vec!["999911", "999912"]);
    }

    #[test]
    fn test_first_representable_month() {
        let range = DateRange::from_parts(1, 1, 1, 2).unwrap();
        let plan = MonthPlan::new(&range, 24);
        assert_eq!(ids(&plan), vec!["000101", "000102"]);
    }

    #[test]
    fn test_single_month_range() {
        let range = DateRange::new(month(2024, 2), month(2024, 2)).unwrap();
        let plan = MonthPlan::new(&range, 24);
        assert_eq!(ids(&plan), vec!["202402"]);
        assert!(!plan.is_truncated());
    }

    #[test]
    fn test_range_crossing_year_boundary() {
        let range = DateRange::new(month(2023, 11), month(2024, 2)).unwrap();
        let plan = MonthPlan::new(&range, 24);
        assert_eq!(ids(&plan), vec!["202311", "202312", "202401", "202402"]);
    }

    #[test]
    fn test_every_length_up_to_limit_is_kept_whole() {
        let start = month(2022, 7);
        let mut end = start;
        for expected_len in 1..=24 {
            let range = DateRange::new(start, end).unwrap();
            let plan = MonthPlan::new(&range, 24);
            assert_eq!(plan.len(), expected_len);
            assert_eq!(plan.requested(), expected_len);
            assert!(!plan.is_truncated());
            for pair in plan.months().windows(2) {
                assert_eq!(pair[0].succ(), Some(pair[1]));
            }
            end = end.succ().unwrap();
        }
    }

    #[test]
    fn test_long_range_keeps_last_24_months() {
        let range = DateRange::new(month(2020, 1), month(2023, 6)).unwrap();
        let plan = MonthPlan::new(&range, 24);

        assert_eq!(plan.requested(), 42);
        assert_eq!(plan.len(), 24);
        assert!(plan.is_truncated());
        assert_eq!(plan.effective_start(), Some(month(2021, 7)));
        assert_eq!(plan.months().last(), Some(&month(2023, 6)));

        let mut expected = Vec::new();
        let mut current = month(2021, 7);
        while current <= month(2023, 6) {
            expected.push(current);
            current = current.succ().unwrap();
        }
        assert_eq!(plan.months(), expected.as_slice());
    }

    #[test]
    fn test_range_of_25_months_drops_only_the_first() {
        let range = DateRange::new(month(2022, 1), month(2024, 1)).unwrap();
        let plan = MonthPlan::new(&range, 24);
        assert_eq!(plan.requested(), 25);
        assert_eq!(plan.effective_start(), Some(month(2022, 2)));
    }

    #[test]
    fn test_custom_limit_is_honored() {
        let range = DateRange::new(month(2024, 1), month(2024, 12)).unwrap();
        let plan = MonthPlan::new(&range, 3);
        assert_eq!(ids(&plan), vec!["202410", "202411", "202412"]);
    }
}
