//! Inclusive date range used for report windows
//!
//! A report covers `[start, end]` inclusive. The range also knows how to
//! partition itself into calendar months clipped to its bounds.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::error::{FinTrackError, FinTrackResult};

/// An inclusive `[start, end]` date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// One calendar month of a range, clipped to the range bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    pub year: i32,
    pub month: u32,
    /// First day of the month that lies inside the range
    pub start: NaiveDate,
    /// Last day of the month that lies inside the range
    pub end: NaiveDate,
}

impl MonthSpan {
    /// Label in `YYYY-MM` form
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Check if a date falls inside the clipped month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> FinTrackResult<Self> {
        if start > end {
            return Err(FinTrackError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// First day of `today`'s month through `today`
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            start: first_of_month(today),
            end: today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Check if a date falls within the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Check if another inclusive window shares at least one day with this range
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }

    /// Clip another inclusive window to this range
    ///
    /// Returns `None` if the windows are disjoint or the window is inverted.
    pub fn intersect(&self, start: NaiveDate, end: NaiveDate) -> Option<Self> {
        let start = start.max(self.start);
        let end = end.min(self.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Calendar months touched by this range, in chronological order
    ///
    /// Every month whose span intersects the range is emitted exactly once,
    /// clipped to the range, so the spans partition the range.
    pub fn months(&self) -> Vec<MonthSpan> {
        let mut spans = Vec::new();
        let mut month_start = first_of_month(self.start);

        while month_start <= self.end {
            // The last representable month has no successor to step back from
            let next_month = month_start.checked_add_months(Months::new(1));
            let month_end = match next_month {
                Some(next) => next - Duration::days(1),
                None => self.end,
            };
            if let Some(clipped) = self.intersect(month_start, month_end) {
                spans.push(MonthSpan {
                    year: month_start.year(),
                    month: month_start.month(),
                    start: clipped.start,
                    end: clipped.end,
                });
            }
            match next_month {
                Some(next) => month_start = next,
                None => break,
            }
        }

        spans
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let err = DateRange::new(d(2025, 2, 1), d(2025, 1, 1)).unwrap_err();
        assert!(err.is_invalid_range());
        assert!(DateRange::new(d(2025, 1, 1), d(2025, 1, 1)).is_ok());
    }

    #[test]
    fn test_days_is_inclusive() {
        let range = DateRange::new(d(2025, 1, 1), d(2025, 1, 31)).unwrap();
        assert_eq!(range.days(), 31);
        let single = DateRange::new(d(2025, 3, 5), d(2025, 3, 5)).unwrap();
        assert_eq!(single.days(), 1);
    }

    #[test]
    fn test_overlaps_and_intersect() {
        let range = DateRange::new(d(2025, 1, 15), d(2025, 2, 15)).unwrap();

        assert!(range.overlaps(d(2025, 1, 1), d(2025, 1, 31)));
        assert!(range.overlaps(d(2025, 2, 15), d(2025, 3, 1)));
        assert!(!range.overlaps(d(2025, 2, 16), d(2025, 3, 1)));

        let clipped = range.intersect(d(2025, 1, 1), d(2025, 1, 31)).unwrap();
        assert_eq!(clipped.start(), d(2025, 1, 15));
        assert_eq!(clipped.end(), d(2025, 1, 31));

        assert!(range.intersect(d(2024, 1, 1), d(2024, 12, 31)).is_none());
    }

    #[test]
    fn test_months_clip_to_range() {
        let range = DateRange::new(d(2024, 12, 20), d(2025, 2, 10)).unwrap();
        let months = range.months();

        assert_eq!(months.len(), 3);
        assert_eq!(months[0].label(), "2024-12");
        assert_eq!(months[0].start, d(2024, 12, 20));
        assert_eq!(months[0].end, d(2024, 12, 31));
        assert_eq!(months[1].start, d(2025, 1, 1));
        assert_eq!(months[1].end, d(2025, 1, 31));
        assert_eq!(months[2].start, d(2025, 2, 1));
        assert_eq!(months[2].end, d(2025, 2, 10));
    }

    #[test]
    fn test_months_single_day() {
        let range = DateRange::new(d(2024, 2, 29), d(2024, 2, 29)).unwrap();
        let months = range.months();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, 2);
    }

    #[test]
    fn test_months_reach_the_last_representable_date() {
        let end = NaiveDate::MAX;
        let range = DateRange::new(end - Duration::days(40), end).unwrap();
        let months = range.months();

        assert_eq!(months.first().unwrap().start, range.start());
        assert_eq!(months.last().unwrap().end, end);
        assert!(months.last().unwrap().contains(end));
        let covered: i64 = months.iter().map(|m| (m.end - m.start).num_days() + 1).sum();
        assert_eq!(covered, range.days());
    }

    #[test]
    fn test_month_to_date() {
        let range = DateRange::month_to_date(d(2025, 3, 17));
        assert_eq!(range.start(), d(2025, 3, 1));
        assert_eq!(range.end(), d(2025, 3, 17));
    }
}
