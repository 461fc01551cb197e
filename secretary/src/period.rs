//! Pay periods on synthetic dates of a fixed non-leap reference year.
//!
//! Salary and product payment days are placed into the previous, the current
//! and the next month, so windows near month and year boundaries compare
//! correctly without the real calendar year.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::PeriodError;

/// Non-leap year used for synthetic dates, so February 29 never appears
pub const REFERENCE_YEAR: i32 = 2;

/// Months around the current one in which a payment day is placed
const MONTH_OFFSETS: [i32; 3] = [-1, 0, 1];

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Place `day` into the month `month + month_offset` of the reference year.
///
/// Month arithmetic wraps across years (January - 1 is December of the year
/// before). A day past the end of the target month is clamped to its last day.
pub fn synthesize_date(month: u32, day: u32, month_offset: i32) -> Option<NaiveDate> {
    let month_index = (month as i32 - 1).checked_add(month_offset)?;
    let year = REFERENCE_YEAR.checked_add(month_index.div_euclid(12))?;
    let month0 = month_index.rem_euclid(12) as usize;
    let day = day.clamp(1, DAYS_IN_MONTH[month0]);
    NaiveDate::from_ymd_opt(year, month0 as u32 + 1, day)
}

/// The pay period `(prev, next]` containing today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriod {
    month: u32,
    today: NaiveDate,
    prev: NaiveDate,
    next: NaiveDate,
}

impl PayPeriod {
    /// Find the pay period containing `today` given the salary payment days.
    ///
    /// Both today and product payment dates use the same half-open convention:
    /// the period starts right after `prev` and includes `next`. On a payment
    /// day the period closing today is returned.
    pub fn current(today: NaiveDate, payment_days: &[u32]) -> Result<Self, PeriodError> {
        if payment_days.is_empty() {
            return Err(PeriodError::NoPeriodDefined);
        }

        let month = today.month();
        let today = synthesize_date(month, today.day(), 0).ok_or(PeriodError::DateOutOfRange {
            month,
            day: today.day(),
        })?;

        let mut days = payment_days.to_vec();
        days.sort_unstable();
        days.dedup();

        let candidates: Vec<NaiveDate> = days
            .iter()
            .flat_map(|&day| {
                MONTH_OFFSETS
                    .iter()
                    .filter_map(move |&offset| synthesize_date(month, day, offset))
            })
            .collect();

        let prev = candidates.iter().filter(|&&date| date < today).max();
        let next = candidates.iter().filter(|&&date| date >= today).min();

        match (prev, next) {
            (Some(&prev), Some(&next)) => Ok(PayPeriod {
                month,
                today,
                prev,
                next,
            }),
            _ => Err(PeriodError::NoPeriodDefined),
        }
    }

    pub fn prev(&self) -> NaiveDate {
        self.prev
    }

    pub fn next(&self) -> NaiveDate {
        self.next
    }

    /// `prev < date <= next`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.prev < date && date <= self.next
    }

    /// The single synthesized date of a monthly payment day: its placement
    /// in the previous, current or next month that lies closest to today.
    /// Ties go to the earlier date.
    pub fn payment_date(&self, payment_day: u32) -> Option<NaiveDate> {
        MONTH_OFFSETS
            .iter()
            .filter_map(|&offset| synthesize_date(self.month, payment_day, offset))
            .min_by_key(|&date| ((date - self.today).num_days().abs(), date))
    }

    /// Payment date of a monthly payment day when it falls inside the period
    pub fn occurrence_of(&self, payment_day: u32) -> Option<NaiveDate> {
        self.payment_date(payment_day)
            .filter(|&date| self.contains(date))
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} – {}",
            self.prev.format("%d.%m"),
            self.next.format("%d.%m")
        )
    }
}
