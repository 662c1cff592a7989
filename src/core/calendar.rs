//! Currency-specific working weeks.
//!
//! A trade can only settle on a working day of its currency's home market.
//! Most currencies follow a Monday–Friday week; a small table lists the
//! currencies whose markets work Sunday–Thursday. No public holidays are
//! considered.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use settlement_report::core::calendar;
//!
//! let saturday = NaiveDate::from_ymd_opt(2016, 1, 2).unwrap();
//! assert_eq!(calendar::adjust("SGD", saturday), NaiveDate::from_ymd_opt(2016, 1, 4).unwrap());
//! assert_eq!(calendar::adjust("AED", saturday), NaiveDate::from_ymd_opt(2016, 1, 3).unwrap());
//! ```

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// A working week: the day it starts on and the two days it rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWeek {
    first_day: Weekday,
    weekend: [Weekday; 2],
}

impl WorkingWeek {
    /// Monday to Friday.
    pub const STANDARD: WorkingWeek = WorkingWeek {
        first_day: Weekday::Mon,
        weekend: [Weekday::Sat, Weekday::Sun],
    };

    /// Sunday to Thursday.
    pub const SHIFTED: WorkingWeek = WorkingWeek {
        first_day: Weekday::Sun,
        weekend: [Weekday::Fri, Weekday::Sat],
    };

    pub fn first_day(&self) -> Weekday {
        self.first_day
    }

    pub fn is_weekend(&self, day: Weekday) -> bool {
        self.weekend.contains(&day)
    }

    /// Roll `date` forward to the first day of the next working week if it
    /// falls on the weekend; otherwise return it unchanged.
    pub fn adjust(&self, date: NaiveDate) -> NaiveDate {
        if !self.is_weekend(date.weekday()) {
            return date;
        }
        let ahead = (7 + self.first_day.num_days_from_monday()
            - date.weekday().num_days_from_monday())
            % 7;
        date.checked_add_days(Days::new(u64::from(ahead)))
            .unwrap_or(date)
    }
}

/// Currencies whose home markets work Sunday to Thursday.
///
/// The only place this policy is declared. Codes not listed here, including
/// codes missing from the ISO table, use [`WorkingWeek::STANDARD`].
static SHIFTED_WEEK_CURRENCIES: &[&str] = &["AED", "SAR"];

/// The working week observed for a currency.
pub fn working_week(currency: impl AsRef<str>) -> WorkingWeek {
    if uses_shifted_pattern(currency) {
        WorkingWeek::SHIFTED
    } else {
        WorkingWeek::STANDARD
    }
}

/// Whether `currency` follows the Sunday–Thursday week.
pub fn uses_shifted_pattern(currency: impl AsRef<str>) -> bool {
    SHIFTED_WEEK_CURRENCIES.contains(&currency.as_ref())
}

/// The currencies listed as following the Sunday–Thursday week.
pub fn shifted_currencies() -> impl Iterator<Item = &'static str> {
    SHIFTED_WEEK_CURRENCIES.iter().copied()
}

pub fn first_working_day_of_week(currency: impl AsRef<str>) -> Weekday {
    working_week(currency).first_day()
}

/// True iff `date` is a weekend day for `currency`.
pub fn is_non_working_day(currency: impl AsRef<str>, date: NaiveDate) -> bool {
    working_week(currency).is_weekend(date.weekday())
}

/// The settlement date actually used for `date` in `currency`.
///
/// Working days are returned unchanged. Weekend days roll forward (never
/// back) to the first working day of the following week, at most 6 days
/// later. Applying `adjust` to its own output is a no-op.
pub fn adjust(currency: impl AsRef<str>, date: NaiveDate) -> NaiveDate {
    working_week(currency).adjust(date)
}
