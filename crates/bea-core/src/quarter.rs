//! Calendar quarter definitions.
//!
//! The catalog cache is refreshed once per quarter: a catalog written in
//! January is still fresh in March, but not in April. Quarters follow the
//! calendar year (Jan–Mar, Apr–Jun, Jul–Sep, Oct–Dec) with no fiscal-year offset.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar quarter of a specific year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalQuarter {
    /// Calendar year.
    pub year: i32,
    /// Quarter number, 1 through 4.
    pub quarter: u8,
}

impl FiscalQuarter {
    /// Returns the quarter containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: ((date.month0() / 3) + 1) as u8,
        }
    }

    /// Returns true if `stored` falls in the same quarter of the same year as `today`.
    #[must_use]
    pub fn is_fresh(stored: NaiveDate, today: NaiveDate) -> bool {
        Self::of(stored) == Self::of(today)
    }
}

impl fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}
