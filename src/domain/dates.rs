//! Travel dates and trip-length derivation
//!
//! The trip length is always derived from the date pair, never entered
//! directly. Computation is pure and cheap enough to run on every edit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Duration used when either date is missing
pub const FALLBACK_DAYS: u32 = 7;

/// Shortest trip the planner will produce
pub const MIN_TRIP_DAYS: u32 = 1;

/// Longest trip the planner will produce
pub const MAX_TRIP_DAYS: u32 = 30;

/// Derived trip length for a date pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripLength {
    /// Inclusive day count, clamped to `[MIN_TRIP_DAYS, MAX_TRIP_DAYS]`
    pub days: u32,
    /// Full English month name of the start date; empty when dates are missing
    pub month: String,
    /// Pre-clamp inclusive day count, for callers that want to warn about it
    pub raw_days: i64,
}

impl TripLength {
    /// True when the raw range was longer than the planner supports
    pub fn exceeds_maximum(&self) -> bool {
        self.raw_days > i64::from(MAX_TRIP_DAYS)
    }
}

/// Full English month name of a date (e.g. "June")
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Compute the clamped trip length and month label for a date pair.
///
/// Both endpoints count, so a same-day trip is 1 day. Inverted ranges use
/// the absolute difference rather than going negative. Clamping to
/// `[1, 30]` is silent normalization, not an error.
pub fn compute(start: Option<NaiveDate>, end: Option<NaiveDate>) -> TripLength {
    let (Some(start), Some(end)) = (start, end) else {
        return TripLength {
            days: FALLBACK_DAYS,
            month: String::new(),
            raw_days: i64::from(FALLBACK_DAYS),
        };
    };

    let raw_days = (end - start).num_days().abs() + 1;
    let days = raw_days.clamp(i64::from(MIN_TRIP_DAYS), i64::from(MAX_TRIP_DAYS)) as u32;

    TripLength {
        days,
        month: month_name(start),
        raw_days,
    }
}

/// The date pair a trip is planned around
///
/// `travel_month` is derived from `start_date` and recomputed on every start
/// edit; changing only the end date leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelDates {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travel_month: String,
}

impl TravelDates {
    /// Set both dates at once, recomputing the month label
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            travel_month: month_name(start),
        }
    }

    /// Set the start date and recompute `travel_month`
    pub fn set_start(&mut self, date: NaiveDate) {
        self.start_date = Some(date);
        self.travel_month = month_name(date);
    }

    /// Set the end date; `travel_month` is unaffected
    pub fn set_end(&mut self, date: NaiveDate) {
        self.end_date = Some(date);
    }

    /// True when both endpoints are present
    pub fn is_complete(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Derived trip length for the current pair
    pub fn length(&self) -> TripLength {
        compute(self.start_date, self.end_date)
    }
}
