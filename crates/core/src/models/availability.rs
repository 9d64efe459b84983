use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::{self, TimeInterval};

/// A business's recurring weekly hours plus per-date exceptions.
///
/// Weekday keys run 0=Sunday..6=Saturday. An entry in `overrides` replaces
/// the weekly hours for that calendar date entirely; an empty list means
/// closed that day (holidays), a non-empty list means custom hours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessAvailability {
    /// IANA timezone name, e.g. "Asia/Jerusalem". Empty or invalid values
    /// are treated as UTC by the clock helpers.
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub weekly_hours: HashMap<u8, Vec<TimeInterval>>,
    #[serde(default)]
    pub overrides: HashMap<NaiveDate, Vec<TimeInterval>>,
}

impl BusinessAvailability {
    /// Resolved open intervals for a specific date: the date's override if
    /// present, otherwise the weekday's configured hours, otherwise closed.
    /// Always sorted and merged, never an error.
    pub fn open_intervals_for(&self, date: NaiveDate) -> Vec<TimeInterval> {
        if let Some(intervals) = self.overrides.get(&date) {
            return time::normalize(intervals.clone());
        }
        let weekday = date.weekday().num_days_from_sunday() as u8;
        match self.weekly_hours.get(&weekday) {
            Some(intervals) => time::normalize(intervals.clone()),
            None => Vec::new(),
        }
    }
}
