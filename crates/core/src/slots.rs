//! Slot computation.
//!
//! Given a date's resolved open intervals and the already-booked intervals,
//! produces the ordered list of bookable start times for a service duration.
//!
//! Candidates are duration-packed: each open interval `[s, e)` yields
//! `s, s+d, s+2d, ...` while the whole slot still fits. A 45-minute window
//! offers exactly one 30-minute slot, never two overlapping offset options,
//! so no pair of proposed slots can straddle the same busy period.
//!
//! The function is pure — the booking commit path calls it a second time
//! against fresh state to guard against races, and must see identical
//! behavior for identical inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::{TimeInterval, TimeOfDay, MINUTES_PER_DAY};

/// A bookable `[start, end)` candidate, duration-matched to a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Computes the valid start times for `date`.
///
/// - past dates yield nothing;
/// - on `today`, candidates must start strictly after `now_time`;
/// - candidates overlapping any booked interval are dropped;
/// - an unusable duration (zero, or longer than a day) yields an empty
///   list rather than an error.
///
/// The result is ascending by start time.
pub fn compute_slots(
    date: NaiveDate,
    duration_minutes: u32,
    open_intervals: &[TimeInterval],
    booked_intervals: &[TimeInterval],
    today: NaiveDate,
    now_time: TimeOfDay,
) -> Vec<Slot> {
    if duration_minutes == 0 || duration_minutes > u32::from(MINUTES_PER_DAY) {
        return Vec::new();
    }
    if date < today {
        return Vec::new();
    }
    let duration = duration_minutes as u16;

    let mut slots = Vec::new();
    for window in open_intervals {
        let mut start = window.start.minutes();
        while start + duration <= window.end.minutes() {
            let (Some(slot_start), Some(slot_end)) = (
                TimeOfDay::from_minutes(start),
                TimeOfDay::from_minutes(start + duration),
            ) else {
                break;
            };
            let candidate = TimeInterval {
                start: slot_start,
                end: slot_end,
            };
            let clashes = booked_intervals.iter().any(|busy| busy.overlaps(&candidate));
            let too_soon = date == today && slot_start <= now_time;
            if !clashes && !too_soon {
                slots.push(Slot {
                    start_time: slot_start,
                    end_time: slot_end,
                });
            }
            start += duration;
        }
    }

    slots.sort_by_key(|slot| slot.start_time);
    slots
}
