//! Bookable half-hour slots and the availability seam.
//!
//! Real availability belongs to the backend. Until it exposes it, the
//! [`FixedScheduleOracle`] serves a placeholder day from 08:00 to 17:30 where
//! slots alternate between free and taken. A real oracle would load the
//! day's appointments (`appointments::by_date_range`) and drop the slots
//! their service durations cover.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub const SLOT_MINUTES: u32 = 30;
const FIRST_SLOT_HOUR: u32 = 8;
const SLOTS_PER_DAY: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// "HH:MM"
    pub time: String,
    pub available: bool,
}

impl ScheduleSlot {
    pub fn start(&self) -> Option<NaiveTime> {
        parse_slot_time(&self.time)
    }
}

pub fn parse_slot_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M").ok()
}

pub fn format_slot_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// The placeholder day: 20 slots, 08:00..=17:30, every other one taken.
pub fn placeholder_schedule() -> Vec<ScheduleSlot> {
    (0..SLOTS_PER_DAY)
        .map(|i| {
            let minutes = FIRST_SLOT_HOUR * 60 + i * SLOT_MINUTES;
            ScheduleSlot {
                time: format!("{:02}:{:02}", minutes / 60, minutes % 60),
                available: i % 2 == 0,
            }
        })
        .collect()
}

/// Exact "HH:MM" match; a time not in the list is unavailable.
pub fn lookup_availability(slots: &[ScheduleSlot], time: &str) -> bool {
    slots
        .iter()
        .find(|slot| slot.time == time)
        .is_some_and(|slot| slot.available)
}

/// Source of bookable slots for a day.
pub trait AvailabilityOracle {
    fn slots_for(&self, date: NaiveDate) -> Vec<ScheduleSlot>;

    fn is_available(&self, date: NaiveDate, time: &str) -> bool {
        lookup_availability(&self.slots_for(date), time)
    }
}

/// Same placeholder schedule for every date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedScheduleOracle {
    slots: Vec<ScheduleSlot>,
}

impl FixedScheduleOracle {
    pub fn new() -> Self {
        Self {
            slots: placeholder_schedule(),
        }
    }

    pub fn with_slots(slots: Vec<ScheduleSlot>) -> Self {
        Self { slots }
    }
}

impl AvailabilityOracle for FixedScheduleOracle {
    fn slots_for(&self, _date: NaiveDate) -> Vec<ScheduleSlot> {
        self.slots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_schedule_shape() {
        let slots = placeholder_schedule();
        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0], ScheduleSlot { time: "08:00".to_string(), available: true });
        assert_eq!(slots[1], ScheduleSlot { time: "08:30".to_string(), available: false });
        assert_eq!(slots[19], ScheduleSlot { time: "17:30".to_string(), available: false });
        assert!(slots.iter().all(|s| s.start().is_some()));
    }

    #[test]
    fn test_lookup_matches_slot_flag() {
        let slots = placeholder_schedule();
        for slot in &slots {
            assert_eq!(lookup_availability(&slots, &slot.time), slot.available);
        }
    }

    #[test]
    fn test_unknown_time_is_unavailable() {
        let slots = placeholder_schedule();
        assert!(!lookup_availability(&slots, "07:30"));
        assert!(!lookup_availability(&slots, "8:00"));
        assert!(!lookup_availability(&slots, ""));
    }

    #[test]
    fn test_fixed_oracle_ignores_date() {
        let oracle = FixedScheduleOracle::new();
        let monday = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(oracle.slots_for(monday), oracle.slots_for(sunday));
        assert!(oracle.is_available(monday, "10:00"));
        assert!(!oracle.is_available(monday, "10:30"));
    }

    #[test]
    fn test_slot_time_round_trip_format() {
        let time = parse_slot_time("09:30").unwrap();
        assert_eq!(format_slot_time(time), "09:30");
        assert!(parse_slot_time("25:00").is_none());
    }
}
