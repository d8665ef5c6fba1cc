//! Date picker + slot list state machine.
//!
//! ```text
//! NoDateSelected --pick date--> DateSelected --pick slot--> SlotSelected
//!        ^                           |                           |
//!        +-------- clear date -------+------------ clear --------+
//! ```
//!
//! Layout and auto-scroll are pure functions of the state so the component
//! only renders what they return.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::schedule::{AvailabilityOracle, ScheduleSlot};

/// Delay before scrolling a newly shown panel into view, giving layout time to reflow.
pub const SCROLL_DELAY_MS: u32 = 100;
/// Viewports narrower than this stack the panels vertically.
pub const SMALL_VIEWPORT_PX: f64 = 1024.0;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalendarState {
    #[default]
    NoDateSelected,
    DateSelected {
        date: NaiveDate,
    },
    SlotSelected {
        date: NaiveDate,
        slot: ScheduleSlot,
    },
}

impl CalendarState {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarState::NoDateSelected => None,
            CalendarState::DateSelected { date } | CalendarState::SlotSelected { date, .. } => {
                Some(*date)
            }
        }
    }

    pub fn slot(&self) -> Option<&ScheduleSlot> {
        match self {
            CalendarState::SlotSelected { slot, .. } => Some(slot),
            _ => None,
        }
    }

    /// Picking a date (or the same date again) drops any chosen slot;
    /// `None` is the picker's deselect.
    pub fn select_date(&self, date: Option<NaiveDate>) -> CalendarState {
        match date {
            Some(date) => CalendarState::DateSelected { date },
            None => CalendarState::NoDateSelected,
        }
    }

    /// Choose a slot by time. Ignored while no date is selected. Times not
    /// offered by the oracle are kept but marked unavailable.
    pub fn select_slot(&self, time: &str, oracle: &dyn AvailabilityOracle) -> CalendarState {
        match self.date() {
            Some(date) => CalendarState::SlotSelected {
                date,
                slot: ScheduleSlot {
                    time: time.to_string(),
                    available: oracle.is_available(date, time),
                },
            },
            None => self.clone(),
        }
    }
}

/// Horizontal placement of the date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPosition {
    Centered,
    /// Shifted right of center while only the slot list is showing
    Offset,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarLayout {
    pub picker: PickerPosition,
    pub slots_visible: bool,
    pub summary_visible: bool,
}

impl CalendarLayout {
    pub fn for_state(state: &CalendarState) -> Self {
        match state {
            CalendarState::NoDateSelected => Self {
                picker: PickerPosition::Centered,
                slots_visible: false,
                summary_visible: false,
            },
            CalendarState::DateSelected { .. } => Self {
                picker: PickerPosition::Offset,
                slots_visible: true,
                summary_visible: false,
            },
            CalendarState::SlotSelected { .. } => Self {
                picker: PickerPosition::Left,
                slots_visible: true,
                summary_visible: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    SlotPanel,
    SummaryPanel,
}

/// Panel to bring into view after a transition on a small viewport.
pub fn scroll_target(
    previous: &CalendarState,
    next: &CalendarState,
    viewport_width: f64,
) -> Option<ScrollTarget> {
    if viewport_width >= SMALL_VIEWPORT_PX || previous == next {
        return None;
    }
    match next {
        CalendarState::SlotSelected { .. } => Some(ScrollTarget::SummaryPanel),
        CalendarState::DateSelected { .. } if previous.date() != next.date() => {
            Some(ScrollTarget::SlotPanel)
        }
        _ => None,
    }
}

/// Sunday-first weeks of a month; days outside the month are `None`.
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut day = first;
    while day.month() == month {
        let column = day.weekday().num_days_from_sunday() as usize;
        week[column] = Some(day);
        if day.weekday() == Weekday::Sat {
            weeks.push(week);
            week = [None; 7];
        }
        day += Duration::days(1);
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

/// (year, month) shifted by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::FixedScheduleOracle;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_happy_path_transitions() {
        let oracle = FixedScheduleOracle::new();
        let state = CalendarState::default();
        assert_eq!(state, CalendarState::NoDateSelected);

        let state = state.select_date(Some(june(10)));
        assert_eq!(state, CalendarState::DateSelected { date: june(10) });

        let state = state.select_slot("08:00", &oracle);
        assert_eq!(state.slot().map(|s| s.available), Some(true));
        assert_eq!(state.date(), Some(june(10)));
    }

    #[test]
    fn test_clearing_date_from_any_state() {
        let oracle = FixedScheduleOracle::new();
        let selected = CalendarState::default()
            .select_date(Some(june(10)))
            .select_slot("09:00", &oracle);
        assert_eq!(selected.select_date(None), CalendarState::NoDateSelected);
        assert_eq!(
            CalendarState::DateSelected { date: june(3) }.select_date(None),
            CalendarState::NoDateSelected
        );
    }

    #[test]
    fn test_slot_needs_a_date() {
        let oracle = FixedScheduleOracle::new();
        let state = CalendarState::default().select_slot("08:00", &oracle);
        assert_eq!(state, CalendarState::NoDateSelected);
    }

    #[test]
    fn test_unknown_slot_is_unavailable() {
        let oracle = FixedScheduleOracle::new();
        let state = CalendarState::DateSelected { date: june(10) }.select_slot("18:00", &oracle);
        assert_eq!(state.slot().map(|s| s.available), Some(false));
    }

    #[test]
    fn test_layout_follows_state() {
        let none = CalendarLayout::for_state(&CalendarState::NoDateSelected);
        assert_eq!(none.picker, PickerPosition::Centered);
        assert!(!none.slots_visible && !none.summary_visible);

        let date = CalendarLayout::for_state(&CalendarState::DateSelected { date: june(1) });
        assert_eq!(date.picker, PickerPosition::Offset);
        assert!(date.slots_visible && !date.summary_visible);

        let slot = CalendarLayout::for_state(&CalendarState::SlotSelected {
            date: june(1),
            slot: ScheduleSlot { time: "08:00".to_string(), available: true },
        });
        assert_eq!(slot.picker, PickerPosition::Left);
        assert!(slot.summary_visible);
    }

    #[test]
    fn test_scroll_only_on_small_viewports() {
        let oracle = FixedScheduleOracle::new();
        let none = CalendarState::NoDateSelected;
        let date = none.select_date(Some(june(10)));
        let slot = date.select_slot("08:00", &oracle);

        assert_eq!(scroll_target(&none, &date, 800.0), Some(ScrollTarget::SlotPanel));
        assert_eq!(scroll_target(&date, &slot, 800.0), Some(ScrollTarget::SummaryPanel));
        assert_eq!(scroll_target(&none, &date, 1280.0), None);
        assert_eq!(scroll_target(&slot, &none, 800.0), None);
        assert_eq!(scroll_target(&date, &date.clone(), 800.0), None);
    }

    #[test]
    fn test_month_grid_june_2025() {
        let weeks = month_grid(2025, 6);
        // June 1st 2025 is a Sunday, June 30th a Monday
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], Some(june(1)));
        assert_eq!(weeks[4][1], Some(june(30)));
        assert_eq!(weeks[4][2], None);
        let days = weeks.iter().flatten().filter(|d| d.is_some()).count();
        assert_eq!(days, 30);
    }

    #[test]
    fn test_month_grid_leading_blanks() {
        // May 1st 2025 is a Thursday
        let weeks = month_grid(2025, 5);
        assert!(weeks[0][..4].iter().all(Option::is_none));
        assert_eq!(weeks[0][4], NaiveDate::from_ymd_opt(2025, 5, 1));
        assert!(month_grid(2025, 13).is_empty());
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2025, 12, 1), (2026, 1));
        assert_eq!(shift_month(2025, 1, -1), (2024, 12));
        assert_eq!(shift_month(2025, 6, 0), (2025, 6));
    }
}
