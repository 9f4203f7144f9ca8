//! The week-ahead availability grid shown on the reservations landing page.
//!
//! Picking an open cell hands the date and time to the booking form through
//! the session (see [`ReservationForm::apply_handoff`]).
//!
//! [`ReservationForm::apply_handoff`]: super::reservation::ReservationForm::apply_handoff

use super::availability::to_12_hour_label;
use super::ports::SessionStore;
use super::reservation::{SELECTED_DATE_KEY, SELECTED_TIME_KEY};
use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;
use tracing::debug;

/// Number of days shown, starting today.
pub const CALENDAR_DAYS: u64 = 7;

/// Columns of the grid, in 24-hour form.
pub const CALENDAR_SLOTS: [&str; 10] = [
    "17:00", "17:30", "18:00", "18:30", "19:00", "19:30", "20:00", "20:30", "21:00", "21:30",
];

/// Party size the open slots are requested for.
pub const CALENDAR_PARTY_SIZE: u32 = 4;

/// Which booking form a calendar click leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRoute {
    Member,
    Guest,
}

impl BookingRoute {
    pub fn for_visitor(signed_in: bool) -> Self {
        if signed_in { Self::Member } else { Self::Guest }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Member => "/reservations/new",
            Self::Guest => "/reservations/guest",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotSelectionError {
    #[error("{date} {time} is not on the calendar")]
    NotListed { date: NaiveDate, time: String },
    #[error("{date} {time} is not available")]
    Unavailable { date: NaiveDate, time: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub time: &'static str,
    pub available: bool,
}

impl CalendarCell {
    pub fn label(&self) -> String {
        to_12_hour_label(self.time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub cells: Vec<CalendarCell>,
}

impl CalendarDay {
    /// Short weekday name, e.g. `Sat`.
    pub fn weekday(&self) -> String {
        self.date.format("%a").to_string()
    }

    pub fn day_number(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityCalendar {
    days: Vec<CalendarDay>,
}

impl AvailabilityCalendar {
    /// Lays out [`CALENDAR_DAYS`] rows of [`CALENDAR_SLOTS`] starting at
    /// `today`. A cell is open when its time is among `open_slots`; the
    /// server is asked once, so the same times are open on every row.
    pub fn build(today: NaiveDate, open_slots: &[String]) -> Self {
        let days = (0..CALENDAR_DAYS)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .map(|date| CalendarDay {
                date,
                cells: CALENDAR_SLOTS
                    .iter()
                    .map(|&time| CalendarCell {
                        date,
                        time,
                        available: open_slots.iter().any(|slot| slot == time),
                    })
                    .collect(),
            })
            .collect();
        Self { days }
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn cell(&self, date: NaiveDate, time: &str) -> Option<&CalendarCell> {
        self.days
            .iter()
            .find(|day| day.date == date)?
            .cells
            .iter()
            .find(|cell| cell.time == time)
    }

    /// Handles a click on a cell: stores the slot for the booking form and
    /// returns the form to open. Only open cells can be picked.
    pub async fn select_slot(
        &self,
        date: NaiveDate,
        time: &str,
        signed_in: bool,
        session: &dyn SessionStore,
    ) -> Result<BookingRoute, SlotSelectionError> {
        let Some(cell) = self.cell(date, time) else {
            return Err(SlotSelectionError::NotListed {
                date,
                time: time.to_string(),
            });
        };
        if !cell.available {
            return Err(SlotSelectionError::Unavailable {
                date,
                time: time.to_string(),
            });
        }
        session
            .set(SELECTED_DATE_KEY, date.format("%Y-%m-%d").to_string())
            .await;
        session.set(SELECTED_TIME_KEY, cell.time.to_string()).await;
        let route = BookingRoute::for_visitor(signed_in);
        debug!(%date, time = cell.time, path = route.path(), "calendar slot selected");
        Ok(route)
    }
}
