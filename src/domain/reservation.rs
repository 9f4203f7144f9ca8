use super::availability::AvailabilityQuery;
use super::ports::SessionStore;
use chrono::{Days, NaiveDate, NaiveTime};
use regex::Regex;
use std::num::NonZeroU32;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// Session keys written by the calendar view when a slot is picked.
pub const SELECTED_DATE_KEY: &str = "selectedDate";
pub const SELECTED_TIME_KEY: &str = "selectedTime";

/// How far ahead a reservation may be made.
pub const BOOKING_WINDOW_DAYS: u64 = 30;

/// Parties of this size or larger are booked as group reservations.
pub const GROUP_MIN_GUESTS: u32 = 8;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("fail to create the email pattern")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("fail to create the phone pattern"));

pub fn is_group_reservation(guests: u32) -> bool {
    guests >= GROUP_MIN_GUESTS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationField {
    Date,
    Time,
    Guests,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationDateError {
    #[error("Reservation date cannot be in the past")]
    InPast,
    #[error("Reservations can be made at most 30 days in advance")]
    TooFarAhead,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationFieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid date")]
    DateFormat,
    #[error(transparent)]
    Date(#[from] ReservationDateError),
    #[error("Please select a valid time")]
    TimeFormat,
    #[error("Please select the number of guests")]
    Guests,
    #[error("Please enter a valid email address")]
    Email,
    #[error("Please enter a valid 10-digit phone number")]
    Phone,
    #[error("You must accept the terms and conditions")]
    TermsNotAccepted,
}

/// Earliest and latest bookable dates relative to `today`.
pub fn booking_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let latest = today
        .checked_add_days(Days::new(BOOKING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    (today, latest)
}

pub fn validate_reservation_date(
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ReservationDateError> {
    let (earliest, latest) = booking_window(today);
    if date < earliest {
        Err(ReservationDateError::InPast)
    } else if date > latest {
        Err(ReservationDateError::TooFarAhead)
    } else {
        Ok(())
    }
}

/// The date/time/party-size fields shared by the guest, member and general
/// reservation forms. Values are kept as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    pub date: Option<String>,
    pub time: Option<String>,
    pub guests: Option<String>,
}

fn populated(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required(value: &Option<String>) -> Result<&str, ReservationFieldError> {
    populated(value).ok_or(ReservationFieldError::Required)
}

/// Contact fields that only the guest form asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub terms_accepted: bool,
}

impl GuestContact {
    pub fn validate(&self) -> ContactReport {
        let name = required(&self.name).map(|_| ());
        let email = required(&self.email).and_then(|email| {
            if EMAIL_PATTERN.is_match(email) {
                Ok(())
            } else {
                Err(ReservationFieldError::Email)
            }
        });
        let phone = required(&self.phone).and_then(|phone| {
            if PHONE_PATTERN.is_match(phone) {
                Ok(())
            } else {
                Err(ReservationFieldError::Phone)
            }
        });
        let terms = if self.terms_accepted {
            Ok(())
        } else {
            Err(ReservationFieldError::TermsNotAccepted)
        };
        ContactReport {
            name,
            email,
            phone,
            terms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReport {
    pub name: Result<(), ReservationFieldError>,
    pub email: Result<(), ReservationFieldError>,
    pub phone: Result<(), ReservationFieldError>,
    pub terms: Result<(), ReservationFieldError>,
}

impl ContactReport {
    fn fields(&self) -> [(&'static str, Result<(), ReservationFieldError>); 4] {
        [
            ("name", self.name),
            ("email", self.email),
            ("phone", self.phone),
            ("terms", self.terms),
        ]
    }
}

/// Result of validating a reservation form on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationReport {
    pub date: Result<NaiveDate, ReservationFieldError>,
    pub time: Result<NaiveTime, ReservationFieldError>,
    pub guests: Result<NonZeroU32, ReservationFieldError>,
    /// Present for guest bookings.
    pub contact: Option<ContactReport>,
}

impl ReservationReport {
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Whether the party is large enough to be booked as a group.
    pub fn is_group(&self) -> bool {
        self.guests
            .is_ok_and(|guests| is_group_reservation(guests.get()))
    }

    /// Every message to display, tagged with the field it belongs to.
    pub fn errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();
        if let Err(err) = &self.date {
            errors.push(("date", err.to_string()));
        }
        if let Err(err) = &self.time {
            errors.push(("time", err.to_string()));
        }
        if let Err(err) = &self.guests {
            errors.push(("guests", err.to_string()));
        }
        if let Some(contact) = &self.contact {
            for (field, result) in contact.fields() {
                if let Err(err) = result {
                    errors.push((field, err.to_string()));
                }
            }
        }
        errors
    }
}

impl ReservationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ReservationField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            ReservationField::Date => self.date = value,
            ReservationField::Time => self.time = value,
            ReservationField::Guests => self.guests = value,
        }
    }

    pub fn is_complete(&self) -> bool {
        populated(&self.date).is_some()
            && populated(&self.time).is_some()
            && populated(&self.guests).is_some()
    }

    /// The availability query for the current values, once all three fields
    /// are filled in with parseable values.
    pub fn query(&self) -> Option<AvailabilityQuery> {
        let (date, time, guests) = (
            populated(&self.date)?,
            populated(&self.time)?,
            populated(&self.guests)?,
        );
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        let time = NaiveTime::parse_from_str(time, "%H:%M").ok();
        let guests = guests.parse::<u32>().ok().and_then(NonZeroU32::new);
        match (date, time, guests) {
            (Some(date), Some(time), Some(guests)) => {
                Some(AvailabilityQuery::new(date, time, guests))
            }
            _ => {
                debug!(form = ?self, "reservation fields do not form a query");
                None
            }
        }
    }

    /// Validates the form for submission. Member bookings pass no contact
    /// details; guest bookings pass theirs. No check short-circuits another.
    pub fn validate(&self, today: NaiveDate, contact: Option<&GuestContact>) -> ReservationReport {
        let date = required(&self.date).and_then(|date| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| ReservationFieldError::DateFormat)?;
            validate_reservation_date(date, today)?;
            Ok(date)
        });
        let time = required(&self.time).and_then(|time| {
            NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| ReservationFieldError::TimeFormat)
        });
        let guests = required(&self.guests).and_then(|guests| {
            guests
                .parse::<u32>()
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or(ReservationFieldError::Guests)
        });
        ReservationReport {
            date,
            time,
            guests,
            contact: contact.map(GuestContact::validate),
        }
    }

    /// Pre-fills date and time from a calendar selection. Both keys are
    /// removed afterwards, present or not, so a later visit starts clean.
    pub async fn apply_handoff(&mut self, session: &dyn SessionStore) {
        if let Some(date) = session.get(SELECTED_DATE_KEY).await {
            self.date = Some(date);
        }
        if let Some(time) = session.get(SELECTED_TIME_KEY).await {
            self.time = Some(time);
        }
        session.remove(SELECTED_DATE_KEY).await;
        session.remove(SELECTED_TIME_KEY).await;
    }
}
