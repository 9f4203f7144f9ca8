use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::num::NonZeroU32;

/// Shown in place of the server's suggestion when it sends none.
pub const FALLBACK_SUGGESTION: &str = "Please select a different time.";

/// One availability question: can `party_size` guests sit at `time` on `date`?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: NonZeroU32,
}

impl AvailabilityQuery {
    pub fn new(date: NaiveDate, time: NaiveTime, party_size: NonZeroU32) -> Self {
        Self {
            date,
            time,
            party_size,
        }
    }

    /// Query-string parameters as the reservation endpoint expects them:
    /// ISO date, `HH:MM` time, and the guest count.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("time", self.time.format("%H:%M").to_string()),
            ("guests", self.party_size.to_string()),
        ]
    }
}

/// Server answer to an [`AvailabilityQuery`].
///
/// `alternatives` keeps the order the server sent; it is shown to the user
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alternatives: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let alternatives = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(alternatives.unwrap_or_default())
}

impl AvailabilityResult {
    pub fn available() -> Self {
        Self {
            is_available: true,
            suggestion: None,
            alternatives: Vec::new(),
        }
    }

    pub fn unavailable(suggestion: Option<String>, alternatives: Vec<String>) -> Self {
        Self {
            is_available: false,
            suggestion,
            alternatives,
        }
    }
}

/// Formats a 24-hour `HH:MM` value for display: `18:30` becomes `6:30 PM`,
/// `00:15` becomes `12:15 AM`. The minutes part is kept verbatim. Values
/// without a numeric hour are returned unchanged.
pub fn to_12_hour_label(value: &str) -> String {
    let (hours, minutes) = value.split_once(':').unwrap_or((value, ""));
    let Ok(hour) = hours.trim().parse::<u32>() else {
        return value.to_string();
    };
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{} {}", display_hour, minutes, suffix)
}

/// An alternative slot offered in a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeSlot {
    /// The 24-hour value exactly as the server sent it.
    pub value: String,
    pub label: String,
}

impl AlternativeSlot {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let label = to_12_hour_label(&value);
        Self { value, label }
    }
}

/// The dismissible "time slot unavailable" notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityNotice {
    pub message: String,
    pub alternatives: Vec<AlternativeSlot>,
}

impl AvailabilityNotice {
    /// Builds the notice for an unavailable result; `None` when the slot is free.
    pub fn from_result(result: &AvailabilityResult) -> Option<Self> {
        if result.is_available {
            return None;
        }
        let message = result
            .suggestion
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_SUGGESTION)
            .to_string();
        let alternatives = result
            .alternatives
            .iter()
            .map(|value| AlternativeSlot::new(value.as_str()))
            .collect();
        Some(Self {
            message,
            alternatives,
        })
    }

    /// Finds an alternative by its 24-hour value.
    pub fn alternative(&self, value: &str) -> Option<&AlternativeSlot> {
        self.alternatives.iter().find(|slot| slot.value == value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.alternatives.iter().map(|s| s.label.as_str()).collect()
    }
}
