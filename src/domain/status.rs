use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bootstrap contextual colour of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
}

impl BadgeColor {
    pub fn css_suffix(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A status that can be displayed as a badge.
pub trait StatusBadge {
    fn label(&self) -> &'static str;
    fn color(&self) -> BadgeColor;
}

/// Label and colour for a badge, including the fallback for statuses the
/// client does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub color: BadgeColor,
}

impl Badge {
    pub fn unknown() -> Self {
        Self {
            label: "UNKNOWN".to_string(),
            color: BadgeColor::Secondary,
        }
    }

    pub fn of<S: StatusBadge>(status: &S) -> Self {
        Self {
            label: status.label().to_string(),
            color: status.color(),
        }
    }

    /// Parses a wire status; anything unrecognised becomes the unknown badge.
    pub fn parse<S: StatusBadge + FromStr>(raw: &str) -> Self {
        raw.parse::<S>()
            .map(|status| Self::of(&status))
            .unwrap_or_else(|_| Self::unknown())
    }
}

macro_rules! wire_status {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(format!("unknown {}: {}", stringify!($name), other)),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

wire_status!(ReservationStatus {
    Pending => "PENDING",
    Confirmed => "CONFIRMED",
    Cancelled => "CANCELLED",
    Completed => "COMPLETED",
    NoShow => "NO_SHOW",
});

impl StatusBadge for ReservationStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
            Self::NoShow => "NO_SHOW",
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            Self::Pending => BadgeColor::Warning,
            Self::Confirmed => BadgeColor::Success,
            Self::Cancelled => BadgeColor::Danger,
            Self::Completed => BadgeColor::Primary,
            Self::NoShow => BadgeColor::Secondary,
        }
    }
}

/// Banquet hall booking approval state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

wire_status!(BookingStatus {
    Pending => "PENDING",
    Approved => "APPROVED",
    Rejected => "REJECTED",
});

impl StatusBadge for BookingStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            Self::Pending => BadgeColor::Warning,
            Self::Approved => BadgeColor::Success,
            Self::Rejected => BadgeColor::Danger,
        }
    }
}

/// Order state on the kitchen board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KitchenStatus {
    Pending,
    InPreparation,
    Ready,
    Completed,
}

wire_status!(KitchenStatus {
    Pending => "PENDING",
    InPreparation => "IN_PREPARATION",
    Ready => "READY",
    Completed => "COMPLETED",
});

impl StatusBadge for KitchenStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InPreparation => "PREPARING",
            Self::Ready => "READY",
            Self::Completed => "COMPLETED",
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            Self::Pending => BadgeColor::Warning,
            Self::InPreparation => BadgeColor::Info,
            Self::Ready => BadgeColor::Success,
            Self::Completed => BadgeColor::Primary,
        }
    }
}
