use super::availability::{AvailabilityQuery, AvailabilityResult};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::num::NonZeroU32;

/// Server-side capability that decides whether a slot can be booked.
#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilityResult>;
}

/// Lists the `HH:MM` times the server still has room for on a date.
#[async_trait]
pub trait TimeSlotSource: Send + Sync {
    async fn open_slots(&self, date: NaiveDate, party_size: NonZeroU32) -> Result<Vec<String>>;
}

/// Session-scoped key/value storage used to hand values between pages.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
    async fn remove(&self, key: &str);
}

pub type AvailabilityCheckerBox = Box<dyn AvailabilityChecker>;
pub type TimeSlotSourceBox = Box<dyn TimeSlotSource>;
pub type SessionStoreBox = Box<dyn SessionStore>;
