use crate::config::ClientConfig;
use crate::domain::availability::{AvailabilityQuery, AvailabilityResult};
use crate::domain::ports::{AvailabilityChecker, TimeSlotSource};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::num::NonZeroU32;
use tracing::debug;

/// Path of the availability endpoint, relative to the server base URL.
pub const CHECK_AVAILABILITY_PATH: &str = "reservations/check-availability";
/// Path of the open time slots endpoint used by the calendar.
pub const TIME_SLOTS_PATH: &str = "reservations/time-slots";

/// Client for the reservation server's availability endpoints.
#[derive(Debug, Clone)]
pub struct HttpAvailabilityChecker {
    client: Client,
    base_url: String,
}

impl HttpAvailabilityChecker {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AvailabilityChecker for HttpAvailabilityChecker {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilityResult> {
        let url = format!("{}/{}", self.base_url, CHECK_AVAILABILITY_PATH);
        debug!(%url, ?query, "checking availability");
        let result = self
            .client
            .get(&url)
            .query(&query.query_pairs())
            .send()
            .await?
            .error_for_status()?
            .json::<AvailabilityResult>()
            .await?;
        Ok(result)
    }
}

#[async_trait]
impl TimeSlotSource for HttpAvailabilityChecker {
    async fn open_slots(&self, date: NaiveDate, party_size: NonZeroU32) -> Result<Vec<String>> {
        let url = format!("{}/{}", self.base_url, TIME_SLOTS_PATH);
        debug!(%url, %date, %party_size, "listing open time slots");
        let slots = self
            .client
            .get(&url)
            .query(&[
                ("date", date.format("%Y-%m-%d").to_string()),
                ("guests", party_size.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<String>>()
            .await?;
        Ok(slots)
    }
}
