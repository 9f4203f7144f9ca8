#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use dinebook::domain::availability::{AvailabilityQuery, AvailabilityResult};
use dinebook::domain::ports::AvailabilityChecker;
use dinebook::error::{DineError, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};

pub fn reservation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 7).unwrap()
}

pub fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Checker whose answers are released by the test, one slot at a time.
///
/// Each `check` call reports the requested time on the `started` channel and
/// then waits for the answer sent through that slot's gate. Slots without a
/// gate answer "available" immediately.
pub struct GatedChecker {
    gates: Mutex<HashMap<NaiveTime, oneshot::Receiver<AvailabilityResult>>>,
    started: mpsc::UnboundedSender<NaiveTime>,
}

impl GatedChecker {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NaiveTime>) {
        let (started, started_rx) = mpsc::unbounded_channel();
        let checker = Self {
            gates: Mutex::new(HashMap::new()),
            started,
        };
        (checker, started_rx)
    }

    /// Installs a gate for `time` and returns the sender that releases it.
    pub fn gate(&self, time: NaiveTime) -> oneshot::Sender<AvailabilityResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(time, rx);
        tx
    }
}

#[async_trait]
impl AvailabilityChecker for GatedChecker {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilityResult> {
        let gate = self.gates.lock().unwrap().remove(&query.time);
        let _ = self.started.send(query.time);
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| DineError::InvalidInput("gate dropped".to_string())),
            None => Ok(AvailabilityResult::available()),
        }
    }
}
