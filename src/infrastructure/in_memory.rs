use crate::domain::availability::{AvailabilityQuery, AvailabilityResult};
use crate::domain::ports::{AvailabilityChecker, SessionStore};
use crate::error::{DineError, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// A session store backed by a shared `HashMap`.
///
/// Clones share the same map, which is how a calendar page and a
/// reservation page see the same session.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().await;
        values.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        let mut values = self.values.write().await;
        values.remove(key);
    }
}

/// An availability checker answering from a fixed table of slots.
///
/// Slots not in the table are reported available. Slots marked as failing
/// return an error, which stands in for a dropped connection. Every call is
/// counted.
#[derive(Default, Clone)]
pub struct ScriptedAvailabilityChecker {
    answers: Arc<RwLock<HashMap<(NaiveDate, NaiveTime), Option<AvailabilityResult>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedAvailabilityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn answer(&self, date: NaiveDate, time: NaiveTime, result: AvailabilityResult) {
        let mut answers = self.answers.write().await;
        answers.insert((date, time), Some(result));
    }

    pub async fn fail(&self, date: NaiveDate, time: NaiveTime) {
        let mut answers = self.answers.write().await;
        answers.insert((date, time), None);
    }

    /// Number of queries received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvailabilityChecker for ScriptedAvailabilityChecker {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilityResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answers = self.answers.read().await;
        match answers.get(&(query.date, query.time)) {
            Some(Some(result)) => Ok(result.clone()),
            Some(None) => Err(DineError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "scripted failure",
            ))),
            None => Ok(AvailabilityResult::available()),
        }
    }
}
