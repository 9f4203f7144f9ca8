use crate::config::ResponsePolicy;
use crate::domain::availability::{AvailabilityNotice, AvailabilityResult};
use crate::domain::ports::AvailabilityCheckerBox;
use crate::domain::reservation::{ReservationField, ReservationForm};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// What a field change led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Date, time or party size is still missing; nothing was sent.
    Incomplete,
    /// The slot is free and any earlier notice was cleared.
    Available,
    /// The slot is taken; this notice is now displayed.
    Unavailable(AvailabilityNotice),
    /// A later query was issued or a selection was made, so this response
    /// was dropped.
    Superseded,
    /// The query failed. The failure is logged and the form is left as it was.
    Failed,
}

#[derive(Debug, Default)]
struct Negotiation {
    form: ReservationForm,
    notice: Option<AvailabilityNotice>,
    /// Sequence number below which no answer may be applied any more. Raised
    /// by applied answers and by selecting an alternative.
    applied: u64,
}

/// Mediates between a reservation form and the server's availability check.
///
/// One negotiator serves one form instance; it owns the form values and the
/// notice currently on display. Queries may overlap: each is stamped with a
/// sequence number and the configured [`ResponsePolicy`] decides which
/// answers are applied.
pub struct AvailabilityNegotiator {
    checker: AvailabilityCheckerBox,
    policy: ResponsePolicy,
    issued: AtomicU64,
    state: RwLock<Negotiation>,
}

impl AvailabilityNegotiator {
    /// Creates a negotiator for an empty form.
    ///
    /// # Arguments
    ///
    /// * `checker` - The capability answering availability queries.
    /// * `policy` - How overlapping responses are reconciled.
    pub fn new(checker: AvailabilityCheckerBox, policy: ResponsePolicy) -> Self {
        Self {
            checker,
            policy,
            issued: AtomicU64::new(0),
            state: RwLock::new(Negotiation::default()),
        }
    }

    /// Starts from existing form values, e.g. after a session handoff.
    pub fn with_form(self, form: ReservationForm) -> Self {
        Self {
            state: RwLock::new(Negotiation {
                form,
                ..Negotiation::default()
            }),
            ..self
        }
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Records a change to one of the three watched fields and, when the form
    /// is complete, checks the new slot.
    pub async fn field_changed(
        &self,
        field: ReservationField,
        value: impl Into<String>,
    ) -> CheckOutcome {
        {
            let mut state = self.state.write().await;
            state.form.set(field, value);
        }
        self.refresh().await
    }

    /// Checks the slot currently described by the form.
    pub async fn refresh(&self) -> CheckOutcome {
        let query = {
            let state = self.state.read().await;
            state.form.query()
        };
        let Some(query) = query else {
            return CheckOutcome::Incomplete;
        };

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, ?query, "availability query issued");

        match self.checker.check(&query).await {
            Ok(result) => self.apply(seq, result).await,
            Err(err) => {
                warn!(seq, error = %err, "availability check failed");
                CheckOutcome::Failed
            }
        }
    }

    async fn apply(&self, seq: u64, result: AvailabilityResult) -> CheckOutcome {
        let mut state = self.state.write().await;
        if self.policy == ResponsePolicy::LatestIssued {
            let issued = self.issued.load(Ordering::SeqCst);
            if seq < issued || seq <= state.applied {
                debug!(seq, issued, applied = state.applied, "dropping superseded availability response");
                return CheckOutcome::Superseded;
            }
        }
        state.applied = state.applied.max(seq);
        state.notice = AvailabilityNotice::from_result(&result);
        match &state.notice {
            None => CheckOutcome::Available,
            Some(notice) => CheckOutcome::Unavailable(notice.clone()),
        }
    }

    /// Picks one of the alternatives on the current notice.
    ///
    /// `value` is matched against the 24-hour values the server sent, not the
    /// display labels. On a match the time field takes that value and the
    /// notice is dismissed; no new query is sent, and under
    /// [`ResponsePolicy::LatestIssued`] answers still in flight are dropped
    /// when they arrive. Returns `false` when there is no such alternative.
    pub async fn select_alternative(&self, value: &str) -> bool {
        let mut state = self.state.write().await;
        let Some(slot) = state.notice.as_ref().and_then(|n| n.alternative(value)) else {
            return false;
        };
        let time = slot.value.clone();
        debug!(%time, "alternative slot selected");
        state.form.time = Some(time);
        state.notice = None;
        state.applied = self.issued.load(Ordering::SeqCst);
        true
    }

    /// Closes the notice without changing the form.
    pub async fn dismiss(&self) {
        let mut state = self.state.write().await;
        state.notice = None;
    }

    pub async fn notice(&self) -> Option<AvailabilityNotice> {
        self.state.read().await.notice.clone()
    }

    pub async fn form(&self) -> ReservationForm {
        self.state.read().await.form.clone()
    }
}
