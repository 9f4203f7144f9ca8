use super::card::{CardInput, CardReport};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "PayPal")]
    PayPal,
}

/// Details panel shown beneath the method selector.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PaymentPanel {
    Card,
    PayPal,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::PayPal => "PayPal",
        }
    }

    pub fn panel(&self) -> PaymentPanel {
        match self {
            Self::CreditCard | Self::DebitCard => PaymentPanel::Card,
            Self::PayPal => PaymentPanel::PayPal,
        }
    }

    pub fn requires_card(&self) -> bool {
        self.panel() == PaymentPanel::Card
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit Card" => Ok(Self::CreditCard),
            "Debit Card" => Ok(Self::DebitCard),
            "PayPal" => Ok(Self::PayPal),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors on the payment form outside the card fields.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentFormError {
    #[error("Please select a payment method")]
    MethodMissing,
    #[error("You must accept the terms and conditions")]
    TermsNotAccepted,
}

/// State of the payment page form.
///
/// Owned by the caller; nothing here is global, so several forms can be
/// validated side by side.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    method: Option<PaymentMethod>,
    pub card: CardInput,
    pub terms_accepted: bool,
}

/// Result of validating a whole [`PaymentForm`] on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFormReport {
    pub method: Result<PaymentMethod, PaymentFormError>,
    /// Present only when the chosen method pays by card.
    pub card: Option<CardReport>,
    pub terms: Result<(), PaymentFormError>,
}

impl PaymentFormReport {
    pub fn is_valid(&self) -> bool {
        self.method.is_ok()
            && self.terms.is_ok()
            && self.card.as_ref().is_none_or(CardReport::is_valid)
    }

    /// Every message to display, tagged with the field it belongs to.
    pub fn errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();
        if let Err(err) = &self.method {
            errors.push(("payment_method", err.to_string()));
        }
        if let Some(card) = &self.card {
            for (field, verdict) in card.fields() {
                if let Some(reason) = verdict.reason() {
                    errors.push((field, reason));
                }
            }
        }
        if let Err(err) = &self.terms {
            errors.push(("terms", err.to_string()));
        }
        errors
    }
}

impl PaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> Option<PaymentMethod> {
        self.method
    }

    /// Selects a method and returns the panel that should now be visible.
    pub fn select_method(&mut self, method: Option<PaymentMethod>) -> Option<PaymentPanel> {
        self.method = method;
        self.visible_panel()
    }

    pub fn visible_panel(&self) -> Option<PaymentPanel> {
        self.method.map(|m| m.panel())
    }

    /// Validates the form for submission. No check short-circuits another.
    pub fn validate(&self, today: NaiveDate) -> PaymentFormReport {
        let method = self.method.ok_or(PaymentFormError::MethodMissing);
        let card = self
            .method
            .filter(PaymentMethod::requires_card)
            .map(|_| self.card.validate_for_submission(today));
        let terms = if self.terms_accepted {
            Ok(())
        } else {
            Err(PaymentFormError::TermsNotAccepted)
        };
        PaymentFormReport {
            method,
            card,
            terms,
        }
    }
}
