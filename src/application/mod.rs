//! Application layer orchestrating the reservation forms.
//!
//! This module defines the `AvailabilityNegotiator`, which turns form field
//! changes into availability queries and keeps the unavailability notice in
//! step with the answers. Every form variant (guest, member, general) drives
//! the same negotiator.

pub mod negotiator;
