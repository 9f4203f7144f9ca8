//! Domain layer: form rules and the value types exchanged with the server.
//!
//! Nothing here touches the network. External capabilities are reached
//! through the traits in [`ports`].

pub mod availability;
pub mod calendar;
pub mod card;
pub mod loyalty;
pub mod order;
pub mod payment;
pub mod ports;
pub mod reservation;
pub mod status;
