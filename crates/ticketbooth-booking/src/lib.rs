//! Ticketbooth: booking orchestration bounded context.
//!
//! Validates a booking request against the customer directory and the
//! inventory oracle, prices it, and hands the resulting event to the
//! event publisher.

pub mod application;
pub mod domain;
