//! Ticketbooth API: HTTP surface and process wiring for the booking service.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
