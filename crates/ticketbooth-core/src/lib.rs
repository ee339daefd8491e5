//! Ticketbooth Core: booking domain types and collaborator ports.
//!
//! This crate defines the value types the booking workflow passes around and
//! the traits its three collaborators (customer directory, inventory oracle,
//! event publisher) implement. It contains no infrastructure code.

pub mod clock;
pub mod customer;
pub mod error;
pub mod event;
pub mod ids;
pub mod inventory;
