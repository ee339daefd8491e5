//! Application layer for the booking context.

pub mod orchestrator;
