//! Domain layer for the booking context.

pub mod commands;
pub mod pricing;
