//! Booking error taxonomy.

use std::fmt;

use thiserror::Error;

use crate::ids::{CustomerId, EventId};

/// A remote collaborator the booking workflow reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    /// The customer directory (local persistence store).
    CustomerDirectory,
    /// The remote inventory service.
    InventoryOracle,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomerDirectory => f.write_str("customer directory"),
            Self::InventoryOracle => f.write_str("inventory oracle"),
        }
    }
}

/// Top-level error type for the booking workflow and its collaborators.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The inbound request is structurally invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// No customer exists for the requested user id.
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The inventory oracle does not know the requested event.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The requested ticket count exceeds the capacity observed at read time.
    #[error("insufficient inventory for event {event_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        /// The event that was queried.
        event_id: EventId,
        /// Tickets requested.
        requested: u32,
        /// Capacity reported by the oracle.
        available: u32,
    },

    /// A read-side collaborator could not be reached, failed, or timed out.
    #[error("{upstream} unavailable: {reason}")]
    UpstreamUnavailable {
        /// Which collaborator failed.
        upstream: Upstream,
        /// Human-readable cause.
        reason: String,
    },

    /// The event publisher rejected the booking event or did not acknowledge it in time.
    #[error("failed to publish booking event: {0}")]
    PublishFailure(String),
}

impl BookingError {
    /// Shorthand for an `UpstreamUnavailable` error.
    pub fn upstream(upstream: Upstream, reason: impl fmt::Display) -> Self {
        Self::UpstreamUnavailable {
            upstream,
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for infrastructure failures a caller may safely retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::PublishFailure(_)
        )
    }
}
