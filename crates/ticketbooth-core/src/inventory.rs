//! Inventory oracle port.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::ids::EventId;

/// Point-in-time snapshot of an event's remaining capacity and ticket price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryView {
    /// The event this snapshot describes.
    pub event_id: EventId,
    /// Tickets still available when the snapshot was taken.
    pub capacity: u32,
    /// Price of a single ticket.
    pub unit_price: Decimal,
}

/// Read-only view onto remote inventory. Snapshots may be slightly stale.
#[async_trait]
pub trait InventoryOracle: Send + Sync {
    /// Returns the current inventory for `event_id`, or `None` if the event is unknown.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::UpstreamUnavailable` if the oracle cannot be reached
    /// or answers with something other than a valid snapshot.
    async fn get_inventory(&self, event_id: &EventId)
    -> Result<Option<InventoryView>, BookingError>;
}
