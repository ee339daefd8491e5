//! Fake `InventoryOracle` implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use ticketbooth_core::error::{BookingError, Upstream};
use ticketbooth_core::ids::EventId;
use ticketbooth_core::inventory::{InventoryOracle, InventoryView};

/// An oracle answering from a fixed table. Records every event id it is asked about.
#[derive(Debug, Default)]
pub struct StaticInventoryOracle {
    events: HashMap<EventId, InventoryView>,
    queries: Mutex<Vec<EventId>>,
}

impl StaticInventoryOracle {
    /// Creates an oracle that knows no events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an event with the given capacity and unit price.
    ///
    /// # Panics
    ///
    /// Panics if `event_id` is blank.
    #[must_use]
    pub fn with_event(mut self, event_id: &str, capacity: u32, unit_price: Decimal) -> Self {
        let event_id = EventId::parse(event_id).expect("test event id must not be blank");
        self.events.insert(
            event_id.clone(),
            InventoryView {
                event_id,
                capacity,
                unit_price,
            },
        );
        self
    }

    /// Returns every event id passed to `get_inventory`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn queries(&self) -> Vec<EventId> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl InventoryOracle for StaticInventoryOracle {
    async fn get_inventory(
        &self,
        event_id: &EventId,
    ) -> Result<Option<InventoryView>, BookingError> {
        self.queries.lock().unwrap().push(event_id.clone());
        Ok(self.events.get(event_id).cloned())
    }
}

/// An oracle that always fails as if the inventory service were unreachable.
#[derive(Debug)]
pub struct FailingInventoryOracle;

#[async_trait]
impl InventoryOracle for FailingInventoryOracle {
    async fn get_inventory(
        &self,
        _event_id: &EventId,
    ) -> Result<Option<InventoryView>, BookingError> {
        Err(BookingError::upstream(
            Upstream::InventoryOracle,
            "503 Service Unavailable",
        ))
    }
}

/// An oracle whose reads never complete.
#[derive(Debug)]
pub struct StalledInventoryOracle;

#[async_trait]
impl InventoryOracle for StalledInventoryOracle {
    async fn get_inventory(
        &self,
        _event_id: &EventId,
    ) -> Result<Option<InventoryView>, BookingError> {
        std::future::pending().await
    }
}
