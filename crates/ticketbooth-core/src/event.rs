//! Booking event and the publisher port it is submitted through.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;
use crate::ids::{CustomerId, EventId};

/// Channel (topic) all booking events are published to.
pub const BOOKING_CHANNEL: &str = "booking";

/// Event type name carried alongside the payload.
pub const BOOKING_CREATED_EVENT_TYPE: &str = "booking.created";

/// Emitted once per accepted booking for downstream order processing.
///
/// Fields are private: an event is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEvent {
    booking_id: Uuid,
    correlation_id: Uuid,
    user_id: CustomerId,
    event_id: EventId,
    ticket_count: u32,
    total_price: Decimal,
    occurred_at: DateTime<Utc>,
}

impl BookingEvent {
    /// Creates a new booking event.
    #[must_use]
    pub fn new(
        booking_id: Uuid,
        correlation_id: Uuid,
        user_id: CustomerId,
        event_id: EventId,
        ticket_count: u32,
        total_price: Decimal,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            booking_id,
            correlation_id,
            user_id,
            event_id,
            ticket_count,
            total_price,
            occurred_at,
        }
    }

    /// Unique identity of this booking message.
    #[must_use]
    pub fn booking_id(&self) -> Uuid {
        self.booking_id
    }

    /// Correlation id of the request that produced this event.
    #[must_use]
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// The customer who booked.
    #[must_use]
    pub fn user_id(&self) -> &CustomerId {
        &self.user_id
    }

    /// The event that was booked.
    #[must_use]
    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Number of tickets booked.
    #[must_use]
    pub fn ticket_count(&self) -> u32 {
        self.ticket_count
    }

    /// Exact total price of the booking.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// When the booking was accepted.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Serializes the event to its JSON wire payload.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::PublishFailure` if serialization fails.
    pub fn to_payload(&self) -> Result<serde_json::Value, BookingError> {
        serde_json::to_value(self)
            .map_err(|e| BookingError::PublishFailure(format!("event serialization failed: {e}")))
    }
}

/// Acknowledgement returned once the publisher has durably accepted an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishAck {
    /// Channel the event was written to.
    pub channel: String,
    /// Partition/shard the event landed in (0 for unpartitioned stores).
    pub partition: i32,
    /// Position of the event within its partition.
    pub offset: i64,
}

/// Durable, ordered-per-key append of booking events to a named channel.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes `event` to `channel` under `key` and waits for it to be durable.
    ///
    /// Events sharing a key must be observable downstream in submission order.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::PublishFailure` if the event is rejected or cannot be
    /// accepted.
    async fn publish(
        &self,
        channel: &str,
        key: &str,
        event: BookingEvent,
    ) -> Result<PublishAck, BookingError>;
}
