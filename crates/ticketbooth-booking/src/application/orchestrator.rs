//! Booking orchestrator.
//!
//! Sequences the customer lookup, the inventory read and the event publish
//! for a single booking request. Each step gates the next; nothing is
//! retried and nothing is kept between calls.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use ticketbooth_core::clock::Clock;
use ticketbooth_core::customer::CustomerDirectory;
use ticketbooth_core::error::{BookingError, Upstream};
use ticketbooth_core::event::{BOOKING_CHANNEL, BookingEvent, EventPublisher};
use ticketbooth_core::ids::{CustomerId, EventId};
use ticketbooth_core::inventory::InventoryOracle;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::commands::CreateBooking;
use crate::domain::pricing;

/// Deadlines applied to each collaborator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingTimeouts {
    /// Customer directory lookup.
    pub directory: Duration,
    /// Inventory oracle read.
    pub inventory: Duration,
    /// Event publisher acknowledgement.
    pub publish: Duration,
}

impl Default for BookingTimeouts {
    fn default() -> Self {
        Self {
            directory: Duration::from_secs(2),
            inventory: Duration::from_secs(3),
            publish: Duration::from_secs(5),
        }
    }
}

/// Confirmation returned to the caller once the booking event is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// The customer who booked.
    pub user_id: CustomerId,
    /// The event that was booked.
    pub event_id: EventId,
    /// Number of tickets booked.
    pub ticket_count: u32,
    /// Exact total price.
    pub total_price: Decimal,
}

impl From<&BookingEvent> for BookingResponse {
    fn from(event: &BookingEvent) -> Self {
        Self {
            user_id: event.user_id().clone(),
            event_id: event.event_id().clone(),
            ticket_count: event.ticket_count(),
            total_price: event.total_price(),
        }
    }
}

/// Coordinates a booking across the customer directory, the inventory
/// oracle and the event publisher.
#[derive(Clone)]
pub struct BookingOrchestrator {
    customers: Arc<dyn CustomerDirectory>,
    inventory: Arc<dyn InventoryOracle>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    timeouts: BookingTimeouts,
}

impl fmt::Debug for BookingOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingOrchestrator")
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

impl BookingOrchestrator {
    /// Creates an orchestrator with default timeouts.
    #[must_use]
    pub fn new(
        customers: Arc<dyn CustomerDirectory>,
        inventory: Arc<dyn InventoryOracle>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            customers,
            inventory,
            publisher,
            clock,
            timeouts: BookingTimeouts::default(),
        }
    }

    /// Replaces the per-collaborator deadlines.
    #[must_use]
    pub fn with_timeouts(mut self, timeouts: BookingTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Validates, prices and publishes a booking.
    ///
    /// Exactly one event is published when this returns `Ok`, and none when it
    /// returns `Err`. The capacity check is a read, not a reservation:
    /// concurrent bookings may each see enough capacity.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` if the user id does not resolve.
    /// - `EventNotFound` if the oracle does not know the event.
    /// - `InsufficientInventory` if more tickets are requested than remain.
    /// - `UpstreamUnavailable` if the directory or oracle fails or times out.
    /// - `PublishFailure` if the publisher rejects the event or times out.
    #[instrument(
        skip(self, command),
        fields(
            correlation_id = %command.correlation_id,
            user_id = %command.user_id,
            event_id = %command.event_id,
            ticket_count = command.ticket_count
        )
    )]
    pub async fn create_booking(
        &self,
        command: &CreateBooking,
    ) -> Result<BookingResponse, BookingError> {
        let customer = bounded(
            Upstream::CustomerDirectory,
            self.timeouts.directory,
            self.customers.lookup(&command.user_id),
        )
        .await?
        .ok_or_else(|| BookingError::CustomerNotFound(command.user_id.clone()))?;

        let inventory = bounded(
            Upstream::InventoryOracle,
            self.timeouts.inventory,
            self.inventory.get_inventory(&command.event_id),
        )
        .await?
        .ok_or_else(|| BookingError::EventNotFound(command.event_id.clone()))?;

        info!(
            capacity = inventory.capacity,
            unit_price = %inventory.unit_price,
            "inventory snapshot received"
        );

        if command.ticket_count > inventory.capacity {
            warn!(
                capacity = inventory.capacity,
                "rejecting booking: not enough inventory"
            );
            return Err(BookingError::InsufficientInventory {
                event_id: command.event_id.clone(),
                requested: command.ticket_count,
                available: inventory.capacity,
            });
        }

        let total_price = pricing::total_price(inventory.unit_price, command.ticket_count)?;

        let event = BookingEvent::new(
            Uuid::new_v4(),
            command.correlation_id,
            customer.id,
            command.event_id.clone(),
            command.ticket_count,
            total_price,
            self.clock.now(),
        );
        let booking_id = event.booking_id();
        let key = event.event_id().as_str().to_owned();
        let response = BookingResponse::from(&event);

        let ack = tokio::time::timeout(
            self.timeouts.publish,
            self.publisher.publish(BOOKING_CHANNEL, &key, event),
        )
        .await
        .map_err(|_| {
            BookingError::PublishFailure(format!(
                "no acknowledgement within {}ms",
                self.timeouts.publish.as_millis()
            ))
        })?
        .map_err(into_publish_failure)?;

        info!(
            %booking_id,
            channel = %ack.channel,
            partition = ack.partition,
            offset = ack.offset,
            total_price = %response.total_price,
            "booking event published"
        );

        Ok(response)
    }
}

/// Runs a read-side collaborator call under `limit`.
async fn bounded<T>(
    upstream: Upstream,
    limit: Duration,
    call: impl Future<Output = Result<T, BookingError>>,
) -> Result<T, BookingError> {
    tokio::time::timeout(limit, call).await.map_err(|_| {
        BookingError::upstream(upstream, format!("timed out after {}ms", limit.as_millis()))
    })?
}

fn into_publish_failure(err: BookingError) -> BookingError {
    match err {
        BookingError::PublishFailure(_) => err,
        other => BookingError::PublishFailure(other.to_string()),
    }
}
