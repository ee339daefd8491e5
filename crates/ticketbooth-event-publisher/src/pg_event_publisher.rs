//! `PostgreSQL` outbox implementation of the `EventPublisher` trait.
//!
//! Each publish is a single-row insert into `booking_events`. The row's
//! `sequence_number` is assigned by a `BIGSERIAL`, so rows sharing a
//! partition key are ordered by submission. Rows stay in the table until an
//! external relay, outside this service, forwards them downstream.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

use ticketbooth_core::error::BookingError;
use ticketbooth_core::event::{BookingEvent, EventPublisher, PublishAck};

const INSERT_BOOKING_EVENT: &str = r"
INSERT INTO booking_events (message_id, channel, partition_key, payload, occurred_at)
VALUES ($1, $2, $3, $4, $5)
RETURNING sequence_number
";

/// PostgreSQL-backed outbox publisher.
#[derive(Debug, Clone)]
pub struct PgEventPublisher {
    pool: PgPool,
}

impl PgEventPublisher {
    /// Creates a new `PgEventPublisher`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventPublisher for PgEventPublisher {
    #[instrument(skip(self, event), fields(booking_id = %event.booking_id()))]
    async fn publish(
        &self,
        channel: &str,
        key: &str,
        event: BookingEvent,
    ) -> Result<PublishAck, BookingError> {
        let payload = event.to_payload()?;

        let row = sqlx::query(INSERT_BOOKING_EVENT)
            .bind(event.booking_id())
            .bind(channel)
            .bind(key)
            .bind(payload)
            .bind(event.occurred_at())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BookingError::PublishFailure(format!("outbox insert failed: {e}")))?;

        let offset: i64 = row
            .try_get("sequence_number")
            .map_err(|e| BookingError::PublishFailure(format!("outbox insert failed: {e}")))?;

        debug!(channel, key, offset, "booking event written to outbox");

        Ok(PublishAck {
            channel: channel.to_owned(),
            partition: 0,
            offset,
        })
    }
}
