//! Kafka implementation of the `EventPublisher` trait.
//!
//! Uses an idempotent `FutureProducer` with `acks=all`, so an acknowledged
//! record is replicated and records sharing a key keep their order within
//! the key's partition even across producer retries.
//!
//! A record handed to librdkafka stays in its queue after the delivery future
//! is dropped. The producer's own delivery budget therefore ends before the
//! caller's publish deadline: once the caller gives up, the record has already
//! been expired by librdkafka and is never sent.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::ClientConfig;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use tracing::{debug, error, instrument};

use ticketbooth_core::error::BookingError;
use ticketbooth_core::event::{BOOKING_CREATED_EVENT_TYPE, BookingEvent, EventPublisher, PublishAck};

/// Shortest publish deadline the producer can honour.
pub const MIN_PUBLISH_DEADLINE: Duration = Duration::from_millis(1_500);

/// Share of the publish deadline left unused by librdkafka, in percent.
const DEADLINE_MARGIN_PERCENT: u32 = 20;

/// librdkafka looks for expired records on a one second timer, so an expiry
/// can be reported up to this long after `message.timeout.ms`.
const EXPIRY_SCAN_INTERVAL: Duration = Duration::from_secs(1);

/// Returns how long librdkafka may keep a record alive, from enqueue to
/// delivery report, for a caller that waits at most `deadline`.
///
/// The budget plus the expiry scan interval is always strictly shorter than
/// `deadline` for deadlines of at least [`MIN_PUBLISH_DEADLINE`].
#[must_use]
pub fn delivery_budget(deadline: Duration) -> Duration {
    (deadline * (100 - DEADLINE_MARGIN_PERCENT) / 100).saturating_sub(EXPIRY_SCAN_INTERVAL)
}

/// Kafka-backed booking event publisher.
pub struct KafkaEventPublisher {
    producer: FutureProducer,
    delivery_budget: Duration,
}

impl std::fmt::Debug for KafkaEventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaEventPublisher")
            .field("delivery_budget", &self.delivery_budget)
            .finish_non_exhaustive()
    }
}

impl KafkaEventPublisher {
    /// Creates a producer connected to `brokers` (comma-separated `host:port` list).
    ///
    /// `publish_deadline` is how long the caller waits for an acknowledgement.
    /// Records are expired by the producer after [`delivery_budget`] of it.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::PublishFailure` if `publish_deadline` is below
    /// [`MIN_PUBLISH_DEADLINE`] or the producer cannot be created.
    pub fn new(brokers: &str, publish_deadline: Duration) -> Result<Self, BookingError> {
        if publish_deadline < MIN_PUBLISH_DEADLINE {
            return Err(BookingError::PublishFailure(format!(
                "publish deadline of {}ms is below the {}ms minimum",
                publish_deadline.as_millis(),
                MIN_PUBLISH_DEADLINE.as_millis()
            )));
        }

        let budget = delivery_budget(publish_deadline);
        let budget_ms = budget.as_millis().to_string();
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("acks", "all")
            .set("enable.idempotence", "true")
            .set("linger.ms", "0")
            .set("message.timeout.ms", &budget_ms)
            .set("request.timeout.ms", &budget_ms)
            .create()
            .map_err(|e| BookingError::PublishFailure(format!("failed to create producer: {e}")))?;

        Ok(Self {
            producer,
            delivery_budget: budget,
        })
    }

    /// How long a record may live inside the producer before it is expired.
    #[must_use]
    pub fn delivery_budget(&self) -> Duration {
        self.delivery_budget
    }

    /// Records still held by the producer, waiting for a delivery report.
    #[must_use]
    pub fn queued_records(&self) -> i32 {
        self.producer.in_flight_count()
    }
}

#[async_trait]
impl EventPublisher for KafkaEventPublisher {
    #[instrument(skip(self, event), fields(booking_id = %event.booking_id()))]
    async fn publish(
        &self,
        channel: &str,
        key: &str,
        event: BookingEvent,
    ) -> Result<PublishAck, BookingError> {
        let payload = serde_json::to_vec(&event).map_err(|e| {
            BookingError::PublishFailure(format!("event serialization failed: {e}"))
        })?;

        let headers = OwnedHeaders::new().insert(Header {
            key: "event_type",
            value: Some(BOOKING_CREATED_EVENT_TYPE),
        });
        let record = FutureRecord::to(channel)
            .key(key)
            .payload(&payload)
            .headers(headers);

        // Enqueue without blocking: a full local queue fails the publish
        // instead of eating into the delivery budget.
        match self.producer.send(record, Timeout::After(Duration::ZERO)).await {
            Ok((partition, offset)) => {
                debug!(channel, key, partition, offset, "booking event delivered");
                Ok(PublishAck {
                    channel: channel.to_owned(),
                    partition,
                    offset,
                })
            }
            Err((kafka_error, _)) => {
                error!(channel, key, error = %kafka_error, "failed to publish booking event");
                Err(BookingError::PublishFailure(kafka_error.to_string()))
            }
        }
    }
}
