//! Durable booking event publishers for Ticketbooth.
//!
//! `PgEventPublisher` appends events to a transactional outbox table and is
//! always available. `KafkaEventPublisher` produces straight to a Kafka
//! compatible broker and is gated behind the `kafka` feature.

#[cfg(feature = "kafka")]
pub mod kafka_event_publisher;
pub mod pg_event_publisher;
