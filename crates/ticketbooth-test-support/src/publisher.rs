//! Fake `EventPublisher` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use ticketbooth_core::error::BookingError;
use ticketbooth_core::event::{BookingEvent, EventPublisher, PublishAck};

/// A publisher that acknowledges everything and keeps what it was given.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    published: Mutex<Vec<(String, String, BookingEvent)>>,
}

impl RecordingEventPublisher {
    /// Creates an empty recording publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all `(channel, key, event)` triples published so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published(&self) -> Vec<(String, String, BookingEvent)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(
        &self,
        channel: &str,
        key: &str,
        event: BookingEvent,
    ) -> Result<PublishAck, BookingError> {
        let mut published = self.published.lock().unwrap();
        published.push((channel.to_owned(), key.to_owned(), event));
        let offset = i64::try_from(published.len()).unwrap_or(i64::MAX) - 1;
        Ok(PublishAck {
            channel: channel.to_owned(),
            partition: 0,
            offset,
        })
    }
}

/// A publisher that rejects every event.
#[derive(Debug)]
pub struct FailingEventPublisher;

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(
        &self,
        _channel: &str,
        _key: &str,
        _event: BookingEvent,
    ) -> Result<PublishAck, BookingError> {
        Err(BookingError::PublishFailure("broker not available".into()))
    }
}

/// A publisher that never acknowledges.
#[derive(Debug)]
pub struct StalledEventPublisher;

#[async_trait]
impl EventPublisher for StalledEventPublisher {
    async fn publish(
        &self,
        _channel: &str,
        _key: &str,
        _event: BookingEvent,
    ) -> Result<PublishAck, BookingError> {
        std::future::pending().await
    }
}
