//! `reqwest` implementation of the `InventoryOracle` trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use ticketbooth_core::error::{BookingError, Upstream};
use ticketbooth_core::ids::EventId;
use ticketbooth_core::inventory::{InventoryOracle, InventoryView};

/// Errors raised while configuring the client.
#[derive(Debug, Error)]
pub enum InventoryClientError {
    /// The base URL is not an absolute http(s) URL.
    #[error("invalid inventory service url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build inventory http client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Inventory snapshot as served by the inventory service.
///
/// The service's own `eventId` field is ignored; the requested id is authoritative.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryResponse {
    capacity: u32,
    ticket_price: Decimal,
}

/// Inventory oracle backed by the inventory service's REST API.
#[derive(Debug, Clone)]
pub struct HttpInventoryOracle {
    client: Client,
    base_url: Url,
}

impl HttpInventoryOracle {
    /// Creates a client for the service rooted at `base_url`
    /// (e.g. `http://inventory:8080/api/v1/inventory`).
    ///
    /// `timeout` bounds each request end to end.
    ///
    /// # Errors
    ///
    /// Returns `InventoryClientError` if the URL cannot serve as a base or the
    /// HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InventoryClientError> {
        let invalid = |reason: String| InventoryClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an absolute http(s) url".to_owned()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    fn event_url(&self, event_id: &EventId) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("event").push(event_id.as_str());
        }
        url
    }
}

fn unavailable<D: std::fmt::Display>(reason: D) -> BookingError {
    BookingError::upstream(Upstream::InventoryOracle, reason)
}

#[async_trait]
impl InventoryOracle for HttpInventoryOracle {
    #[instrument(skip(self), fields(event_id = %event_id))]
    async fn get_inventory(
        &self,
        event_id: &EventId,
    ) -> Result<Option<InventoryView>, BookingError> {
        let url = self.event_url(event_id);
        debug!(%url, "requesting inventory");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(%status, "inventory service returned an error status");
            return Err(unavailable(format!("unexpected status {status}")));
        }

        let body: InventoryResponse = response
            .json()
            .await
            .map_err(|e| unavailable(format!("malformed inventory response: {e}")))?;

        if body.ticket_price < Decimal::ZERO {
            return Err(unavailable(format!(
                "malformed inventory response: negative ticket price {}",
                body.ticket_price
            )));
        }

        Ok(Some(InventoryView {
            event_id: event_id.clone(),
            capacity: body.capacity,
            unit_price: body.ticket_price,
        }))
    }
}
