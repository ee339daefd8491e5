//! HTTP client for the remote inventory service.
//!
//! Implements the `InventoryOracle` port by calling
//! `GET {base_url}/event/{event_id}` and decoding the inventory snapshot.

pub mod http_inventory_oracle;

pub use http_inventory_oracle::{HttpInventoryOracle, InventoryClientError};
