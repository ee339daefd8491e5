//! Customer directory port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::ids::CustomerId;

/// A customer profile as held by the customer directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// The customer identifier.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Keyed, side-effect-free lookup of customers.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Returns the customer with the given id, or `None` if no such customer exists.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::UpstreamUnavailable` if the directory cannot be queried.
    async fn lookup(&self, customer_id: &CustomerId) -> Result<Option<Customer>, BookingError>;
}
