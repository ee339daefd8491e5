//! `PostgreSQL` implementation of the `CustomerDirectory` trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

use ticketbooth_core::customer::{Customer, CustomerDirectory};
use ticketbooth_core::error::{BookingError, Upstream};
use ticketbooth_core::ids::CustomerId;

const SELECT_CUSTOMER_BY_ID: &str = "SELECT id, name, email FROM customers WHERE id = $1";

/// PostgreSQL-backed customer directory.
#[derive(Debug, Clone)]
pub struct PgCustomerDirectory {
    pool: PgPool,
}

impl PgCustomerDirectory {
    /// Creates a new `PgCustomerDirectory`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: &sqlx::Error) -> BookingError {
    BookingError::upstream(Upstream::CustomerDirectory, err)
}

fn customer_from_row(row: &PgRow) -> Result<Customer, BookingError> {
    let id: String = row.try_get("id").map_err(|e| unavailable(&e))?;
    Ok(Customer {
        id: CustomerId::parse(&id).map_err(|_| {
            BookingError::upstream(Upstream::CustomerDirectory, "stored customer has blank id")
        })?,
        name: row.try_get("name").map_err(|e| unavailable(&e))?,
        email: row.try_get("email").map_err(|e| unavailable(&e))?,
    })
}

#[async_trait]
impl CustomerDirectory for PgCustomerDirectory {
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn lookup(&self, customer_id: &CustomerId) -> Result<Option<Customer>, BookingError> {
        let row = sqlx::query(SELECT_CUSTOMER_BY_ID)
            .bind(customer_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable(&e))?;

        debug!(found = row.is_some(), "customer lookup completed");

        row.as_ref().map(customer_from_row).transpose()
    }
}
