//! Fake `CustomerDirectory` implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ticketbooth_core::customer::{Customer, CustomerDirectory};
use ticketbooth_core::error::{BookingError, Upstream};
use ticketbooth_core::ids::CustomerId;

/// A directory backed by a map. Records every id it is asked about.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: HashMap<CustomerId, Customer>,
    lookups: Mutex<Vec<CustomerId>>,
}

impl InMemoryCustomerDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a customer with a generated name and email.
    ///
    /// # Panics
    ///
    /// Panics if `id` is blank.
    #[must_use]
    pub fn with_customer(mut self, id: &str) -> Self {
        let id = CustomerId::parse(id).expect("test customer id must not be blank");
        let customer = Customer {
            id: id.clone(),
            name: format!("Customer {id}"),
            email: format!("{id}@example.com"),
        };
        self.customers.insert(id, customer);
        self
    }

    /// Returns every id passed to `lookup`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn lookups(&self) -> Vec<CustomerId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn lookup(&self, customer_id: &CustomerId) -> Result<Option<Customer>, BookingError> {
        self.lookups.lock().unwrap().push(customer_id.clone());
        Ok(self.customers.get(customer_id).cloned())
    }
}

/// A directory that always fails as if the database were down.
#[derive(Debug)]
pub struct FailingCustomerDirectory;

#[async_trait]
impl CustomerDirectory for FailingCustomerDirectory {
    async fn lookup(&self, _customer_id: &CustomerId) -> Result<Option<Customer>, BookingError> {
        Err(BookingError::upstream(
            Upstream::CustomerDirectory,
            "connection refused",
        ))
    }
}

/// A directory whose lookups never complete.
#[derive(Debug)]
pub struct StalledCustomerDirectory;

#[async_trait]
impl CustomerDirectory for StalledCustomerDirectory {
    async fn lookup(&self, _customer_id: &CustomerId) -> Result<Option<Customer>, BookingError> {
        std::future::pending().await
    }
}
