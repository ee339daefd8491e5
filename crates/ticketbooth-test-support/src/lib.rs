//! Shared test fakes and utilities for Ticketbooth.

mod clock;
mod directory;
mod inventory;
mod publisher;

pub use clock::FixedClock;
pub use directory::{FailingCustomerDirectory, InMemoryCustomerDirectory, StalledCustomerDirectory};
pub use inventory::{FailingInventoryOracle, StalledInventoryOracle, StaticInventoryOracle};
pub use publisher::{FailingEventPublisher, RecordingEventPublisher, StalledEventPublisher};
