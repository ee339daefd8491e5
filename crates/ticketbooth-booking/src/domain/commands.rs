//! Commands for the booking context.

use ticketbooth_core::error::BookingError;
use ticketbooth_core::ids::{CustomerId, EventId};
use uuid::Uuid;

/// Command to book tickets for an event on behalf of a customer.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The customer making the booking.
    pub user_id: CustomerId,
    /// The event being booked.
    pub event_id: EventId,
    /// Number of tickets requested; always at least one.
    pub ticket_count: u32,
}

impl CreateBooking {
    /// Builds a command from raw request fields.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Validation` if either identifier is blank or
    /// `ticket_count` is zero.
    pub fn new(
        correlation_id: Uuid,
        user_id: &str,
        event_id: &str,
        ticket_count: u32,
    ) -> Result<Self, BookingError> {
        if ticket_count == 0 {
            return Err(BookingError::Validation(
                "ticketCount must be a positive integer".to_owned(),
            ));
        }
        Ok(Self {
            correlation_id,
            user_id: CustomerId::parse(user_id)?,
            event_id: EventId::parse(event_id)?,
            ticket_count,
        })
    }
}
