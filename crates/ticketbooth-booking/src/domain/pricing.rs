//! Ticket pricing.

use rust_decimal::Decimal;
use ticketbooth_core::error::BookingError;

/// Computes `unit_price × ticket_count` in exact decimal arithmetic.
///
/// The scale of `unit_price` is preserved, so 25.00 × 2 is 50.00.
///
/// # Errors
///
/// Returns `BookingError::Validation` if the product overflows `Decimal`.
pub fn total_price(unit_price: Decimal, ticket_count: u32) -> Result<Decimal, BookingError> {
    unit_price
        .checked_mul(Decimal::from(ticket_count))
        .ok_or_else(|| {
            BookingError::Validation(format!(
                "total price overflows for {ticket_count} tickets at {unit_price}"
            ))
        })
}
