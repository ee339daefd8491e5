//! Shared application state.

use std::sync::Arc;

use ticketbooth_booking::application::orchestrator::BookingOrchestrator;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Booking workflow with its collaborators already wired in.
    pub orchestrator: Arc<BookingOrchestrator>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(orchestrator: BookingOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}
