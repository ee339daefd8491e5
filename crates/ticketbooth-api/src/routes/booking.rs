//! Routes for the booking context.

use std::fmt;

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use ticketbooth_booking::application::orchestrator::BookingResponse;
use ticketbooth_booking::domain::commands::CreateBooking;

use crate::error::ApiError;
use crate::state::AppState;

/// An identifier as clients send it: either a JSON string or a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// `"u1"`
    Text(String),
    /// `42`
    Number(u64),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Request body for POST /booking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// The customer making the booking.
    pub user_id: RawId,
    /// The event to book.
    pub event_id: RawId,
    /// Number of tickets; must be positive.
    pub ticket_count: u32,
}

/// POST /booking
#[instrument(
    skip(state, request),
    fields(user_id = %request.user_id, event_id = %request.event_id)
)]
async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let command = CreateBooking::new(
        Uuid::new_v4(),
        &request.user_id.to_string(),
        &request.event_id.to_string(),
        request.ticket_count,
    )?;

    info!(correlation_id = %command.correlation_id, "handling create_booking command");

    let response = state.orchestrator.create_booking(&command).await?;

    Ok(Json(response))
}

/// Returns the router for the booking context.
pub fn router() -> Router<AppState> {
    Router::new().route("/booking", post(create_booking))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rust_decimal::Decimal;
    use serde_json::Value;
    use ticketbooth_booking::application::orchestrator::BookingOrchestrator;
    use ticketbooth_core::event::EventPublisher;
    use ticketbooth_test_support::{
        FailingEventPublisher, FixedClock, InMemoryCustomerDirectory, RecordingEventPublisher,
        StaticInventoryOracle,
    };
    use tower::ServiceExt;

    fn app_state_with(publisher: Arc<dyn EventPublisher>) -> AppState {
        let customers = Arc::new(InMemoryCustomerDirectory::new().with_customer("u1"));
        let inventory = Arc::new(
            StaticInventoryOracle::new()
                .with_event("e1", 10, Decimal::new(2500, 2))
                .with_event("e2", 1, Decimal::new(2500, 2)),
        );
        AppState::new(BookingOrchestrator::new(
            customers,
            inventory,
            publisher,
            Arc::new(FixedClock::default()),
        ))
    }

    async fn post_booking(state: AppState, body: &str) -> (StatusCode, Option<Value>) {
        let app = router().with_state(state);
        let request = Request::builder()
            .method("POST")
            .uri("/booking")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body_bytes).ok())
    }

    #[tokio::test]
    async fn test_create_booking_returns_200_with_confirmation() {
        // Arrange
        let publisher = Arc::new(RecordingEventPublisher::new());
        let state = app_state_with(publisher.clone());

        // Act
        let (status, json) = post_booking(
            state,
            r#"{"userId":"u1","eventId":"e1","ticketCount":2}"#,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json.unwrap(),
            serde_json::json!({
                "userId": "u1",
                "eventId": "e1",
                "ticketCount": 2,
                "totalPrice": "50.00"
            })
        );
        assert_eq!(publisher.published().len(), 1);
    }

    #[tokio::test]
    async fn test_create_booking_returns_404_for_unknown_customer() {
        // Arrange
        let publisher = Arc::new(RecordingEventPublisher::new());
        let state = app_state_with(publisher.clone());

        // Act
        let (status, json) = post_booking(
            state,
            r#"{"userId":"ghost","eventId":"e1","ticketCount":1}"#,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json.unwrap()["error"], "customer_not_found");
        assert!(publisher.published().is_empty());
    }

    #[tokio::test]
    async fn test_create_booking_returns_409_when_capacity_is_short() {
        // Arrange
        let publisher = Arc::new(RecordingEventPublisher::new());
        let state = app_state_with(publisher.clone());

        // Act
        let (status, json) = post_booking(
            state,
            r#"{"userId":"u1","eventId":"e2","ticketCount":5}"#,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json.unwrap()["error"], "insufficient_inventory");
        assert!(publisher.published().is_empty());
    }

    #[tokio::test]
    async fn test_create_booking_returns_400_for_zero_tickets() {
        // Arrange
        let publisher = Arc::new(RecordingEventPublisher::new());
        let state = app_state_with(publisher.clone());

        // Act
        let (status, json) = post_booking(
            state,
            r#"{"userId":"u1","eventId":"e1","ticketCount":0}"#,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.unwrap()["error"], "validation_error");
        assert!(publisher.published().is_empty());
    }

    #[tokio::test]
    async fn test_create_booking_returns_422_for_missing_fields() {
        // Arrange
        let state = app_state_with(Arc::new(RecordingEventPublisher::new()));

        // Act
        let (status, _) = post_booking(state, "{}").await;

        // Assert: Axum returns 422 for deserialization failures.
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_booking_returns_503_when_publisher_fails() {
        // Arrange
        let state = app_state_with(Arc::new(FailingEventPublisher));

        // Act
        let (status, json) = post_booking(
            state,
            r#"{"userId":"u1","eventId":"e1","ticketCount":2}"#,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json.unwrap()["error"], "publish_failure");
    }

    #[tokio::test]
    async fn test_create_booking_accepts_numeric_identifiers() {
        // Arrange
        let customers = Arc::new(InMemoryCustomerDirectory::new().with_customer("7"));
        let inventory =
            Arc::new(StaticInventoryOracle::new().with_event("42", 3, Decimal::new(1999, 2)));
        let state = AppState::new(BookingOrchestrator::new(
            customers,
            inventory,
            Arc::new(RecordingEventPublisher::new()),
            Arc::new(FixedClock::default()),
        ));

        // Act
        let (status, json) =
            post_booking(state, r#"{"userId":7,"eventId":42,"ticketCount":3}"#).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let json = json.unwrap();
        assert_eq!(json["userId"], "7");
        assert_eq!(json["totalPrice"], "59.97");
    }
}
