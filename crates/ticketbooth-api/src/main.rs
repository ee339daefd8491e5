//! Ticketbooth API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use ticketbooth_api::config::{AppConfig, PublisherKind};
use ticketbooth_api::error::AppError;
use ticketbooth_api::routes;
use ticketbooth_api::state::AppState;
use ticketbooth_booking::application::orchestrator::BookingOrchestrator;
use ticketbooth_core::clock::SystemClock;
use ticketbooth_core::event::EventPublisher;
use ticketbooth_customer_store::pg_customer_directory::PgCustomerDirectory;
use ticketbooth_event_publisher::pg_event_publisher::PgEventPublisher;
use ticketbooth_inventory_client::HttpInventoryOracle;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Ticketbooth API server");

    let config = AppConfig::from_env()?;

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.timeouts.directory)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Wire collaborators into the orchestrator.
    let customers = Arc::new(PgCustomerDirectory::new(pool.clone()));
    let inventory = Arc::new(HttpInventoryOracle::new(
        &config.inventory_service_url,
        config.timeouts.inventory,
    )?);
    let publisher = build_publisher(&config, pool)?;

    let orchestrator =
        BookingOrchestrator::new(customers, inventory, publisher, Arc::new(SystemClock))
            .with_timeouts(config.timeouts);
    let app = routes::app(AppState::new(orchestrator));

    tracing::info!(
        addr = %config.bind_addr,
        publisher = ?config.publisher,
        inventory_service_url = %config.inventory_service_url,
        "Listening"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Ticketbooth API server stopped");

    Ok(())
}

fn build_publisher(
    config: &AppConfig,
    pool: sqlx::PgPool,
) -> Result<Arc<dyn EventPublisher>, AppError> {
    match config.publisher {
        PublisherKind::Postgres => Ok(Arc::new(PgEventPublisher::new(pool))),
        #[cfg(feature = "kafka")]
        PublisherKind::Kafka => {
            use ticketbooth_event_publisher::kafka_event_publisher::KafkaEventPublisher;
            Ok(Arc::new(KafkaEventPublisher::new(
                &config.kafka_brokers,
                config.timeouts.publish,
            )?))
        }
        #[cfg(not(feature = "kafka"))]
        PublisherKind::Kafka => Err(AppError::Config(format!(
            "BOOKING_PUBLISHER=kafka (brokers {}) requires building with the `kafka` feature",
            config.kafka_brokers
        ))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
