//! Environment-driven configuration.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use ticketbooth_booking::application::orchestrator::BookingTimeouts;

use crate::error::AppError;

/// Which event publisher backs the `booking` channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublisherKind {
    /// Transactional outbox table in the service database.
    Postgres,
    /// Kafka-compatible broker (requires the `kafka` feature).
    Kafka,
}

impl FromStr for PublisherKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "outbox" => Ok(Self::Postgres),
            "kafka" => Ok(Self::Kafka),
            other => Err(AppError::Config(format!(
                "BOOKING_PUBLISHER must be `postgres` or `kafka`, got `{other}`"
            ))),
        }
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string for the customer directory and outbox.
    pub database_url: String,
    /// Maximum pooled database connections.
    pub database_max_connections: u32,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Base URL of the inventory service.
    pub inventory_service_url: String,
    /// Event publisher backend.
    pub publisher: PublisherKind,
    /// Kafka bootstrap servers, used when `publisher` is `Kafka`.
    pub kafka_brokers: String,
    /// Per-collaborator deadlines.
    pub timeouts: BookingTimeouts,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".to_owned())
        })?;
        let host: IpAddr = parse_or(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let bind_addr = SocketAddr::new(host, port);

        let publisher = match lookup("BOOKING_PUBLISHER") {
            Some(raw) => raw.parse()?,
            None => PublisherKind::Postgres,
        };

        let defaults = BookingTimeouts::default();
        let timeouts = BookingTimeouts {
            directory: millis_or(&lookup, "DIRECTORY_TIMEOUT_MS", defaults.directory)?,
            inventory: millis_or(&lookup, "INVENTORY_TIMEOUT_MS", defaults.inventory)?,
            publish: millis_or(&lookup, "PUBLISH_TIMEOUT_MS", defaults.publish)?,
        };

        Ok(Self {
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            bind_addr,
            inventory_service_url: lookup("INVENTORY_SERVICE_URL")
                .unwrap_or_else(|| "http://localhost:8080/api/v1/inventory".to_owned()),
            publisher,
            kafka_brokers: lookup("KAFKA_BROKERS").unwrap_or_else(|| "localhost:9092".to_owned()),
            timeouts,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}

fn millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, AppError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    let ms: u64 = parse_or(lookup, key, default_ms)?;
    if ms == 0 {
        return Err(AppError::Config(format!("{key} must be greater than zero")));
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/ticketbooth")]).unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.publisher, PublisherKind::Postgres);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(
            config.inventory_service_url,
            "http://localhost:8080/api/v1/inventory"
        );
        assert_eq!(config.timeouts, BookingTimeouts::default());
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let err = config_from(&[]).unwrap_err();

        assert!(matches!(err, AppError::Config(msg) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db/tb"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("BOOKING_PUBLISHER", "Kafka"),
            ("KAFKA_BROKERS", "broker-1:9092,broker-2:9092"),
            ("INVENTORY_TIMEOUT_MS", "750"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8081");
        assert_eq!(config.publisher, PublisherKind::Kafka);
        assert_eq!(config.kafka_brokers, "broker-1:9092,broker-2:9092");
        assert_eq!(config.timeouts.inventory, Duration::from_millis(750));
        assert_eq!(config.timeouts.directory, BookingTimeouts::default().directory);
    }

    #[test]
    fn test_ipv6_host_is_accepted() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db/tb"),
            ("HOST", "::"),
            ("PORT", "8081"),
        ])
        .unwrap();

        assert!(config.bind_addr.is_ipv6());
        assert_eq!(config.bind_addr.to_string(), "[::]:8081");
    }

    #[test]
    fn test_hostname_is_rejected() {
        let err = config_from(&[("DATABASE_URL", "postgres://db/tb"), ("HOST", "localhost")])
            .unwrap_err();

        assert!(matches!(err, AppError::Config(msg) if msg.starts_with("HOST")));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("DATABASE_URL", "postgres://db/tb"), ("PORT", "http")])
            .unwrap_err();

        assert!(matches!(err, AppError::Config(msg) if msg.starts_with("PORT")));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = config_from(&[
            ("DATABASE_URL", "postgres://db/tb"),
            ("PUBLISH_TIMEOUT_MS", "0"),
        ])
        .unwrap_err();

        assert!(matches!(err, AppError::Config(msg) if msg.contains("PUBLISH_TIMEOUT_MS")));
    }

    #[test]
    fn test_unknown_publisher_is_rejected() {
        let err = config_from(&[
            ("DATABASE_URL", "postgres://db/tb"),
            ("BOOKING_PUBLISHER", "carrier-pigeon"),
        ])
        .unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }
}
