//! PostgreSQL-backed customer directory for Ticketbooth.

pub mod pg_customer_directory;
