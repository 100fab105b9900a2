//! # Hotel Reservations Service
//!
//! REST API for creating, reading, updating, canceling, failing and
//! confirming hotel room reservations.
//!
//! ## Architecture
//!
//! - **domain**: the Reservation entity and its repository interface
//! - **infrastructure**: SeaORM persistence (entity, migrations, repository)
//!   and an in-memory repository for tests and development
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: startup, logging and graceful shutdown
//! - **support**: error types and shutdown signalling

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryReservationRepository, SeaOrmReservationRepository,
};

// Re-export API router
pub use interfaces::http::create_api_router;
