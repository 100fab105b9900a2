//! Infrastructure layer - external concerns

pub mod database;
pub mod storage;

pub use database::{try_connect, init_database, DatabaseConfig};
pub use database::repositories::SeaOrmReservationRepository;
pub use storage::InMemoryReservationRepository;
