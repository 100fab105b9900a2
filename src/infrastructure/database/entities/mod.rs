//! SeaORM entities

pub mod reservation;
