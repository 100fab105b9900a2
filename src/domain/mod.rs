pub mod reservation;

pub use reservation::{
    NewReservation, Reservation, ReservationChanges, ReservationRepository, ReservationStatus,
};

// Re-export DomainError from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
