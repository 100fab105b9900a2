//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation, ReservationChanges, ReservationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation with status `Created` and return the stored record
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    /// Find all reservations, oldest first
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    /// Find all reservations made by a client
    async fn find_by_client(&self, client_id: &str) -> DomainResult<Vec<Reservation>>;

    /// Overwrite dates/amount and set status = Updated.
    ///
    /// Returns `Ok(None)` when no reservation has this ID.
    async fn update_details(
        &self,
        id: &str,
        changes: ReservationChanges,
    ) -> DomainResult<Option<Reservation>>;

    /// Set the status unconditionally.
    ///
    /// Returns `Ok(None)` when no reservation has this ID.
    async fn set_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> DomainResult<Option<Reservation>>;
}
