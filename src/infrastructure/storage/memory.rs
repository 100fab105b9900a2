//! In-memory reservation storage

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::reservation::{
    NewReservation, Reservation, ReservationChanges, ReservationRepository, ReservationStatus,
};
use crate::domain::DomainResult;

/// In-memory storage for development and testing
///
/// Each entry carries an insertion sequence so listings come back in
/// creation order, matching the database implementation.
pub struct InMemoryReservationRepository {
    reservations: DashMap<String, (u64, Reservation)>,
    sequence: AtomicU64,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    fn sorted<F>(&self, keep: F) -> Vec<Reservation>
    where
        F: Fn(&Reservation) -> bool,
    {
        let mut items: Vec<(u64, Reservation)> = self
            .reservations
            .iter()
            .filter(|entry| keep(&entry.value().1))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|(seq, _)| *seq);
        items.into_iter().map(|(_, r)| r).collect()
    }

    fn modify<F>(&self, id: &str, apply: F) -> Option<Reservation>
    where
        F: FnOnce(&mut Reservation),
    {
        let mut entry = self.reservations.get_mut(id)?;
        let reservation = &mut entry.value_mut().1;
        apply(reservation);
        reservation.updated_at = Utc::now();
        Some(reservation.clone())
    }
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation> {
        reservation.validate()?;
        let created = reservation.into_reservation(uuid::Uuid::new_v4().to_string(), Utc::now());
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.reservations
            .insert(created.id.clone(), (seq, created.clone()));
        Ok(created)
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.sorted(|_| true))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(id).map(|entry| entry.value().1.clone()))
    }

    async fn find_by_client(&self, client_id: &str) -> DomainResult<Vec<Reservation>> {
        Ok(self.sorted(|r| r.client_id == client_id))
    }

    async fn update_details(
        &self,
        id: &str,
        changes: ReservationChanges,
    ) -> DomainResult<Option<Reservation>> {
        Ok(self.modify(id, |r| r.apply_changes(&changes)))
    }

    async fn set_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> DomainResult<Option<Reservation>> {
        Ok(self.modify(id, |r| r.status = status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(client_id: &str, room_id: &str) -> NewReservation {
        NewReservation {
            client_id: client_id.into(),
            room_id: room_id.into(),
            check_in_date: NaiveDate::from_ymd_opt(2023, 12, 15).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2023, 12, 20).unwrap(),
            total_amount: 100.0,
        }
    }

    #[tokio::test]
    async fn listings_keep_insertion_order() {
        let repo = InMemoryReservationRepository::new();
        for room in ["A1", "A2", "A3"] {
            repo.create(request("c1", room)).await.unwrap();
        }

        let rooms: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.room_id)
            .collect();
        assert_eq!(rooms, vec!["A1", "A2", "A3"]);
    }

    #[tokio::test]
    async fn set_status_bumps_updated_at() {
        let repo = InMemoryReservationRepository::new();
        let created = repo.create(request("c1", "A1")).await.unwrap();

        let failed = repo
            .set_status(&created.id, ReservationStatus::Failed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(failed.status, ReservationStatus::Failed);
        assert_eq!(failed.created_at, created.created_at);
        assert!(failed.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn create_with_empty_room_stores_nothing() {
        let repo = InMemoryReservationRepository::new();
        assert!(repo.create(request("c1", "")).await.is_err());
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
