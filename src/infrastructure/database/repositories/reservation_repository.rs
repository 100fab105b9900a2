//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::reservation::{
    NewReservation, Reservation, ReservationChanges, ReservationRepository, ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: Option<DatabaseConnection>,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Some(db) }
    }

    /// Repository for a store that could not be reached at startup.
    /// Every call fails with [`DomainError::Storage`].
    pub fn disconnected() -> Self {
        Self { db: None }
    }

    fn conn(&self) -> DomainResult<&DatabaseConnection> {
        self.db
            .as_ref()
            .ok_or_else(|| DomainError::Storage("database not connected".into()))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    Ok(Reservation {
        status: m.status.parse::<ReservationStatus>()?,
        id: m.id,
        client_id: m.client_id,
        room_id: m.room_id,
        check_in_date: m.check_in_date,
        check_out_date: m.check_out_date,
        total_amount: m.total_amount,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn models_to_domain(models: Vec<reservation::Model>) -> DomainResult<Vec<Reservation>> {
    models.into_iter().map(model_to_domain).collect()
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, r: NewReservation) -> DomainResult<Reservation> {
        r.validate()?;
        debug!("Creating reservation for client {} room {}", r.client_id, r.room_id);

        let model = reservation::ActiveModel {
            client_id: Set(r.client_id),
            room_id: Set(r.room_id),
            check_in_date: Set(r.check_in_date),
            check_out_date: Set(r.check_out_date),
            total_amount: Set(r.total_amount),
            status: Set(ReservationStatus::Created.as_str().to_string()),
            ..reservation::ActiveModel::new()
        };
        let saved = model.insert(self.conn()?).await?;
        model_to_domain(saved)
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .order_by_asc(reservation::Column::CreatedAt)
            .all(self.conn()?)
            .await?;
        models_to_domain(models)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id.to_owned())
            .one(self.conn()?)
            .await?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_client(&self, client_id: &str) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::ClientId.eq(client_id))
            .order_by_asc(reservation::Column::CreatedAt)
            .all(self.conn()?)
            .await?;
        models_to_domain(models)
    }

    async fn update_details(
        &self,
        id: &str,
        changes: ReservationChanges,
    ) -> DomainResult<Option<Reservation>> {
        debug!("Updating reservation: {}", id);

        let Some(existing) = reservation::Entity::find_by_id(id.to_owned())
            .one(self.conn()?)
            .await?
        else {
            return Ok(None);
        };

        let mut active: reservation::ActiveModel = existing.into();
        if let Some(date) = changes.check_in_date {
            active.check_in_date = Set(date);
        }
        if let Some(date) = changes.check_out_date {
            active.check_out_date = Set(date);
        }
        if let Some(amount) = changes.total_amount {
            active.total_amount = Set(amount);
        }
        active.status = Set(ReservationStatus::Updated.as_str().to_string());

        let updated = active.update(self.conn()?).await?;
        model_to_domain(updated).map(Some)
    }

    async fn set_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> DomainResult<Option<Reservation>> {
        debug!("Setting reservation {} status to {}", id, status);

        let Some(existing) = reservation::Entity::find_by_id(id.to_owned())
            .one(self.conn()?)
            .await?
        else {
            return Ok(None);
        };

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        let updated = active.update(self.conn()?).await?;
        model_to_domain(updated).map(Some)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;

    async fn repo() -> SeaOrmReservationRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmReservationRepository::new(db)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request(client_id: &str) -> NewReservation {
        NewReservation {
            client_id: client_id.into(),
            room_id: "A102".into(),
            check_in_date: date("2023-12-15"),
            check_out_date: date("2023-12-20"),
            total_amount: 250.5,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_status_and_timestamps() {
        let repo = repo().await;
        let created = repo.create(request("c1")).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.status, ReservationStatus::Created);
        assert_eq!(created.created_at, created.updated_at);

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn create_rejects_empty_client() {
        let repo = repo().await;
        let err = repo.create(request("")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_client_filters() {
        let repo = repo().await;
        repo.create(request("c1")).await.unwrap();
        repo.create(request("c2")).await.unwrap();
        repo.create(request("c1")).await.unwrap();

        let mine = repo.find_by_client("c1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.client_id == "c1"));
        assert!(repo.find_by_client("nobody").await.unwrap().is_empty());
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_details_keeps_omitted_fields() {
        let repo = repo().await;
        let created = repo.create(request("c1")).await.unwrap();

        let updated = repo
            .update_details(
                &created.id,
                ReservationChanges {
                    total_amount: Some(300.75),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, ReservationStatus::Updated);
        assert_eq!(updated.total_amount, 300.75);
        assert_eq!(updated.check_in_date, created.check_in_date);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn set_status_ignores_prior_status() {
        let repo = repo().await;
        let created = repo.create(request("c1")).await.unwrap();

        repo.set_status(&created.id, ReservationStatus::Canceled)
            .await
            .unwrap();
        let confirmed = repo
            .set_status(&created.id, ReservationStatus::Confirmed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);
        assert_eq!(confirmed.room_id, created.room_id);
    }

    #[tokio::test]
    async fn disconnected_repository_returns_storage_errors() {
        let repo = SeaOrmReservationRepository::disconnected();

        let err = repo.find_all().await.unwrap_err();
        assert_eq!(err.to_string(), "Storage error: database not connected");
        assert!(matches!(
            repo.find_by_id("abc").await,
            Err(DomainError::Storage(_))
        ));
        assert!(matches!(
            repo.create(request("c1")).await,
            Err(DomainError::Storage(_))
        ));
        assert!(matches!(
            repo.set_status("abc", ReservationStatus::Confirmed).await,
            Err(DomainError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn mutations_on_unknown_id_return_none() {
        let repo = repo().await;
        assert!(repo
            .set_status("missing", ReservationStatus::Failed)
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .update_details("missing", ReservationChanges::default())
            .await
            .unwrap()
            .is_none());
    }
}
