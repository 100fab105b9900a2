//! Reservation entity

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub client_id: String,
    pub room_id: String,
    pub check_in_date: Date,
    pub check_out_date: Date,

    #[sea_orm(column_type = "Double")]
    pub total_amount: f64,

    /// Reservation status: Created, Updated, Canceled, Failed, Confirmed
    pub status: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            status: Set("Created".to_owned()),
            ..ActiveModelTrait::default()
        }
    }

    /// Timestamps are owned by the store: stamped here on every write.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            if let ActiveValue::NotSet = self.id {
                self.id = Set(Uuid::new_v4().to_string());
            }
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
