//! Reservation domain entity

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::DomainError;

/// Reservation status
///
/// Every mutating operation assigns its status unconditionally; there is no
/// transition table between these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Freshly inserted
    Created,
    /// Dates or amount changed
    Updated,
    Canceled,
    Failed,
    Confirmed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Canceled => "Canceled",
            Self::Failed => "Failed",
            Self::Confirmed => "Confirmed",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "Updated" => Ok(Self::Updated),
            "Canceled" => Ok(Self::Canceled),
            "Failed" => Ok(Self::Failed),
            "Confirmed" => Ok(Self::Confirmed),
            other => Err(DomainError::Validation(format!(
                "unknown reservation status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hotel room reservation as stored
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Store-assigned identifier
    pub id: String,
    /// Requesting client (opaque)
    pub client_id: String,
    /// Reserved room (opaque)
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_amount: f64,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a reservation.
///
/// There is no `status` here: new reservations always start as
/// [`ReservationStatus::Created`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub client_id: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_amount: f64,
}

impl NewReservation {
    /// Field-presence rules enforced at the store boundary.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.client_id.is_empty() {
            return Err(DomainError::Validation("client_id is required".into()));
        }
        if self.room_id.is_empty() {
            return Err(DomainError::Validation("roomId is required".into()));
        }
        if !self.total_amount.is_finite() {
            return Err(DomainError::Validation(
                "totalAmount must be a finite number".into(),
            ));
        }
        Ok(())
    }

    /// Materialize the record a store would persist for this request.
    pub fn into_reservation(self, id: String, now: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            client_id: self.client_id,
            room_id: self.room_id,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            total_amount: self.total_amount,
            status: ReservationStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of the schedule and price. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationChanges {
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub total_amount: Option<f64>,
}

impl Reservation {
    /// Apply date/amount changes and mark the reservation as updated.
    pub fn apply_changes(&mut self, changes: &ReservationChanges) {
        if let Some(date) = changes.check_in_date {
            self.check_in_date = date;
        }
        if let Some(date) = changes.check_out_date {
            self.check_out_date = date;
        }
        if let Some(amount) = changes.total_amount {
            self.total_amount = amount;
        }
        self.status = ReservationStatus::Updated;
    }
}

// ── Tests ──────────────────────────────────────────────────────
