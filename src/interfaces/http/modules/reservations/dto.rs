//! Reservation DTOs
//!
//! Wire names follow the public contract: `client_id` is snake_case, every
//! other field is camelCase. Request dates are `YYYY-MM-DD` or an RFC 3339
//! timestamp, reduced to its UTC calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::reservation::{NewReservation, Reservation, ReservationChanges};

mod calendar_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub(super) fn parse(s: &str) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| {
                DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc).date_naive())
            })
            .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD or RFC 3339", s))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(D::Error::custom)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| parse(&s).map_err(D::Error::custom))
            .transpose()
    }
}

/// Request to create a new reservation
///
/// Any `status` in the body is ignored; new reservations always start as `Created`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// The ID of the client making the reservation
    #[serde(rename = "client_id")]
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "64b53b3b4c72a4b4f1d4c6c7")]
    pub client_id: String,
    /// The ID of the reserved room
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "A102")]
    pub room_id: String,
    /// Check-in date
    #[serde(deserialize_with = "calendar_date::deserialize")]
    #[schema(value_type = String, format = Date, example = "2023-12-15")]
    pub check_in_date: NaiveDate,
    /// Check-out date
    #[serde(deserialize_with = "calendar_date::deserialize")]
    #[schema(value_type = String, format = Date, example = "2023-12-20")]
    pub check_out_date: NaiveDate,
    /// Total amount for the reservation
    #[schema(example = 250.5)]
    pub total_amount: f64,
}

impl From<CreateReservationRequest> for NewReservation {
    fn from(r: CreateReservationRequest) -> Self {
        Self {
            client_id: r.client_id,
            room_id: r.room_id,
            check_in_date: r.check_in_date,
            check_out_date: r.check_out_date,
            total_amount: r.total_amount,
        }
    }
}

/// Request to update dates and amount. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    /// Updated check-in date
    #[serde(default, deserialize_with = "calendar_date::deserialize_option")]
    #[schema(value_type = Option<String>, format = Date, example = "2023-12-16")]
    pub check_in_date: Option<NaiveDate>,
    /// Updated check-out date
    #[serde(default, deserialize_with = "calendar_date::deserialize_option")]
    #[schema(value_type = Option<String>, format = Date, example = "2023-12-21")]
    pub check_out_date: Option<NaiveDate>,
    /// Updated total amount
    #[schema(example = 300.75)]
    pub total_amount: Option<f64>,
}

impl From<UpdateReservationRequest> for ReservationChanges {
    fn from(r: UpdateReservationRequest) -> Self {
        Self {
            check_in_date: r.check_in_date,
            check_out_date: r.check_out_date,
            total_amount: r.total_amount,
        }
    }
}

/// Reservation details in API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    /// Unique identifier of the reservation
    pub id: String,
    #[serde(rename = "client_id")]
    pub client_id: String,
    pub room_id: String,
    #[schema(value_type = String, format = Date)]
    pub check_in_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub check_out_date: NaiveDate,
    pub total_amount: f64,
    /// One of Created, Updated, Canceled, Failed, Confirmed
    #[schema(example = "Confirmed")]
    pub status: String,
    /// RFC 3339 creation time
    pub created_at: String,
    /// RFC 3339 time of the last write
    pub updated_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            client_id: r.client_id,
            room_id: r.room_id,
            check_in_date: r.check_in_date,
            check_out_date: r.check_out_date,
            total_amount: r.total_amount,
            status: r.status.as_str().to_string(),
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_uses_mixed_case_names() {
        let req: CreateReservationRequest = serde_json::from_value(json!({
            "client_id": "c1",
            "roomId": "A102",
            "checkInDate": "2023-12-15",
            "checkOutDate": "2023-12-20",
            "totalAmount": 250.5,
            "status": "Confirmed"
        }))
        .unwrap();

        assert_eq!(req.client_id, "c1");
        assert_eq!(req.room_id, "A102");
        assert_eq!(req.check_in_date, NaiveDate::from_ymd_opt(2023, 12, 15).unwrap());
    }

    #[test]
    fn create_request_rejects_non_date() {
        let res = serde_json::from_value::<CreateReservationRequest>(json!({
            "client_id": "c1",
            "roomId": "A102",
            "checkInDate": "next tuesday",
            "checkOutDate": "2023-12-20",
            "totalAmount": 250.5
        }));
        assert!(res.is_err());
    }

    #[test]
    fn update_request_fields_are_optional() {
        let req: UpdateReservationRequest =
            serde_json::from_value(json!({"totalAmount": 300.75})).unwrap();
        let changes = ReservationChanges::from(req);
        assert_eq!(changes.total_amount, Some(300.75));
        assert!(changes.check_in_date.is_none());
    }

    #[test]
    fn dates_accept_rfc3339_and_use_the_utc_day() {
        let day = |s: &str| calendar_date::parse(s).unwrap();
        assert_eq!(day("2023-12-15"), NaiveDate::from_ymd_opt(2023, 12, 15).unwrap());
        assert_eq!(
            day("2023-12-15T00:00:00Z"),
            NaiveDate::from_ymd_opt(2023, 12, 15).unwrap()
        );
        assert_eq!(
            day("2023-12-15T22:00:00-05:00"),
            NaiveDate::from_ymd_opt(2023, 12, 16).unwrap()
        );
        assert!(calendar_date::parse("15/12/2023").is_err());
    }

    #[test]
    fn update_request_accepts_null_dates() {
        let req: UpdateReservationRequest =
            serde_json::from_value(json!({"checkInDate": null})).unwrap();
        assert!(req.check_in_date.is_none());
    }
}
