//! Reservation HTTP handlers
//!
//! Each handler performs exactly one repository call. Reads map store faults
//! to 500; writes map them to 400. The mutate-by-id endpoints answer
//! `200 null` for an unknown id rather than 404.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::domain::reservation::{ReservationRepository, ReservationStatus};
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub repos: Arc<dyn ReservationRepository>,
}

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created successfully", body = ReservationDto),
        (status = 400, description = "Bad request", body = ErrorBody)
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationDto>), ApiError> {
    let created = state
        .repos
        .create(request.into())
        .await
        .map_err(ApiError::bad_request)?;

    info!(reservation_id = %created.id, client_id = %created.client_id, "Reservation created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "List of all reservations", body = Vec<ReservationDto>),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
) -> Result<Json<Vec<ReservationDto>>, ApiError> {
    let reservations = state
        .repos
        .find_all()
        .await
        .map_err(|e| ApiError::internal("Error fetching reservations", &e))?;

    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "Reservations",
    params(("id" = String, Path, description = "The ID of the reservation")),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDto),
        (status = 404, description = "Reservation not found", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<ReservationDto>, ApiError> {
    let reservation = state
        .repos
        .find_by_id(&id)
        .await
        .map_err(|e| ApiError::internal("Error fetching reservation", &e))?;

    let Some(r) = reservation else {
        return Err(ApiError::not_found("Reservation not found"));
    };

    Ok(Json(r.into()))
}

#[utoipa::path(
    get,
    path = "/reservations/client/{client_id}",
    tag = "Reservations",
    params(("client_id" = String, Path, description = "The client_id of the client")),
    responses(
        (status = 200, description = "List of reservations for the specified client", body = Vec<ReservationDto>),
        (status = 404, description = "No reservations found for this client", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    )
)]
pub async fn list_client_reservations(
    State(state): State<ReservationAppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<ReservationDto>>, ApiError> {
    let reservations = state
        .repos
        .find_by_client(&client_id)
        .await
        .map_err(|e| ApiError::internal("Error fetching reservations", &e))?;

    if reservations.is_empty() {
        return Err(ApiError::not_found("No reservations found for this client"));
    }

    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/reservations/{id}",
    tag = "Reservations",
    params(("id" = String, Path, description = "The ID of the reservation to update")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated successfully (null when the id matches nothing)", body = Option<ReservationDto>),
        (status = 400, description = "Bad request", body = ErrorBody)
    )
)]
pub async fn update_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
    body: Option<ValidatedJson<UpdateReservationRequest>>,
) -> Result<Json<Option<ReservationDto>>, ApiError> {
    // A missing body updates nothing but the status.
    let request = body.map(|ValidatedJson(r)| r).unwrap_or_default();
    let updated = state
        .repos
        .update_details(&id, request.into())
        .await
        .map_err(ApiError::bad_request)?;

    Ok(Json(updated.map(Into::into)))
}

#[utoipa::path(
    put,
    path = "/reservations/{id}/cancel",
    tag = "Reservations",
    params(("id" = String, Path, description = "The ID of the reservation to cancel")),
    responses(
        (status = 200, description = "Reservation canceled successfully (null when the id matches nothing)", body = Option<ReservationDto>),
        (status = 400, description = "Bad request", body = ErrorBody)
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<ReservationDto>>, ApiError> {
    set_status(&state, &id, ReservationStatus::Canceled).await
}

#[utoipa::path(
    put,
    path = "/reservations/{id}/fail",
    tag = "Reservations",
    params(("id" = String, Path, description = "The ID of the reservation to mark as failed")),
    responses(
        (status = 200, description = "Reservation marked as failed successfully (null when the id matches nothing)", body = Option<ReservationDto>),
        (status = 400, description = "Bad request", body = ErrorBody)
    )
)]
pub async fn fail_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<ReservationDto>>, ApiError> {
    set_status(&state, &id, ReservationStatus::Failed).await
}

#[utoipa::path(
    put,
    path = "/reservations/{id}/confirm",
    tag = "Reservations",
    params(("id" = String, Path, description = "The ID of the reservation to confirm")),
    responses(
        (status = 200, description = "Reservation confirmed successfully (null when the id matches nothing)", body = Option<ReservationDto>),
        (status = 400, description = "Bad request", body = ErrorBody)
    )
)]
pub async fn confirm_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<ReservationDto>>, ApiError> {
    set_status(&state, &id, ReservationStatus::Confirmed).await
}

async fn set_status(
    state: &ReservationAppState,
    id: &str,
    status: ReservationStatus,
) -> Result<Json<Option<ReservationDto>>, ApiError> {
    let updated = state
        .repos
        .set_status(id, status)
        .await
        .map_err(ApiError::bad_request)?;

    if updated.is_some() {
        info!(reservation_id = %id, %status, "Reservation status changed");
    }
    Ok(Json(updated.map(Into::into)))
}
