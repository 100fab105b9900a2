//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::reservation::ReservationRepository;
use crate::interfaces::http::common::ErrorBody;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::reservations::{self, ReservationAppState};

/// Path prefix the reservation routes are mounted under
pub const RESERVATIONS_PREFIX: &str = "/reservations";

/// Path of the Swagger UI
pub const API_DOCS_PATH: &str = "/api-docs";

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::list_client_reservations,
        reservations::update_reservation,
        reservations::cancel_reservation,
        reservations::fail_reservation,
        reservations::confirm_reservation,
    ),
    components(
        schemas(
            ErrorBody,
            reservations::CreateReservationRequest,
            reservations::UpdateReservationRequest,
            reservations::ReservationDto,
        )
    ),
    tags(
        (name = "Reservations", description = "API for managing hotel reservations"),
    ),
    info(
        title = "Reservations API",
        version = "1.0.0",
        description = "API for managing hotel reservations",
    )
)]
pub struct ApiDoc;

/// Routes relative to [`RESERVATIONS_PREFIX`].
///
/// `/client/{client_id}` is a static segment, so it takes precedence over
/// `/{id}` for GET.
fn reservation_routes(state: ReservationAppState) -> Router {
    Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/client/{client_id}",
            get(reservations::list_client_reservations),
        )
        .route(
            "/{id}",
            get(reservations::get_reservation).put(reservations::update_reservation),
        )
        .route("/{id}/cancel", put(reservations::cancel_reservation))
        .route("/{id}/fail", put(reservations::fail_reservation))
        .route("/{id}/confirm", put(reservations::confirm_reservation))
        .with_state(state)
}

/// Create the API router with all routes
pub fn create_api_router(repos: Arc<dyn ReservationRepository>) -> Router {
    let state = ReservationAppState { repos };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new(API_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi());

    // Nested "/" only matches the bare prefix.
    let collection_with_slash = get(reservations::list_reservations)
        .post(reservations::create_reservation)
        .with_state(state.clone());

    Router::new()
        .merge(swagger_routes)
        .route(&format!("{}/", RESERVATIONS_PREFIX), collection_with_slash)
        .nest(RESERVATIONS_PREFIX, reservation_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

// ── Tests ──────────────────────────────────────────────────────
