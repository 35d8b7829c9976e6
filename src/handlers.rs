use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    models::{Booking, BookingRequest, Class, ClassDetail, ClassRequest, ErrorResponse},
    validation::parse_date,
};

/// Serializes `body` up front so an encoding failure becomes an `Internal`
/// error body instead of a bare 500.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body).map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response())
}

#[utoipa::path(get, path = "/", tag = "booking")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Class Booking API",
        "endpoints": {
            "/classes": "Create classes (POST) or list them (GET)",
            "/classes/{id}": "Get a class with its bookings",
            "/classes/{id}/bookings": "List bookings for a class",
            "/classes.ical": "Download all classes as iCal file",
            "/bookings": "Book a member into a class (POST)"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "booking")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "booking")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    post,
    path = "/classes",
    request_body = ClassRequest,
    responses(
        (status = 201, description = "One class per day in the requested range", body = [Class]),
        (status = 400, description = "Malformed JSON or date", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn create_class(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: ClassRequest =
        serde_json::from_slice::<Option<ClassRequest>>(&body)?.unwrap_or_default();
    let start = parse_date(&request.start_date)?;
    let end = parse_date(&request.end_date)?;

    let created = state
        .store
        .create_classes(&request.name, start, end, request.capacity);
    json_response(StatusCode::CREATED, &created)
}

#[utoipa::path(
    get,
    path = "/classes",
    responses(
        (status = 200, description = "All classes in creation order", body = [Class]),
        (status = 500, description = "Serialization failure", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn list_classes(State(state): State<AppState>) -> Result<Response, ApiError> {
    let classes = state.store.list_classes();
    json_response(StatusCode::OK, &classes)
}

#[utoipa::path(
    get,
    path = "/classes/{id}",
    params(("id" = String, Path, description = "Class identifier")),
    responses(
        (status = 200, description = "Class with its bookings", body = ClassDetail),
        (status = 404, description = "No class with this id", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let class = state.store.get_class(&id)?;
    json_response(StatusCode::OK, &ClassDetail::from(class))
}

#[utoipa::path(
    get,
    path = "/classes/{id}/bookings",
    params(("id" = String, Path, description = "Class identifier")),
    responses(
        (status = 200, description = "Bookings in the order they were made", body = [Booking]),
        (status = 404, description = "No class with this id", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn list_class_bookings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let class = state.store.get_class(&id)?;
    json_response(StatusCode::OK, &class.bookings)
}

#[utoipa::path(
    get,
    path = "/classes.ical",
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar")
    ),
    tag = "booking"
)]
pub async fn get_ical(State(state): State<AppState>) -> impl IntoResponse {
    let classes = state.store.list_classes();
    let body = state.exporter.generate(&classes);
    (
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            ("content-disposition", "attachment; filename=classes.ics"),
        ],
        body,
    )
}

#[utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking request echoed with the new booking id", body = BookingRequest),
        (status = 400, description = "Malformed JSON or date", body = ErrorResponse),
        (status = 404, description = "No class with this name on this date", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let mut request: BookingRequest =
        serde_json::from_slice::<Option<BookingRequest>>(&body)?.unwrap_or_default();
    let date = parse_date(&request.date)?;

    let booking = state
        .store
        .create_booking(&request.member_name, &request.class_name, date)?;
    info!(
        "Booking {} created for {:?} in {:?} on {date}",
        booking.id, booking.member_name, request.class_name
    );

    request.id = booking.id;
    json_response(StatusCode::CREATED, &request)
}
