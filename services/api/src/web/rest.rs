//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification. Handlers only translate between
//! HTTP and the schedule engine; conflict lists are passed through verbatim
//! and never recomputed here.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use schedule_core::domain::{Conflict, Enrollment, NewEnrollment, Schedule, TimeBlock};
use schedule_core::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_schedule_handler,
        list_schedules_handler,
        get_schedule_handler,
        delete_schedule_handler,
        add_enrollment_handler,
        remove_enrollment_handler,
        clear_schedule_handler,
        section_blocks_handler,
    ),
    components(
        schemas(
            CreateSchedulePayload,
            AddEnrollmentPayload,
            ScheduleDto,
            ScheduleViewDto,
            EnrollmentDto,
            TimeBlockDto,
            ConflictDto,
            AddEnrollmentResponse,
            ConflictListResponse,
        )
    ),
    tags(
        (name = "Schedule API", description = "Schedule composition and conflict detection endpoints.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The request payload for creating a schedule.
#[derive(Deserialize, ToSchema)]
pub struct CreateSchedulePayload {
    pub name: String,
    /// Optional `{PA|OI}YYYY` semester code, e.g. `OI2025`.
    pub semester: Option<String>,
}

/// The request payload for adding a course section to a schedule.
#[derive(Deserialize, ToSchema)]
pub struct AddEnrollmentPayload {
    pub subject_id: Uuid,
    pub instructor_id: Uuid,
    pub section_code: String,
    pub subject_name: String,
    pub instructor_name: String,
    #[serde(default)]
    pub credits: u32,
}

#[derive(Serialize, ToSchema)]
pub struct ScheduleDto {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub semester: Option<String>,
    pub total_credits: u32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Schedule> for ScheduleDto {
    fn from(s: Schedule) -> Self {
        Self {
            id: s.id,
            owner_id: s.owner_id,
            name: s.name,
            semester: s.semester,
            total_credits: s.total_credits,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// One weekly meeting of a section, as plain render-ready data.
#[derive(Serialize, ToSchema)]
pub struct TimeBlockDto {
    pub section_code: String,
    /// Canonical lower-case day name.
    pub day: String,
    /// `HH:MM`.
    pub start: String,
    /// `HH:MM`.
    pub end: String,
    pub room: Option<String>,
    pub building: Option<String>,
}

impl From<TimeBlock> for TimeBlockDto {
    fn from(b: TimeBlock) -> Self {
        Self {
            day: b.day.to_string(),
            start: b.start.to_string(),
            end: b.end.to_string(),
            section_code: b.section_code,
            room: b.room,
            building: b.building,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct EnrollmentDto {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub subject_id: Uuid,
    pub instructor_id: Uuid,
    pub section_code: String,
    pub subject_name: String,
    pub instructor_name: String,
    pub credits: u32,
    pub color: String,
    pub blocks: Vec<TimeBlockDto>,
}

impl From<Enrollment> for EnrollmentDto {
    fn from(e: Enrollment) -> Self {
        Self {
            id: e.id,
            schedule_id: e.schedule_id,
            subject_id: e.subject_id,
            instructor_id: e.instructor_id,
            section_code: e.section_code,
            subject_name: e.subject_name,
            instructor_name: e.instructor_name,
            credits: e.credits,
            color: e.color,
            blocks: e.blocks.into_iter().map(TimeBlockDto::from).collect(),
        }
    }
}

/// A detected overlap between two enrollments, carrying the intersection
/// window.
#[derive(Serialize, ToSchema)]
pub struct ConflictDto {
    pub first: EnrollmentDto,
    pub second: EnrollmentDto,
    pub day: String,
    pub start: String,
    pub end: String,
}

impl From<Conflict> for ConflictDto {
    fn from(c: Conflict) -> Self {
        Self {
            first: c.first.into(),
            second: c.second.into(),
            day: c.day.to_string(),
            start: c.start.to_string(),
            end: c.end.to_string(),
        }
    }
}

/// A schedule with its enrollments and current conflicts.
#[derive(Serialize, ToSchema)]
pub struct ScheduleViewDto {
    pub schedule: ScheduleDto,
    pub enrollments: Vec<EnrollmentDto>,
    pub conflicts: Vec<ConflictDto>,
}

/// The response payload sent after an enrollment is added. Conflicts are
/// advisory; a non-empty list does not mean the add was rejected.
#[derive(Serialize, ToSchema)]
pub struct AddEnrollmentResponse {
    pub enrollment: EnrollmentDto,
    pub conflicts: Vec<ConflictDto>,
}

/// The refreshed full conflict list after a mutation.
#[derive(Serialize, ToSchema)]
pub struct ConflictListResponse {
    pub conflicts: Vec<ConflictDto>,
}

//=========================================================================================
// Shared Handler Helpers
//=========================================================================================

/// Extracts the owning user from the `x-user-id` header.
fn owner_from_headers(headers: &HeaderMap) -> Result<Uuid, (StatusCode, String)> {
    let raw = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "x-user-id header is required".to_string(),
            )
        })?;
    Uuid::parse_str(raw)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid x-user-id format".to_string()))
}

/// Maps an engine error to an HTTP response.
fn engine_error(err: ScheduleError) -> (StatusCode, String) {
    match err {
        ScheduleError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        ScheduleError::NotFound(what) => (StatusCode::NOT_FOUND, what),
        ScheduleError::Storage(reason) => {
            error!("storage failure: {}", reason);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A storage error occurred".to_string(),
            )
        }
    }
}

fn conflict_dtos(conflicts: Vec<Conflict>) -> Vec<ConflictDto> {
    conflicts.into_iter().map(ConflictDto::from).collect()
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Create a new, empty schedule for the requesting user.
#[utoipa::path(
    post,
    path = "/schedules",
    request_body = CreateSchedulePayload,
    responses(
        (status = 201, description = "Schedule created successfully", body = ScheduleDto),
        (status = 400, description = "Missing or malformed x-user-id header"),
        (status = 422, description = "Invalid name or semester code"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn create_schedule_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSchedulePayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let owner_id = owner_from_headers(&headers)?;
    let schedule = app_state
        .schedules
        .create(owner_id, &payload.name, payload.semester.as_deref())
        .await
        .map_err(engine_error)?;
    Ok((StatusCode::CREATED, Json(ScheduleDto::from(schedule))))
}

/// List the requesting user's schedules, newest first.
#[utoipa::path(
    get,
    path = "/schedules",
    responses(
        (status = 200, description = "The user's schedules", body = [ScheduleDto]),
        (status = 400, description = "Missing or malformed x-user-id header")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn list_schedules_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let owner_id = owner_from_headers(&headers)?;
    let schedules = app_state
        .schedules
        .list(owner_id)
        .await
        .map_err(engine_error)?;
    let dtos: Vec<ScheduleDto> = schedules.into_iter().map(ScheduleDto::from).collect();
    Ok(Json(dtos))
}

/// Fetch a schedule with its enrollments, their time blocks and the current
/// conflict list.
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    responses(
        (status = 200, description = "The schedule with enrollments and conflicts", body = ScheduleViewDto),
        (status = 404, description = "Schedule not found")
    ),
    params(
        ("id" = Uuid, Path, description = "The schedule ID.")
    )
)]
pub async fn get_schedule_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let view = app_state.schedules.get(id).await.map_err(engine_error)?;
    Ok(Json(ScheduleViewDto {
        schedule: view.schedule.into(),
        enrollments: view
            .enrollments
            .into_iter()
            .map(EnrollmentDto::from)
            .collect(),
        conflicts: conflict_dtos(view.conflicts),
    }))
}

/// Delete a schedule and all of its enrollments. Deleting an already-deleted
/// schedule succeeds.
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "The schedule ID.")
    )
)]
pub async fn delete_schedule_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state.schedules.delete(id).await.map_err(engine_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a course section to a schedule.
///
/// Time overlaps with existing enrollments are advisory: the section is
/// committed regardless and the full refreshed conflict list is returned for
/// the client to render.
#[utoipa::path(
    post,
    path = "/schedules/{id}/enrollments",
    request_body = AddEnrollmentPayload,
    responses(
        (status = 201, description = "Enrollment added; conflicts, if any, are advisory", body = AddEnrollmentResponse),
        (status = 404, description = "Schedule not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "The schedule ID.")
    )
)]
pub async fn add_enrollment_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddEnrollmentPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let candidate = NewEnrollment {
        subject_id: payload.subject_id,
        instructor_id: payload.instructor_id,
        section_code: payload.section_code,
        subject_name: payload.subject_name,
        instructor_name: payload.instructor_name,
        credits: payload.credits,
    };
    let (enrollment, conflicts) = app_state
        .schedules
        .add_enrollment(id, candidate)
        .await
        .map_err(engine_error)?;
    Ok((
        StatusCode::CREATED,
        Json(AddEnrollmentResponse {
            enrollment: enrollment.into(),
            conflicts: conflict_dtos(conflicts),
        }),
    ))
}

/// Remove an enrollment from a schedule. Removing an enrollment that is
/// already gone succeeds and returns the current conflict list.
#[utoipa::path(
    delete,
    path = "/schedules/{id}/enrollments/{enrollment_id}",
    responses(
        (status = 200, description = "Refreshed conflict list after the removal", body = ConflictListResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "The schedule ID."),
        ("enrollment_id" = Uuid, Path, description = "The enrollment ID.")
    )
)]
pub async fn remove_enrollment_handler(
    State(app_state): State<Arc<AppState>>,
    Path((id, enrollment_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let conflicts = app_state
        .schedules
        .remove_enrollment(id, enrollment_id)
        .await
        .map_err(engine_error)?;
    Ok(Json(ConflictListResponse {
        conflicts: conflict_dtos(conflicts),
    }))
}

/// Remove every enrollment from a schedule.
#[utoipa::path(
    delete,
    path = "/schedules/{id}/enrollments",
    responses(
        (status = 204, description = "Schedule cleared"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = Uuid, Path, description = "The schedule ID.")
    )
)]
pub async fn clear_schedule_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state.schedules.clear(id).await.map_err(engine_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// The weekly time blocks published for a section code, for grid previews.
#[utoipa::path(
    get,
    path = "/sections/{code}/blocks",
    responses(
        (status = 200, description = "The section's weekly time blocks", body = [TimeBlockDto]),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("code" = String, Path, description = "The catalog section code (NRC).")
    )
)]
pub async fn section_blocks_handler(
    State(app_state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let blocks = app_state
        .schedules
        .section_blocks(&code)
        .await
        .map_err(engine_error)?;
    let dtos: Vec<TimeBlockDto> = blocks.into_iter().map(TimeBlockDto::from).collect();
    Ok(Json(dtos))
}
