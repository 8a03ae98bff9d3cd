//! School registration and listing API routes.
//!
//! Paths match the ones the registration form and gallery already call:
//! `POST /api/addSchool` (multipart) and `GET /api/getSchools`.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use schooldir_common::catalog::{KNOWN_CITIES, KNOWN_STATES};
use schooldir_common::validation::ValidationErrors;
use schooldir_common::{Error, ImageUpload, School, SchoolFilter, SchoolSubmission, SchoolSummary};
use serde::Serialize;

use super::error::AppError;
use super::AppContext;

/// Create school routes.
pub fn school_routes() -> Router<AppContext> {
    Router::new()
        .route("/addSchool", post(add_school))
        .route("/getSchools", get(get_schools))
        .route("/form-options", get(form_options))
}

// ============================================================================
// Response types
// ============================================================================

/// Response after registering a school.
#[derive(Debug, Serialize)]
pub struct AddSchoolResponse {
    pub message: &'static str,
    pub data: SchoolSummary,
}

/// Choices offered by the registration form.
#[derive(Debug, Serialize)]
pub struct FormOptionsResponse {
    pub cities: &'static [&'static str],
    pub states: &'static [&'static str],
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a school from a multipart form.
///
/// Text fields: `name`, `address`, `city`, `customCity` (when `city` is
/// `Other`), `state`, `contact`, `emailId`. File field: `image`.
async fn add_school(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AddSchoolResponse>, AppError> {
    let multipart = multipart.map_err(|e| Error::invalid_input(e.body_text()))?;
    let submission = read_submission(multipart).await?;

    let school = ctx
        .schools
        .create(submission)
        .await
        .map_err(|e| AppError::new(e).with_public_message("Failed to add school"))?;

    Ok(Json(AddSchoolResponse {
        message: "School added successfully",
        data: SchoolSummary::from(&school),
    }))
}

/// List schools, newest first, filtered by `search`, `city` and `state`.
async fn get_schools(
    State(ctx): State<AppContext>,
    Query(filter): Query<SchoolFilter>,
) -> Result<Json<Vec<School>>, AppError> {
    let schools = ctx
        .schools
        .list(&filter)
        .map_err(|e| AppError::new(e).with_public_message("Failed to fetch schools"))?;

    Ok(Json(schools))
}

/// Known cities and states for populating the form.
async fn form_options() -> Json<FormOptionsResponse> {
    Json(FormOptionsResponse {
        cities: KNOWN_CITIES,
        states: KNOWN_STATES,
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Collect the known form fields. Unknown fields are skipped; a repeated
/// field keeps its last value.
async fn read_submission(mut multipart: Multipart) -> Result<SchoolSubmission, Error> {
    let mut submission = SchoolSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                // A plain text part named `image` is not an upload.
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                submission.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            "name" | "address" | "city" | "customCity" | "state" | "contact" | "emailId" => {
                let value = field.text().await.map_err(multipart_error)?;
                let slot = match name.as_str() {
                    "name" => &mut submission.name,
                    "address" => &mut submission.address,
                    "city" => &mut submission.city,
                    "customCity" => &mut submission.custom_city,
                    "state" => &mut submission.state,
                    "contact" => &mut submission.contact,
                    _ => &mut submission.email_id,
                };
                *slot = Some(value);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok(submission)
}

fn multipart_error(e: MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let mut errors = ValidationErrors::default();
        errors.push("image", "request body exceeds the upload size limit");
        Error::Validation(errors)
    } else {
        Error::invalid_input(format!("Malformed multipart body: {}", e.body_text()))
    }
}
