//! Admin API routes.
//!
//! Bootstrap is exposed over HTTP so a fresh deployment can be initialized
//! without shell access; it is idempotent and safe to call repeatedly.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::error::AppError;
use super::AppContext;

/// Create admin routes.
pub fn admin_routes() -> Router<AppContext> {
    Router::new().route("/init-db", get(init_db))
}

/// Response after bootstrapping the database.
#[derive(Debug, Serialize)]
pub struct InitDbResponse {
    pub message: &'static str,
}

/// Create the schools table if it does not exist.
async fn init_db(State(ctx): State<AppContext>) -> Result<Json<InitDbResponse>, AppError> {
    ctx.schools
        .bootstrap()
        .map_err(|e| AppError::new(e).with_public_message("Failed to create tables"))?;

    Ok(Json(InitDbResponse {
        message: "Database tables created successfully",
    }))
}
