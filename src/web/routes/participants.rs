use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::services::participant_service::{self, ParticipantView};

#[derive(Debug, Deserialize)]
pub struct UpdateParticipantBody {
    geotag: Option<String>,
    status: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateBody {
    name: String,
    email: String,
    geotag: String,
    status: bool,
}

fn database_error(e: sqlx::Error) -> (StatusCode, Json<Value>) {
    tracing::warn!("participant query failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "database" })),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not_found" })),
    )
}

fn invalid_payload(detail: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": "invalid_payload", "detail": detail })),
    )
}

pub async fn list_participants_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<ParticipantView>>, (StatusCode, Json<Value>)> {
    participant_service::list_participant_views(&pool)
        .await
        .map(Json)
        .map_err(database_error)
}

pub async fn read_participant_handler(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<ParticipantView>, (StatusCode, Json<Value>)> {
    match participant_service::load_participant_view(&pool, &id).await {
        Ok(Some(view)) => Ok(Json(view)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(database_error(e)),
    }
}

pub async fn update_participant_handler(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Json(body): Json<UpdateParticipantBody>,
) -> Result<Json<ParticipantView>, (StatusCode, Json<Value>)> {
    participant_service::validate_update(body.geotag.as_deref(), body.status)
        .map_err(invalid_payload)?;

    match participant_service::apply_update(&pool, &id, body.geotag.as_deref(), body.status).await
    {
        Ok(Some(view)) => Ok(Json(view)),
        Ok(None) => {
            tracing::warn!(participant_id = %id, "update targeted an unknown participant");
            Err(not_found())
        }
        Err(e) => Err(database_error(e)),
    }
}

/// Submission endpoint for the profile form: resolves the target record by a
/// name+email scan over the full list, then applies the same partial merge as
/// a direct update.
pub async fn update_profile_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<ProfileUpdateBody>,
) -> Result<Json<ParticipantView>, (StatusCode, Json<Value>)> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() {
        return Err(invalid_payload("name and email must not be empty"));
    }
    participant_service::validate_update(Some(&body.geotag), Some(body.status))
        .map_err(invalid_payload)?;

    let resolved = participant_service::resolve_by_identity(&pool, &body.name, &body.email)
        .await
        .map_err(database_error)?;
    let Some(id) = resolved else {
        tracing::info!(email = %body.email, "profile submission matched no participant");
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "not_matched" })),
        ));
    };

    match participant_service::apply_update(&pool, &id, Some(&body.geotag), Some(body.status))
        .await
    {
        Ok(Some(view)) => Ok(Json(view)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(database_error(e)),
    }
}
