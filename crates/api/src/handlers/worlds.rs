//! Handlers for the worlds endpoint.
//!
//! A single path serves every operation; the HTTP method and the `id` /
//! `report` query parameters select what happens. Uploads resolve missing
//! metadata from the TBW payload, updates overwrite fields verbatim.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use worlds_core::types::DbId;
use worlds_core::world::{resolve_patch, resolve_upload};
use worlds_db::models::world::{PublicWorld, WorldPayload};

use crate::body::FieldBody;
use crate::error::{AppError, AppResult};
use crate::query::WorldQuery;
use crate::response::Acknowledged;
use crate::state::AppState;

/// Parse a world id from a query value.
///
/// A value that is not an integer cannot name a stored world, so it is
/// reported the same way as an unknown id.
fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| AppError::world_not_found())
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Read worlds.
///
/// - `?id=N` returns `{"tbw": ...}` and counts one download.
/// - `?report=N` counts one report and returns `OK`.
/// - otherwise lists every world's public projection, newest first.
///
/// `id` wins when both parameters are given.
pub async fn read_worlds(
    State(state): State<AppState>,
    params: WorldQuery,
) -> AppResult<Response> {
    if let Some(raw) = params.id() {
        return fetch_world(&state, parse_id(raw)?).await;
    }
    if let Some(raw) = params.report() {
        return report_world(&state, parse_id(raw)?).await;
    }
    list_worlds(&state).await
}

async fn list_worlds(state: &AppState) -> AppResult<Response> {
    let worlds: Vec<PublicWorld> = state
        .store
        .list()
        .await?
        .iter()
        .map(PublicWorld::from)
        .collect();

    Ok(Json(worlds).into_response())
}

async fn fetch_world(state: &AppState, id: DbId) -> AppResult<Response> {
    let tbw = state
        .store
        .record_download(id)
        .await?
        .ok_or_else(AppError::world_not_found)?;

    tracing::debug!(world_id = id, "World downloaded");

    Ok(Json(WorldPayload { tbw }).into_response())
}

async fn report_world(state: &AppState, id: DbId) -> AppResult<Response> {
    if !state.store.record_report(id).await? {
        return Err(AppError::world_not_found());
    }

    tracing::info!(world_id = id, "World reported");

    Ok(Acknowledged.into_response())
}

// ---------------------------------------------------------------------------
// POST /
// ---------------------------------------------------------------------------

/// Upload a new world.
///
/// `name` and `tbw` are required. `version`, `author` and `image` fall back
/// to metadata embedded in the payload, then to defaults.
pub async fn upload_world(
    State(state): State<AppState>,
    FieldBody(fields): FieldBody,
) -> AppResult<Acknowledged> {
    let upload = resolve_upload(&fields)?;
    let world = state.store.create(&upload).await?;

    tracing::info!(
        world_id = world.id,
        name = %world.name,
        author = %world.author,
        "World uploaded",
    );

    Ok(Acknowledged)
}

// ---------------------------------------------------------------------------
// PUT / PATCH /?id=N
// ---------------------------------------------------------------------------

/// Overwrite the supplied fields of an existing world.
///
/// Present keys are stored as given, including empty strings.
pub async fn update_world(
    State(state): State<AppState>,
    params: WorldQuery,
    FieldBody(fields): FieldBody,
) -> AppResult<Acknowledged> {
    let raw = params
        .id()
        .ok_or_else(|| AppError::BadRequest("id is required for update".into()))?;
    let id = parse_id(raw)?;

    let patch = resolve_patch(&fields);
    state
        .store
        .update(id, &patch)
        .await?
        .ok_or_else(AppError::world_not_found)?;

    tracing::info!(world_id = id, "World updated");

    Ok(Acknowledged)
}

// ---------------------------------------------------------------------------
// DELETE /?id=N
// ---------------------------------------------------------------------------

/// Permanently remove a world.
pub async fn delete_world(
    State(state): State<AppState>,
    params: WorldQuery,
) -> AppResult<Acknowledged> {
    let raw = params
        .id()
        .ok_or_else(|| AppError::BadRequest("id is required for delete".into()))?;
    let id = parse_id(raw)?;

    if !state.store.delete(id).await? {
        return Err(AppError::world_not_found());
    }

    tracing::info!(world_id = id, "World deleted");

    Ok(Acknowledged)
}

// ---------------------------------------------------------------------------
// Anything else
// ---------------------------------------------------------------------------

/// Fallback for methods the endpoint does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
