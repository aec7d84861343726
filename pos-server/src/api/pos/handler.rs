//! POS API Handlers
//!
//! Store calls are short (in-memory work plus one redb commit) and run
//! inline on the request task.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::request::{
    AddLineInput, BootstrapResponse, CheckEnvelope, CheckPatch, CreateSessionRequest,
    EnsureCheckRequest, FloorResponse, LineEnvelope, LinePatch, OkResponse, SessionOpened,
};
use shared::util::now_millis;

/// Malformed JSON is a 400 with the usual error body
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

/// Body that may be empty; an empty body parses as `T::default()`
fn optional_json_body<T: DeserializeOwned + Default>(body: &Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))
}

/// GET /pos/bootstrap
pub async fn bootstrap(State(state): State<ServerState>) -> Json<BootstrapResponse> {
    Json(state.pos.bootstrap())
}

/// GET /pos/floor
pub async fn floor(State(state): State<ServerState>) -> Json<FloorResponse> {
    Json(FloorResponse {
        blocks: state.pos.table_blocks(now_millis()),
    })
}

/// POST /pos/sessions - 开台
pub async fn create_session(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SessionOpened>)> {
    let req = json_body(payload)?;
    let opened =
        state
            .pos
            .create_session(&req.table_id, req.party_size, req.reservation_id, &user.id)?;
    Ok((StatusCode::CREATED, Json(opened)))
}

/// POST /pos/tables/{tableId}/checks - 获取或创建账单
///
/// `tableSlugs` replaces the requested set; the path table is prepended when
/// missing from it.
pub async fn ensure_check(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(table_id): Path<String>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<CheckEnvelope>)> {
    let req: EnsureCheckRequest = optional_json_body(&body)?;
    let table_ids = requested_tables(table_id, req.table_slugs);
    let check = state.pos.ensure_check_for_tables(&table_ids, &user.id)?;
    Ok((StatusCode::CREATED, Json(CheckEnvelope { check })))
}

fn requested_tables(path_table: String, slugs: Option<Vec<String>>) -> Vec<String> {
    match slugs {
        Some(mut slugs) => {
            if !slugs.iter().any(|s| s.trim() == path_table.trim()) {
                slugs.insert(0, path_table);
            }
            slugs
        }
        None => vec![path_table],
    }
}

/// GET /pos/checks/{checkId}
pub async fn get_check(
    State(state): State<ServerState>,
    Path(check_id): Path<String>,
) -> AppResult<Json<CheckEnvelope>> {
    let check = state.pos.get_check(&check_id)?;
    Ok(Json(CheckEnvelope { check }))
}

/// PATCH /pos/checks/{checkId} - 乐观锁更新
pub async fn update_check(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(check_id): Path<String>,
    payload: Result<Json<CheckPatch>, JsonRejection>,
) -> AppResult<Json<CheckEnvelope>> {
    let patch = json_body(payload)?;
    let check = state.pos.update_check(&check_id, patch, &user.id)?;
    Ok(Json(CheckEnvelope { check }))
}

/// POST /pos/checks/{checkId}/lines - 加菜
pub async fn add_line(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(check_id): Path<String>,
    payload: Result<Json<AddLineInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<LineEnvelope>)> {
    let input = json_body(payload)?;
    let added = state.pos.add_line(&check_id, input, &user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(LineEnvelope {
            line: added.line,
            revision: added.revision,
        }),
    ))
}

/// PATCH /pos/checks/{checkId}/lines - 改菜 (未找到返回 204)
pub async fn update_line(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(check_id): Path<String>,
    payload: Result<Json<LinePatch>, JsonRejection>,
) -> AppResult<Response> {
    let patch = json_body(payload)?;
    let response = match state.pos.update_line(&check_id, patch, &user.id)? {
        Some(updated) => Json(LineEnvelope {
            line: updated.line,
            revision: updated.revision,
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

/// DELETE /pos/checks/{checkId}/lines - 清空
pub async fn clear_lines(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(check_id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let revision = state.pos.clear_lines(&check_id, &user.id)?;
    Ok(Json(OkResponse { ok: true, revision }))
}

/// DELETE /pos/checks/{checkId}/lines/{lineId} (未找到返回 204)
pub async fn remove_line(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((check_id, line_id)): Path<(String, String)>,
) -> AppResult<Response> {
    let response = match state.pos.remove_line(&check_id, &line_id, &user.id)? {
        Some(revision) => Json(OkResponse { ok: true, revision }).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}
