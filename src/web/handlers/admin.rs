// Admin API — read and update scalar parameters in the params store.
//
// Updates take effect on the next user request: the store re-reads the
// file on every lookup, so there is no cache to invalidate.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct UpdateParamRequest {
    pub value: i64,
}

/// GET /admin/api/params/{name} — the scalar at a dotted key.
pub async fn get_param(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.params.get(&name) {
        Ok(value) => Json(serde_json::json!({ "name": name, "value": value })).into_response(),
        Err(e) => {
            tracing::debug!(param = %name, error = %e, "param lookup failed");
            api_error(
                StatusCode::NOT_FOUND,
                &format!("Parameter '{name}' not found"),
            )
        }
    }
}

/// PUT /admin/api/params/{name} — update the scalar at a dotted key.
pub async fn update_param(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<UpdateParamRequest>,
) -> Response {
    // Reject unknown names up front so a typo cannot grow the file.
    if state.params.get(&name).is_err() {
        return api_error(
            StatusCode::NOT_FOUND,
            &format!("Parameter '{name}' not found"),
        );
    }

    match state.params.set(&name, req.value) {
        Ok(()) => Json(serde_json::json!({ "name": name, "value": req.value })).into_response(),
        Err(e) => {
            tracing::error!(param = %name, error = %e, "param update failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
