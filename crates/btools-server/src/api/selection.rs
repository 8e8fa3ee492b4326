//! Selection handlers. Every effective change is written to the store
//! before the response is sent.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use btools_core::SelectionSet;
use btools_query::QuerySession;
use btools_store::Store;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SelectionData {
    ids: Vec<String>,
    count: usize,
    /// Whether the request modified the selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    changed: Option<bool>,
}

impl SelectionData {
    fn new(selection: &SelectionSet, changed: Option<bool>) -> Self {
        Self {
            ids: selection.ids().to_vec(),
            count: selection.len(),
            changed,
        }
    }
}

async fn session(state: &AppState) -> QuerySession<Store> {
    let snapshot = state.snapshot().await;
    QuerySession::with_sink(
        snapshot.bloggers,
        state.query_context(),
        state.store.read_selection(),
        state.store.clone(),
    )
}

pub(super) async fn get_selection(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SelectionData>> {
    let selection = state.store.read_selection();
    Json(ApiResponse {
        data: SelectionData::new(&selection, None),
        meta: ResponseMeta::new(req_id.0),
    })
}

/// `PUT /api/v1/selection/{id}`. The id must exist in the current catalog.
pub(super) async fn select_blogger(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SelectionData>>, ApiError> {
    let _guard = state.selection_lock.lock().await;
    let mut session = session(&state).await;

    if session.find(&id).is_none() {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("blogger '{id}' not found"),
        ));
    }

    let changed = session
        .toggle(&id, true)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: SelectionData::new(session.selection(), Some(changed)),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `DELETE /api/v1/selection/{id}`. Ids no longer in the catalog can still
/// be removed.
pub(super) async fn unselect_blogger(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SelectionData>>, ApiError> {
    let _guard = state.selection_lock.lock().await;
    let mut session = session(&state).await;

    let changed = session
        .toggle(&id, false)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: SelectionData::new(session.selection(), Some(changed)),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn clear_selection(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SelectionData>>, ApiError> {
    let _guard = state.selection_lock.lock().await;
    let mut session = session(&state).await;
    let changed = !session.selection().is_empty();

    session
        .clear_selection()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: SelectionData::new(session.selection(), Some(changed)),
        meta: ResponseMeta::new(req_id.0),
    }))
}
