use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use btools_core::FilterCriteria;
use btools_store::SavedSearch;

use crate::middleware::RequestId;

use super::{map_body_rejection, map_store_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn list_saved_searches(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<SavedSearch>>> {
    Json(ApiResponse {
        data: state.store.list_searches(),
        meta: ResponseMeta::new(req_id.0),
    })
}

/// `PUT /api/v1/saved-searches/{name}` with a `FilterCriteria` body.
/// Creates the search or replaces the one with the same name.
pub(super) async fn save_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(name): Path<String>,
    body: Result<Json<FilterCriteria>, JsonRejection>,
) -> Result<Json<ApiResponse<SavedSearch>>, ApiError> {
    let Json(criteria) = body.map_err(|e| map_body_rejection(req_id.0.clone(), &e))?;
    let _guard = state.saved_lock.lock().await;
    let saved = state
        .store
        .save_search(&name, &criteria)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: saved,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_saved_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<SavedSearch>>, ApiError> {
    let saved = state
        .store
        .load_search(&name)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: saved,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn delete_saved_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.saved_lock.lock().await;
    state
        .store
        .delete_search(&name)
        .map_err(|e| map_store_error(req_id.0, &e))?;
    Ok(StatusCode::NO_CONTENT)
}
