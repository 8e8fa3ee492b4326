use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use btools_core::{CriteriaForm, FilterCriteria};
use btools_query::{DetachedSelection, QuerySession, ResultItem, ResultView};

use crate::middleware::RequestId;

use super::{map_body_rejection, ApiError, ApiResponse, AppState, ResponseMeta};

async fn run_view(state: &AppState, criteria: &FilterCriteria) -> ResultView {
    let snapshot = state.snapshot().await;
    let mut session = QuerySession::with_sink(
        snapshot.bloggers,
        state.query_context(),
        state.store.read_selection(),
        DetachedSelection,
    );
    session.set_criteria(criteria);
    session.refresh()
}

/// `GET /api/v1/bloggers` with criteria as query parameters. Blank or
/// unparseable values leave the matching criterion inactive.
pub(super) async fn list_bloggers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(form): Query<CriteriaForm>,
) -> Json<ApiResponse<ResultView>> {
    let view = run_view(&state, &form.into_criteria()).await;
    Json(ApiResponse {
        data: view,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// `POST /api/v1/bloggers/query` with a `FilterCriteria` body. Fields of
/// the wrong shape are inactive; only a body that is not a JSON object is
/// rejected.
pub(super) async fn query_bloggers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<FilterCriteria>, JsonRejection>,
) -> Result<Json<ApiResponse<ResultView>>, ApiError> {
    let Json(criteria) = body.map_err(|e| map_body_rejection(req_id.0.clone(), &e))?;
    let view = run_view(&state, &criteria).await;
    Ok(Json(ApiResponse {
        data: view,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_blogger(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ResultItem>>, ApiError> {
    let snapshot = state.snapshot().await;
    let blogger = snapshot
        .bloggers
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("blogger '{id}' not found"),
            )
        })?;

    let item = ResultItem {
        blogger: blogger.clone(),
        usd_price: blogger.usd_price(),
        selected: state.store.read_selection().contains(&blogger.id),
    };

    Ok(Json(ApiResponse {
        data: item,
        meta: ResponseMeta::new(req_id.0),
    }))
}
