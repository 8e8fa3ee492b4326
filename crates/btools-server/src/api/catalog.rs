use axum::{extract::State, Extension, Json};
use btools_catalog::{load_catalog, CatalogOrigin, LoadedCatalog};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{origin_label, ApiError, ApiResponse, AppState, CatalogSnapshot, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ReloadData {
    catalog: &'static str,
    catalog_size: usize,
    loaded_at: DateTime<Utc>,
}

/// `POST /api/v1/catalog/reload`. On failure the current snapshot keeps
/// serving and the request fails with `catalog_unavailable`.
pub(super) async fn reload_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ReloadData>>, ApiError> {
    let bloggers = load_catalog(&state.source, &state.client)
        .await
        .map_err(|e| {
            tracing::warn!(source = %state.source, error = %e, "catalog reload failed");
            ApiError::new(
                req_id.0.clone(),
                "catalog_unavailable",
                format!("catalog reload failed: {e}"),
            )
        })?;

    let snapshot = CatalogSnapshot::new(LoadedCatalog {
        bloggers,
        origin: CatalogOrigin::Source,
    });
    let data = ReloadData {
        catalog: origin_label(snapshot.origin),
        catalog_size: snapshot.bloggers.len(),
        loaded_at: snapshot.loaded_at,
    };
    state.replace_catalog(snapshot).await;
    tracing::info!(bloggers = data.catalog_size, "catalog snapshot replaced");

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
