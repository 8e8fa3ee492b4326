mod bloggers;
mod catalog;
mod saved;
mod selection;

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use btools_catalog::{CatalogClient, CatalogOrigin, CatalogSource, LoadedCatalog};
use btools_core::Blogger;
use btools_query::QueryContext;
use btools_store::{Store, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

/// The catalog currently served. Replaced wholesale on reload.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub bloggers: Arc<[Blogger]>,
    pub origin: CatalogOrigin,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn new(loaded: LoadedCatalog) -> Self {
        Self {
            bloggers: loaded.bloggers.into(),
            origin: loaded.origin,
            loaded_at: Utc::now(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RwLock<CatalogSnapshot>>,
    pub store: Store,
    // Serializes read-modify-write cycles on the selection document.
    selection_lock: Arc<Mutex<()>>,
    // Same for the saved-search document.
    saved_lock: Arc<Mutex<()>>,
    pub source: CatalogSource,
    pub client: CatalogClient,
    pub gender_dominance_min: f64,
}

impl AppState {
    #[must_use]
    pub fn new(
        loaded: LoadedCatalog,
        store: Store,
        source: CatalogSource,
        client: CatalogClient,
        gender_dominance_min: f64,
    ) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(CatalogSnapshot::new(loaded))),
            store,
            selection_lock: Arc::new(Mutex::new(())),
            saved_lock: Arc::new(Mutex::new(())),
            source,
            client,
            gender_dominance_min,
        }
    }

    pub(super) async fn snapshot(&self) -> CatalogSnapshot {
        self.catalog.read().await.clone()
    }

    pub(super) async fn replace_catalog(&self, snapshot: CatalogSnapshot) {
        *self.catalog.write().await = snapshot;
    }

    pub(super) fn query_context(&self) -> QueryContext {
        QueryContext::new(Utc::now().date_naive())
            .with_gender_dominance_min(self.gender_dominance_min)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    catalog: &'static str,
    catalog_size: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "catalog_unavailable" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_store_error(request_id: String, error: &StoreError) -> ApiError {
    match error {
        StoreError::NotFound(name) => {
            ApiError::new(request_id, "not_found", format!("saved search '{name}' not found"))
        }
        StoreError::Validation(message) => {
            ApiError::new(request_id, "validation_error", message.clone())
        }
        _ => {
            tracing::error!(error = %error, "store operation failed");
            ApiError::new(request_id, "internal_error", "store operation failed")
        }
    }
}

/// Wraps a body the JSON extractor refused (bad syntax, wrong content type)
/// in the usual error envelope.
pub(super) fn map_body_rejection(request_id: String, rejection: &JsonRejection) -> ApiError {
    ApiError::new(request_id, "bad_request", rejection.body_text())
}

pub(super) fn origin_label(origin: CatalogOrigin) -> &'static str {
    match origin {
        CatalogOrigin::Source => "source",
        CatalogOrigin::Fallback => "fallback",
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/bloggers", get(bloggers::list_bloggers))
        .route("/api/v1/bloggers/query", post(bloggers::query_bloggers))
        .route("/api/v1/bloggers/{id}", get(bloggers::get_blogger))
        .route(
            "/api/v1/selection",
            get(selection::get_selection).delete(selection::clear_selection),
        )
        .route(
            "/api/v1/selection/{id}",
            put(selection::select_blogger).delete(selection::unselect_blogger),
        )
        .route("/api/v1/saved-searches", get(saved::list_saved_searches))
        .route(
            "/api/v1/saved-searches/{name}",
            put(saved::save_search)
                .get(saved::get_saved_search)
                .delete(saved::delete_saved_search),
        )
        .route("/api/v1/catalog/reload", post(catalog::reload_catalog))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let snapshot = state.snapshot().await;
    let status = match snapshot.origin {
        CatalogOrigin::Source => "ok",
        CatalogOrigin::Fallback => "degraded",
    };

    Json(ApiResponse {
        data: HealthData {
            status,
            catalog: origin_label(snapshot.origin),
            catalog_size: snapshot.bloggers.len(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
