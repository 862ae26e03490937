use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tracing::error;

use crate::config::Config;
use crate::data::Catalog;
use crate::server::api::{self, ApiError, ListQuery};

pub struct AppState {
    pub catalog: Catalog,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownKind(_) | ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadQuery { .. } => StatusCode::BAD_REQUEST,
            ApiError::Load(err) => {
                error!("load failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn health() -> Json<Value> {
    Json(api::health_payload())
}

async fn list(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    api::list_payload(&state.catalog, &kind, &query).map(Json)
}

async fn show(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    api::entity_payload(&state.catalog, &kind, &id).map(Json)
}

/// `/api/*` JSON routes plus copied icons under `/assets/<kind>/<id>.png`.
pub fn router(config: &Config) -> Router {
    let state = Arc::new(AppState {
        catalog: Catalog::from_config(config),
    });

    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/:kind", get(list))
        .route("/:kind/:id", get(show));

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/assets", ServeDir::new(config.resolve(&config.output.public_dir)))
        .with_state(state)
}
