use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::gazette::{Gazette, GazetteQuery, NewGazette};

use super::store::{GazetteStore, StoreError};

pub const MONTH_YEAR_REQUIRED: &str = "Both month and year must be provided for filtering.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => {
                error!("Store failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn GazetteStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn GazetteStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/gazettes/", get(read_gazettes).post(create_gazette))
        .route("/gazettes", get(read_gazettes).post(create_gazette))
        .layer(cors)
        .with_state(state)
}

async fn create_gazette(
    State(state): State<AppState>,
    Json(body): Json<NewGazette>,
) -> Result<Json<Gazette>, ApiError> {
    if body.url.trim().is_empty() {
        return Err(ApiError::BadRequest("url must not be empty".to_string()));
    }
    Ok(Json(state.store.create(body).await?))
}

/// month と year が両方あれば公開年月で絞り込み、どちらも無ければページング一覧
async fn read_gazettes(
    State(state): State<AppState>,
    Query(query): Query<GazetteQuery>,
) -> Result<Json<Vec<Gazette>>, ApiError> {
    if let Some(month) = query.month {
        if !(1..=12).contains(&month) {
            return Err(ApiError::BadRequest(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
    }

    let gazettes = match (query.month, query.year) {
        (Some(month), Some(year)) => state.store.list_by_month(month, year).await?,
        (None, None) => {
            let skip = query.skip.unwrap_or(0);
            let limit = query.limit.unwrap_or(GazetteQuery::DEFAULT_LIMIT);
            state.store.list(skip, limit).await?
        }
        _ => return Err(ApiError::BadRequest(MONTH_YEAR_REQUIRED.to_string())),
    };

    Ok(Json(gazettes))
}
