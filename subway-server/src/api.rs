use std::sync::Arc;

use axum::error_handling::HandleErrorLayer;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{BoxError, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use subway_core::prelude::*;
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;

/// Network snapshot shared read-only by every request
pub struct AppState {
    map: SubwayMap,
    by_distance: SubwayGraph,
    by_duration: SubwayGraph,
    calculator: FareCalculator,
}

impl AppState {
    pub fn new(map: SubwayMap, calculator: FareCalculator) -> Result<Self, Error> {
        Ok(Self {
            by_distance: map.graph(CostMetric::Distance)?,
            by_duration: map.graph(CostMetric::Duration)?,
            map,
            calculator,
        })
    }

    fn graph(&self, metric: CostMetric) -> &SubwayGraph {
        match metric {
            CostMetric::Distance => &self.by_distance,
            CostMetric::Duration => &self.by_duration,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Core(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_)
            | ApiError::Core(Error::InvalidArgument(_) | Error::UnsupportedCostMetric(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Core(Error::PathNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub source: StationId,
    pub target: StationId,
    /// `DISTANCE` (default) or `DURATION`
    #[serde(rename = "type")]
    pub metric: Option<String>,
    pub age: Option<Age>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationResponse {
    pub id: StationId,
    pub name: String,
}

impl From<&Station> for StationResponse {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id(),
            name: station.name().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PathResponse {
    pub stations: Vec<StationResponse>,
    pub distance: Distance,
    pub duration: Duration,
    pub fare: Amount,
}

pub fn router(state: Arc<AppState>, http: &HttpConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(stations))
        .route("/paths", get(shortest_path))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                    http.request_timeout_secs,
                )))
                .layer(GlobalConcurrencyLimitLayer::new(http.concurrency_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> &'static str {
    "ok"
}

async fn stations(State(state): State<Arc<AppState>>) -> Json<Vec<StationResponse>> {
    Json(
        state
            .map
            .stations()
            .into_iter()
            .map(StationResponse::from)
            .collect(),
    )
}

async fn shortest_path(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathResponse>, ApiError> {
    if query.source == query.target {
        return Err(ApiError::BadRequest(
            "Source and target stations must differ".to_string(),
        ));
    }

    let metric = match query.metric.as_deref() {
        Some(metric) => metric.parse()?,
        None => CostMetric::Distance,
    };

    let path = subway_core::routing::find_path(state.graph(metric), query.source, query.target)?;
    let fare = state.calculator.fare_for_path(&path, query.age);

    tracing::debug!(
        source = query.source,
        target = query.target,
        %metric,
        fare = fare.amount(),
        "Path found"
    );

    Ok(Json(PathResponse {
        stations: path.stations().iter().map(StationResponse::from).collect(),
        distance: path.distance(),
        duration: path.duration(),
        fare: fare.amount(),
    }))
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        tracing::error!("Unhandled middleware error: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
    }
}
