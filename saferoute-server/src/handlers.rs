use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::{DateTime, Utc};
use geojson::FeatureCollection;
use saferoute::{SafeRouteRequest, SafeRouteResponse};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// Route response with generation metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEnvelope {
    #[serde(flatten)]
    pub route: SafeRouteResponse,
    pub metadata: RouteMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMetadata {
    pub generated_at: DateTime<Utc>,
    pub source: String,
}

impl From<SafeRouteResponse> for RouteEnvelope {
    fn from(route: SafeRouteResponse) -> Self {
        Self {
            route,
            metadata: RouteMetadata {
                generated_at: Utc::now(),
                source: concat!("saferoute ", env!("CARGO_PKG_VERSION")).to_string(),
            },
        }
    }
}

/// Entry of a batch response: either a route or the reason it failed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Route(RouteEnvelope),
    Error { error: String },
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn route(
    State(state): State<AppState>,
    payload: Result<Json<SafeRouteRequest>, JsonRejection>,
) -> Result<Json<RouteEnvelope>, ApiError> {
    let Json(request) = payload?;
    let response = saferoute::route_request(state.scorer(), &request)?;

    Ok(Json(response.into()))
}

pub async fn route_geojson(
    State(state): State<AppState>,
    payload: Result<Json<SafeRouteRequest>, JsonRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let Json(request) = payload?;
    let collection = saferoute::route_geojson(state.scorer(), &request)?
        .ok_or(saferoute_core::Error::NoRouteFound)?;

    Ok(Json(collection))
}

pub async fn routes(
    State(state): State<AppState>,
    payload: Result<Json<Vec<SafeRouteRequest>>, JsonRejection>,
) -> Result<Json<Vec<BatchEntry>>, ApiError> {
    let Json(requests) = payload?;
    let limit = state.config().server.max_batch_size;
    if requests.len() > limit {
        return Err(ApiError::BatchTooLarge {
            size: requests.len(),
            limit,
        });
    }

    tracing::debug!(count = requests.len(), "routing batch");
    // A blocking task cannot be cancelled. If the timeout layer answers first,
    // the batch still runs to completion and its results are dropped, so
    // `max_batch_size` also bounds that wasted work.
    let results = tokio::task::spawn_blocking(move || {
        saferoute::calculate_safe_routes(state.scorer(), &requests)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("batch routing task failed: {e}")))?;

    let entries = results
        .into_iter()
        .map(|result| match result {
            Ok(response) => BatchEntry::Route(response.into()),
            Err(e) => BatchEntry::Error {
                error: e.to_string(),
            },
        })
        .collect();

    Ok(Json(entries))
}
