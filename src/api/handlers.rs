//! Handlers of the protected inspection API.

use axum::{
    body::Body,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::schemas;
use crate::cache::{FiltersBad, FiltersGood};
use crate::http::server::AppState;
use crate::routing::classifier::ApiRoute;

/// Run the operation selected by the route table.
pub async fn handle(state: &AppState, route: ApiRoute<'_>, body: Body) -> Response {
    let result = match route {
        ApiRoute::Events => events(state),
        ApiRoute::Summary => summary(state),
        ApiRoute::Reset => reset(state),
        ApiRoute::Good => good(state, FiltersGood::default()),
        ApiRoute::FilterGood => read_filter(body, state.max_body_size)
            .await
            .and_then(|filters| good(state, filters)),
        ApiRoute::Bad => bad(state, FiltersBad::default()),
        ApiRoute::FilterBad => read_filter(body, state.max_body_size)
            .await
            .and_then(|filters| bad(state, filters)),
        ApiRoute::Schema { vendor, name, version } => {
            schemas::lookup_schema(state.resolver.as_ref(), vendor, name, version)
                .await
                .map(IntoResponse::into_response)
        }
        ApiRoute::NotFound => Err(ApiError::PathNotFound),
    };

    result.unwrap_or_else(IntoResponse::into_response)
}

fn events(state: &AppState) -> Result<Response, ApiError> {
    let events: Vec<Value> = state
        .cache
        .get_good_and_incomplete()?
        .iter()
        .map(|e| e.event_json().clone())
        .collect();
    Ok(Json(events).into_response())
}

fn summary(state: &AppState) -> Result<Response, ApiError> {
    Ok(Json(state.cache.get_summary()?).into_response())
}

fn reset(state: &AppState) -> Result<Response, ApiError> {
    state.cache.reset()?;
    summary(state)
}

fn good(state: &AppState, filters: FiltersGood) -> Result<Response, ApiError> {
    Ok(Json(state.cache.filter_good(&filters)?).into_response())
}

fn bad(state: &AppState, filters: FiltersBad) -> Result<Response, ApiError> {
    Ok(Json(state.cache.filter_bad(&filters)?).into_response())
}

async fn read_filter<T: DeserializeOwned>(body: Body, limit: usize) -> Result<T, ApiError> {
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| ApiError::InvalidFilter(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidFilter(e.to_string()))
}
