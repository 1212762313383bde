//! Asset fallback handler.
//!
//! Everything the explicit routes don't claim is handed to the cache
//! gateway, which proxies the upstream origin under the offline routing
//! policy.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::gateway::AssetResponse;
use crate::state::AppState;

/// Serve one asset request through the gateway.
pub async fn serve(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let target = request
        .uri()
        .path_and_query()
        .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string());

    match state.gateway().serve(&method, &target).await {
        Ok(asset) => into_http(&asset),
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Convert a gateway response into an HTTP response.
fn into_http(asset: &AssetResponse) -> Response {
    let status = StatusCode::from_u16(asset.status).unwrap_or(StatusCode::BAD_GATEWAY);

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = &asset.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type.as_str());
    }

    builder
        .body(Body::from(asset.body.to_vec()))
        .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
}
