// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Assigns request IDs, opens a span per request, and bounds request duration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use std::time::Duration;

use axum::Router;
use http::{header::HeaderName, Request};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::constants::headers::REQUEST_ID;

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Span for one HTTP request, carrying the request id set by [`SetRequestIdLayer`]
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Wrap a router with request id, tracing, body limit, and timeout layers
///
/// Layers run outermost first: the request id is set before the span opens so
/// every log line in the request carries it, and it is copied onto the response.
#[must_use]
pub fn with_request_layers(router: Router, request_timeout: Duration) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID);

    router
        .layer(TimeoutLayer::new(request_timeout))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(create_request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}
