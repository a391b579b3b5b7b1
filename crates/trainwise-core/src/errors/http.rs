// ABOUTME: Axum IntoResponse integration for AppError
// ABOUTME: Renders errors as JSON envelopes with the mapped HTTP status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;

use super::{AppError, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                error.code = ?self.code,
                error.message = %self.message,
                error.source = ?self.source,
                "request failed"
            );
        } else {
            tracing::debug!(error.code = ?self.code, error.message = %self.message, "request rejected");
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
