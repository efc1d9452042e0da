//! HTTP error boundary
//!
//! Clients only ever see one of two flat bodies. The underlying error is
//! logged here and dropped.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use duedash_core::calendar::{ErrorBody, ProxyError};
use duedash_domain::DueDashError;
use tracing::{error, warn};

use crate::utils::logging::error_label;

/// Error returned by route handlers
#[derive(Debug)]
pub struct ApiError(pub DueDashError);

impl ApiError {
    pub const fn unauthorized() -> Self {
        Self(DueDashError::Unauthorized)
    }

    /// Collapse to the client-facing shape.
    pub fn public(&self) -> ProxyError {
        match self.0 {
            DueDashError::Unauthorized | DueDashError::Auth(_) => ProxyError::Unauthorized,
            _ => ProxyError::Internal,
        }
    }
}

impl From<DueDashError> for ApiError {
    fn from(value: DueDashError) -> Self {
        Self(value)
    }
}

impl From<ProxyError> for ApiError {
    fn from(value: ProxyError) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let public = self.public();
        let status = match public {
            ProxyError::Unauthorized => {
                warn!(kind = error_label(&self.0), error = %self.0, "request rejected");
                StatusCode::UNAUTHORIZED
            }
            ProxyError::Internal => {
                error!(kind = error_label(&self.0), error = %self.0, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json::<ErrorBody>(public.body())).into_response()
    }
}
