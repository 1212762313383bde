//! Unified error handling.
//!
//! Provides a unified `AppError` type mapping the subsystem error taxonomy
//! to HTTP responses. Input-validation errors surface their message as a
//! user-facing notice; upstream failures never leak internals to clients.
//! Persistence and cache-write failures never reach this type at all; they
//! are logged and recovered where they happen.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::gateway::GatewayError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed add-to-cart input.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout attempted in an invalid state.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog data could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Asset gateway failure.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Catalog(_) | Self::Gateway(_)) {
            tracing::error!(error = %self, "request error");
        }

        let status = match &self {
            Self::Cart(_) | Self::Checkout(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(_) | Self::Gateway(GatewayError::Fetch(_)) => StatusCode::BAD_GATEWAY,
            Self::Gateway(GatewayError::Offline) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Validation errors carry a user-facing notice; upstream failures
        // are reported without internal detail.
        let message = match &self {
            Self::Catalog(_) => "External data error".to_string(),
            Self::Gateway(_) => "Asset unavailable".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("pack mythic".to_string());
        assert_eq!(err.to_string(), "not found: pack mythic");

        let err = AppError::Cart(CartError::InvalidItem);
        assert!(err.to_string().contains("invalid item"));
    }

    #[test]
    fn test_app_error_status_codes() {
        fn status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            status(AppError::Cart(CartError::InvalidItem)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AppError::Gateway(GatewayError::Offline)),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(AppError::Catalog(CatalogError::LoadFailure)),
            StatusCode::BAD_GATEWAY
        );
    }
}
