//! Route-level error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Server-side failures are
//! captured to Sentry before the response is written; validation errors
//! go straight back to the client with their message intact.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use greenridge_core::order::ValidationError;
use greenridge_core::types::CategoryKeyError;

use crate::db::RepositoryError;
use crate::services::checkout::PlaceOrderError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Order submission failed validation.
    #[error("Order rejected: {0}")]
    Rejected(#[from] ValidationError),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request itself is malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Anything else that should read as a 500.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PlaceOrderError> for AppError {
    fn from(err: PlaceOrderError) -> Self {
        match err {
            PlaceOrderError::Rejected(validation) => Self::Rejected(validation),
            PlaceOrderError::Persistence(reason) => Self::Internal(reason),
        }
    }
}

impl From<CategoryKeyError> for AppError {
    fn from(err: CategoryKeyError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Only server-side failures are worth a Sentry event
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Internal details stay out of the response body; validation
        // messages are written for customers and pass through verbatim
        let (status, message) = match &self {
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Self::Rejected(validation) => {
                (StatusCode::UNPROCESSABLE_ENTITY, validation.to_string())
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a request milestone as a Sentry breadcrumb.
///
/// Breadcrumbs show up in the event detail as the trail of steps that
/// led to the error.
///
/// ```rust,ignore
/// add_breadcrumb("checkout", "Order persisted", Some(&[("order_id", "ab3...")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        breadcrumb.data.extend(pairs.iter().map(|(key, value)| {
            (
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            )
        }));
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("garden/12".to_string());
        assert_eq!(err.to_string(), "Not found: garden/12");

        let err = AppError::BadRequest("invalid category key".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid category key");
    }

    #[test]
    fn test_app_error_status_codes() {
        let cases = [
            (AppError::NotFound("test".to_string()), StatusCode::NOT_FOUND),
            (
                AppError::BadRequest("test".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Rejected(ValidationError::EmptyOrder),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Internal("test".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_rejection_message_reaches_the_client() {
        let response = AppError::Rejected(ValidationError::MissingName).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_place_order_error_mapping() {
        let rejected: AppError = PlaceOrderError::Rejected(ValidationError::EmptyOrder).into();
        assert!(matches!(rejected, AppError::Rejected(_)));

        let persistence: AppError = PlaceOrderError::Persistence("db down".to_string()).into();
        assert!(matches!(persistence, AppError::Internal(_)));
    }

    #[test]
    fn test_category_key_error_maps_to_bad_request() {
        let err: AppError = CategoryKeyError::Empty.into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
