//! API response types, error codes, and the single error translation layer
//!
//! All responses share the `{code, msg, data}` envelope. Internal error
//! kinds map to HTTP status + numeric code exactly once, here; handlers
//! never format errors themselves.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::WalletError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }
}

/// Handler result: success envelope or translated error
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Success helper
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;
    pub const CONFLICT: i32 = 1004;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// ApiError
// ============================================================================

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::MISSING_AUTH, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "processing failed, try again",
        )
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()> {
            code: self.code,
            msg: self.msg,
            data: None,
        });
        (self.status, body).into_response()
    }
}

/// The one place internal error kinds become client-visible responses.
///
/// Business-rule failures keep their specific messages; storage and
/// invariant failures collapse to a generic message with full detail in
/// the log only.
impl From<WalletError> for ApiError {
    fn from(e: WalletError) -> Self {
        match &e {
            WalletError::Validation(msg) => ApiError::bad_request(msg.clone()),
            WalletError::NotFound(what) => ApiError::not_found(format!("{what} not found")),
            WalletError::InsufficientFunds => ApiError::new(
                StatusCode::BAD_REQUEST,
                error_codes::INSUFFICIENT_BALANCE,
                e.to_string(),
            ),
            WalletError::Conflict(msg) => {
                ApiError::new(StatusCode::CONFLICT, error_codes::CONFLICT, msg.clone())
            }
            WalletError::InvariantViolation(detail) => {
                // A bug in the engine itself. Never swallowed.
                tracing::error!(detail, "INVARIANT VIOLATION in transfer engine");
                ApiError::internal()
            }
            WalletError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                ApiError::internal()
            }
            WalletError::BankUnavailable(detail) => {
                tracing::error!(detail, "bank collaborator unavailable");
                ApiError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    error_codes::SERVICE_UNAVAILABLE,
                    "processing failed, try again",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_maps_to_specific_code() {
        let api: ApiError = WalletError::InsufficientFunds.into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, error_codes::INSUFFICIENT_BALANCE);
        assert_eq!(api.msg, "insufficient balance");
    }

    #[test]
    fn test_storage_errors_do_not_leak_detail() {
        let api: ApiError = WalletError::Storage(sqlx::Error::PoolTimedOut).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.msg, "processing failed, try again");
    }

    #[test]
    fn test_self_transfer_maps_to_conflict() {
        let api: ApiError = WalletError::conflict("cannot transfer to self").into();
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.msg, "cannot transfer to self");
    }

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(42u32);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["msg"], "ok");
        assert_eq!(json["data"], 42);
    }
}
