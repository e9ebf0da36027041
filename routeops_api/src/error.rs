use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use routeops_optimizer::dispatch::dispatch_error::DispatchError;
use tracing::error;

pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
}

impl From<DispatchError> for ApiError {
    fn from(error: DispatchError) -> Self {
        if error.is_invalid_request() {
            ApiError::BadRequest(error.to_string())
        } else {
            error!("Dispatch failed: {error}");
            ApiError::InternalServerError(error.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        }
    }
}
