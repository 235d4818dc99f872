use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// The one error envelope every route shares.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Forbidden,
    NotFound { code: &'static str },
    Conflict { code: &'static str, message: String },
    BadRequest { code: &'static str, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }

    pub fn not_found(code: &'static str) -> Self {
        Self::NotFound { code }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error_code) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized access".to_string(),
                "unauthorized",
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "forbidden access".to_string(),
                "forbidden",
            ),
            ApiError::NotFound { code } => {
                (StatusCode::NOT_FOUND, code.replace('_', " "), code)
            }
            ApiError::Conflict { code, message } => (StatusCode::CONFLICT, message, code),
            ApiError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, message, code),
            ApiError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, "internal_error")
            }
        };
        let body = ErrorBody {
            error: true,
            message,
        };
        let mut resp = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(error_code) {
            resp.headers_mut().insert("X-Error-Code", value);
        }
        resp
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
