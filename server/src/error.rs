//! JSON error bodies and the rejection handler.

use std::convert::Infallible;

use log::error;
use pathlab_maze::MazeError;
use pathlab_paths::SearchError;
use serde::Serialize;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

use crate::service::ServiceError;

/// Machine-readable error class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    MethodNotAllowed,
    PayloadTooLarge,
    InternalError,
    OutOfBounds,
    Blocked,
    InvalidDimensions,
    UnknownAlgorithm,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError
            | ErrorCode::OutOfBounds
            | ErrorCode::Blocked
            | ErrorCode::InvalidDimensions
            | ErrorCode::UnknownAlgorithm => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The `{code, message, details?}` error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warp::reply::with_status(warp::reply::json(&self), status).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let code = match &err {
            ServiceError::Search(SearchError::OutOfBounds(_)) => ErrorCode::OutOfBounds,
            ServiceError::Search(SearchError::Blocked(_)) => ErrorCode::Blocked,
            ServiceError::Search(SearchError::UnknownAlgorithm(_)) => ErrorCode::UnknownAlgorithm,
            ServiceError::Maze(MazeError::InvalidDimensions { .. })
            | ServiceError::DimensionsTooLarge { .. } => ErrorCode::InvalidDimensions,
            ServiceError::Grid(_) | ServiceError::Validation(_) => ErrorCode::ValidationError,
            ServiceError::Cancelled | ServiceError::Internal(_) => ErrorCode::InternalError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Turn any rejection into a JSON [`ApiError`] response.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let api = if err.is_not_found() {
        ApiError::new(ErrorCode::NotFound, "not found")
    } else if let Some(api) = err.find::<ApiError>() {
        api.clone()
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        ApiError::validation("invalid request body").with_details(e.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ApiError::new(ErrorCode::PayloadTooLarge, "request body too large")
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        ApiError::validation("content-length header is required")
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        ApiError::validation("request body must be application/json")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::new(ErrorCode::MethodNotAllowed, "method not allowed")
    } else {
        error!("unhandled rejection: {:?}", err);
        ApiError::internal("internal server error")
    };
    Ok(api.into_response())
}
