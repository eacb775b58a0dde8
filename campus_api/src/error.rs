use aide::OperationOutput;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_tours::{guide::ToolError, storage::StoreError, tour_service::TourError};
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
    NotFound(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        error!("Storage failure: {}", error);
        ApiError::InternalServerError(String::from("Storage failure"))
    }
}

impl From<TourError> for ApiError {
    fn from(error: TourError) -> Self {
        match error {
            TourError::EmptyStops | TourError::UnknownLocations(_) => {
                ApiError::BadRequest(error.to_string())
            }
            TourError::NotFound(_) => ApiError::NotFound(error.to_string()),
            TourError::Store(error) => error.into(),
        }
    }
}

impl From<ToolError> for ApiError {
    fn from(error: ToolError) -> Self {
        match error {
            ToolError::UnknownTool(_) | ToolError::InvalidArguments { .. } => {
                ApiError::BadRequest(error.to_string())
            }
            ToolError::Tour(error) => error.into(),
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
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
        }
    }
}

impl OperationOutput for ApiError {
    type Inner = ();
}
