use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::geocoding::GeocodeError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid pickup coordinates")]
    InvalidPickup,

    #[error("Dropoff must be a valid address")]
    InvalidDropoff,

    #[error("Dropoff address not found")]
    AddressNotFound,

    #[error("geocoding failed: {0}")]
    Upstream(GeocodeError),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again.";

impl From<GeocodeError> for AppError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound => AppError::AddressNotFound,
            other => AppError::Upstream(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPickup | AppError::InvalidDropoff => StatusCode::BAD_REQUEST,
            AppError::AddressNotFound => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Upstream detail stays in the logs
        let message = match &self {
            AppError::Upstream(e) => {
                tracing::error!(error = %e, "Error calculating fare");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => {
                tracing::warn!(error = %other, "Rejected fare request");
                other.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
