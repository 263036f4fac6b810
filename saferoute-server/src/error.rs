use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Routing(#[from] saferoute::Error),
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Batch of {size} requests exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Routing(saferoute::Error::Routing(saferoute_core::Error::NoRouteFound)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Routing(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Routing(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<saferoute_core::Error> for ApiError {
    fn from(err: saferoute_core::Error) -> Self {
        ApiError::Routing(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            ApiError::from(saferoute_core::Error::NoRouteFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(saferoute_core::Error::InvalidInput("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(saferoute_core::Error::GeoJson("oops".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BatchTooLarge { size: 5, limit: 2 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
