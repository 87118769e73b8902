//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::Error;

/// API error type: a status code plus the message serialized as
/// `{"detail": ...}`, the body shape consultation clients expect.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.message }));
        (self.status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        // Configuration, collaborator, and staging failures all surface
        // uniformly as 500 with the error message as the detail.
        ApiError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Service;

    #[tokio::test]
    async fn body_carries_message_under_detail() {
        let response = ApiError::bad_request("Missing `image` file field").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Missing `image` file field");
    }

    #[test]
    fn pipeline_errors_map_to_internal_server_error() {
        let cases = [
            Error::configuration("Groq API key is not configured"),
            Error::collaborator_status(Service::Transcription, 502, "bad gateway"),
            Error::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full")),
        ];
        for err in cases {
            let message = err.to_string();
            let api_err = ApiError::from(err);
            assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(api_err.message, message);
        }
    }
}
