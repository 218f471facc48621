// crates/campus-care-server/src/web/error.rs
// Map library errors onto HTTP responses

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_care_types::ApiResponse;
use tracing::{debug, error};

use crate::error::CareError;

/// Handler error wrapper
#[derive(Debug)]
pub struct ApiError(pub CareError);

impl From<CareError> for ApiError {
    fn from(err: CareError) -> Self {
        Self(err)
    }
}

/// Malformed or mistyped request bodies are client errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(status = %rejection.status(), "Rejected request body");
        Self(CareError::InvalidInput(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            CareError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CareError::UnknownInstrument(_) => StatusCode::NOT_FOUND,
            CareError::SubmissionInFlight => StatusCode::CONFLICT,
            CareError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            // Internal details stay in the logs
            error!(error = %self.0, "Request failed");
            "internal error".to_string()
        };
        (status, Json(ApiResponse::err(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError(CareError::InvalidInput("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError(CareError::UnknownInstrument("x".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError(CareError::SubmissionInFlight).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError(CareError::Anyhow(anyhow::anyhow!("boom"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_errors_are_masked() {
        let response =
            ApiError(CareError::Anyhow(anyhow::anyhow!("secret upstream detail"))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "internal error");
    }
}
