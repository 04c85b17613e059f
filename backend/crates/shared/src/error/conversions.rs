//! Error conversions
//!
//! HTTP rendering of [`AppError`] (feature `axum`).

use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// Renders as `{"error": "<message>"}` with the kind's status code.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "error": self.public_message() });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_body_shape() {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let response = AppError::unauthorized("Invalid credentials").into_response();
        assert_eq!(response.status().as_u16(), 401);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid credentials" }));
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_hides_internal_detail() {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let response = AppError::internal("relation \"users\" does not exist").into_response();
        assert_eq!(response.status().as_u16(), 500);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal Server Error");
    }
}
