//! Unified API error handling
//!
//! This module provides a consistent error response format across all API
//! endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::service::GenerationError;
use crate::service::image::ImageFetchError;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent
/// error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Token index outside the catalog (404)
    #[error("Token not found: {0}")]
    TokenNotFound(usize),

    /// No report generated for this token index yet (404)
    #[error("Report not found for token: {0}")]
    ReportNotFound(usize),

    /// The model declined to analyze (422); the message is the backend's
    /// refusal text, verbatim
    #[error("{0}")]
    AnalysisRefused(String),

    /// Report generation failed (502)
    #[error("Report generation failed: {0}")]
    Generation(String),

    /// Upstream image host failure (502)
    #[error("Image fetch failed: {0}")]
    ImageFetch(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::TokenNotFound(_) | ApiError::ReportNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AnalysisRefused(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generation(_) | ApiError::ImageFetch(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::TokenNotFound(_) => "token_not_found",
            ApiError::ReportNotFound(_) => "report_not_found",
            ApiError::AnalysisRefused(_) => "analysis_refused",
            ApiError::Generation(_) => "generation_error",
            ApiError::ImageFetch(_) => "image_fetch_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Refused(text) => ApiError::AnalysisRefused(text),
            GenerationError::Failed(message) => ApiError::Generation(message),
        }
    }
}

impl From<ImageFetchError> for ApiError {
    fn from(err: ImageFetchError) -> Self {
        ApiError::ImageFetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusals_map_to_a_distinct_error_with_the_text_verbatim() {
        let refusal = "I'm sorry, but I can't analyze this image.";
        let err = ApiError::from(GenerationError::Refused(refusal.to_string()));

        match &err {
            ApiError::AnalysisRefused(text) => assert_eq!(text, refusal),
            other => panic!("expected AnalysisRefused, got {:?}", other),
        }
        // Display is the refusal text itself, so the response message carries
        // the backend's words unmodified.
        assert_eq!(err.to_string(), refusal);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_failures_map_to_bad_gateway() {
        let err = ApiError::from(GenerationError::Failed("connection reset".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(matches!(err, ApiError::Generation(_)));
    }
}
