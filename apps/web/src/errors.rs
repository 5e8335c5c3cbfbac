use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::evaluation::parser::ParseError;
use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::views::ErrorPage;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders a visible error page; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Unexpected model response: {0}")]
    ResponseShape(#[from] ParseError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Invalid input", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("Rejected oversized upload: {msg}");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Upload too large",
                    "The submitted form exceeds the upload size limit.".to_string(),
                )
            }
            AppError::Extraction(e @ ExtractionError::UnsupportedFileType(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported file",
                format!("{e}. Please upload a PDF or DOCX resume."),
            ),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Unreadable resume",
                    e.to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Model unavailable",
                    "The evaluation model could not be reached. Please try again later."
                        .to_string(),
                )
            }
            AppError::ResponseShape(e) => {
                tracing::error!("Unparseable completion: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Unexpected model response",
                    format!("The model did not answer in the expected format: {e}."),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                    "The page could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = self.parts();

        let page = ErrorPage {
            status: status.as_u16(),
            title,
            message: &message,
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, format!("{title}: {message}")).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_file_type_is_415() {
        let err = AppError::from(ExtractionError::UnsupportedFileType("text/plain".into()));
        assert_eq!(err.into_response().status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_corrupt_document_is_422() {
        let err = AppError::from(ExtractionError::Pdf("bad xref".into()));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_model_faults_are_502() {
        assert_eq!(
            AppError::from(LlmError::MissingApiKey).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(ParseError::MissingField("Experience"))
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_shape_error_message_names_the_field() {
        let (_, _, message) = AppError::from(ParseError::MissingField("Experience")).parts();
        assert!(message.contains("Experience"));
    }

    #[test]
    fn test_validation_is_400() {
        let err = AppError::Validation("too long".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_oversized_upload_is_413() {
        let err = AppError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
