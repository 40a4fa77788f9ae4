use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;

/// Failures raised by the analytics engine.
///
/// Empty cohorts and answers to unknown questions are not errors: the engine
/// returns "no data" results and skips orphan answers instead.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("malformed {entity} `{id}`: {field} {issue}")]
    MalformedInput {
        entity: &'static str,
        id: String,
        field: String,
        issue: String,
    },
    #[error("cohort has no submissions to compare against")]
    EmptyCohort,
    #[error("submission `{0}` is not part of the cohort")]
    UnknownSubmission(String),
    #[error("invalid analytics configuration: {0}")]
    InvalidConfig(String),
}

impl AnalyticsError {
    pub fn malformed(
        entity: &'static str,
        id: impl Into<String>,
        field: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        Self::MalformedInput {
            entity,
            id: id.into(),
            field: field.into(),
            issue: issue.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub field: String,
    pub issue: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: ErrorPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
    pub request_id: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Vec<ErrorDetail>,
    pub request_id: String,
}

impl AppError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: Vec::new(),
            request_id: request_id.into(),
        }
    }

    pub fn with_details(mut self, details: Vec<ErrorDetail>) -> Self {
        self.details = details;
        self
    }

    pub fn from_analytics(err: AnalyticsError, request_id: impl Into<String>) -> Self {
        match &err {
            AnalyticsError::MalformedInput { entity, id, field, issue } => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                format!("malformed {} `{}`", entity, id),
                request_id,
            )
            .with_details(vec![ErrorDetail {
                field: field.clone(),
                issue: issue.clone(),
            }]),
            AnalyticsError::EmptyCohort => {
                Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string(), request_id)
            }
            AnalyticsError::UnknownSubmission(_) => {
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string(), request_id)
            }
            AnalyticsError::InvalidConfig(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
                request_id,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let payload = ErrorBody {
            error: ErrorPayload {
                code: self.code,
                message: self.message,
                details: self.details,
                request_id: self.request_id,
            },
        };
        (self.status, Json(payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_maps_to_unprocessable_with_detail() {
        let err = AnalyticsError::malformed("question", "q1", "correct_option", "must be one of A, B, C, D");
        assert_eq!(
            err.to_string(),
            "malformed question `q1`: correct_option must be one of A, B, C, D"
        );
        let app = AppError::from_analytics(err, "req-1");
        assert_eq!(app.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(app.details.len(), 1);
        assert_eq!(app.details[0].field, "correct_option");
    }

    #[test]
    fn unknown_submission_is_not_found() {
        let app = AppError::from_analytics(AnalyticsError::UnknownSubmission("s9".into()), "req-2");
        assert_eq!(app.status, StatusCode::NOT_FOUND);
        assert_eq!(app.code, "NOT_FOUND");
    }
}
