use crate::analytics::comparison::compare_submission_by_id;
use crate::analytics::{
    calculate_test_statistics, generate_comprehensive_analytics, grade_submission, student_topic_breakdown,
    student_weak_topics, AnalyticsReport, Attempt, ComparisonResult, InsightDigest, StudentAdviceInput,
};
use crate::error::{AppError, ErrorDetail};
use crate::models::{Answers, Question, Submission};
use crate::records::{
    long_question_warnings, questions_from_records, submissions_from_records, validate_questions, QuestionRecord,
    SubmissionRecord,
};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

fn request_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn validation_failed(message: impl Into<String>, req_id: String, details: Vec<ErrorDetail>) -> AppError {
    AppError::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message, req_id).with_details(details)
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsPayload {
    pub questions: Vec<QuestionRecord>,
    pub submissions: Vec<SubmissionRecord>,
}

/// Checks the raw body against the request contract, then converts the records
/// into engine types.
fn decode_analytics_payload(
    state: &AppState,
    raw: serde_json::Value,
    req_id: &str,
) -> Result<(Vec<Question>, Vec<Submission>), AppError> {
    let compiled = jsonschema::draft202012::new(&state.request_schema).map_err(|_| {
        AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "schema build failed", req_id)
    })?;
    if compiled.validate(&raw).is_err() {
        let details = compiled
            .iter_errors(&raw)
            .map(|e| ErrorDetail {
                field: e.instance_path.to_string(),
                issue: e.to_string(),
            })
            .collect();
        warn!("analytics payload rejected by schema, request {}", req_id);
        return Err(validation_failed("payload does not match schema", req_id.to_string(), details));
    }

    let payload: AnalyticsPayload = serde_json::from_value(raw)
        .map_err(|e| validation_failed(format!("cannot decode payload: {}", e), req_id.to_string(), Vec::new()))?;
    let questions =
        questions_from_records(payload.questions).map_err(|e| AppError::from_analytics(e, req_id))?;
    let submissions =
        submissions_from_records(payload.submissions).map_err(|e| AppError::from_analytics(e, req_id))?;
    Ok((questions, submissions))
}

pub async fn analytics_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(raw): Json<serde_json::Value>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let req_id = request_id_from_headers(&headers);
    let (questions, submissions) = decode_analytics_payload(&state, raw, &req_id)?;
    let report = generate_comprehensive_analytics(&questions, &submissions, &state.config);
    info!("analytics report built for request {} (has_data={})", req_id, report.has_data());
    Ok(Json(report))
}

pub async fn insight_digest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(raw): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req_id = request_id_from_headers(&headers);
    let (questions, submissions) = decode_analytics_payload(&state, raw, &req_id)?;
    let report = generate_comprehensive_analytics(&questions, &submissions, &state.config);
    let digest = InsightDigest::from_report(&report, &state.config);
    Ok(Json(json!({ "digest": digest })))
}

#[derive(Debug, Deserialize)]
pub struct SubmissionsPayload {
    pub submissions: Vec<SubmissionRecord>,
}

pub async fn test_statistics(
    headers: HeaderMap,
    Json(payload): Json<SubmissionsPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req_id = request_id_from_headers(&headers);
    let submissions =
        submissions_from_records(payload.submissions).map_err(|e| AppError::from_analytics(e, req_id.as_str()))?;
    let body = match calculate_test_statistics(&submissions) {
        Some(stats) => serde_json::to_value(stats).map_err(|_| {
            AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "cannot encode statistics", req_id)
        })?,
        None => json!({}),
    };
    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
pub struct ComparePayload {
    pub submission_id: String,
    pub submissions: Vec<SubmissionRecord>,
}

pub async fn compare_student(
    headers: HeaderMap,
    Json(payload): Json<ComparePayload>,
) -> Result<Json<ComparisonResult>, AppError> {
    let req_id = request_id_from_headers(&headers);
    let submissions =
        submissions_from_records(payload.submissions).map_err(|e| AppError::from_analytics(e, req_id.as_str()))?;
    let result = compare_submission_by_id(&payload.submission_id, &submissions)
        .map_err(|e| AppError::from_analytics(e, req_id))?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct StudentTopicsPayload {
    pub questions: Vec<QuestionRecord>,
    pub submission: SubmissionRecord,
}

/// Per-topic breakdown of a stored submission.
pub async fn student_topics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<StudentTopicsPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req_id = request_id_from_headers(&headers);
    let questions =
        questions_from_records(payload.questions).map_err(|e| AppError::from_analytics(e, req_id.as_str()))?;
    let submission =
        Submission::try_from(payload.submission).map_err(|e| AppError::from_analytics(e, req_id.as_str()))?;

    let topic_scores = student_topic_breakdown(&questions, &submission);
    let weak_topics = student_weak_topics(&topic_scores, state.config.student_weak_topic_threshold);
    Ok(Json(json!({
        "submission_id": submission.id,
        "student_name": submission.student_name,
        "topic_scores": topic_scores,
        "weak_topics": weak_topics,
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AttemptPayload {
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub test_id: String,
    #[validate(length(min = 1))]
    pub student_name: String,
    #[serde(default)]
    pub answers: Answers,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GradePayload {
    #[validate(length(min = 1))]
    pub questions: Vec<QuestionRecord>,
    #[validate(nested)]
    pub attempt: AttemptPayload,
}

pub async fn grade_attempt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<GradePayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let req_id = request_id_from_headers(&headers);
    if let Err(errors) = payload.validate() {
        let details = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| ErrorDetail {
                field: field.to_string(),
                issue: errs.iter().map(|e| e.code.to_string()).collect::<Vec<_>>().join(", "),
            })
            .collect();
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("invalid grading request: {}", errors),
            req_id,
        )
        .with_details(details));
    }
    let questions =
        questions_from_records(payload.questions).map_err(|e| AppError::from_analytics(e, req_id.as_str()))?;

    let a = payload.attempt;
    let attempt = Attempt {
        id: a.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        test_id: a.test_id,
        student_name: a.student_name,
        answers: a.answers,
        started_at: a.started_at,
        submitted_at: a.submitted_at,
    };
    let graded = grade_submission(&questions, attempt);
    let weak_topics = student_weak_topics(&graded.topic_scores, state.config.student_weak_topic_threshold);
    let advice_input = StudentAdviceInput::new(
        graded.submission.student_name.clone(),
        graded.submission.percentage,
        weak_topics.clone(),
        &state.config,
    );
    info!(
        "graded submission {} for test {}: {}/{}",
        graded.submission.id, graded.submission.test_id, graded.submission.score, graded.submission.total_questions
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "submission": graded.submission,
            "topic_scores": graded.topic_scores,
            "weak_topics": weak_topics,
            "advice_input": advice_input,
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct QuestionsPayload {
    pub questions: Vec<QuestionRecord>,
}

pub async fn check_questions(Json(payload): Json<QuestionsPayload>) -> Json<serde_json::Value> {
    let warnings = long_question_warnings(&payload.questions);
    let issues = validate_questions(&payload.questions).err().unwrap_or_default();
    Json(json!({
        "valid": issues.is_empty(),
        "issues": issues,
        "warnings": warnings,
        "total": payload.questions.len(),
    }))
}
