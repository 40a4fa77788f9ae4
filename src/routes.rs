use crate::handlers;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([HeaderValue::from_static("http://localhost:8501")])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/v1/analytics/report", post(handlers::analytics_report))
        .route("/api/v1/analytics/insights", post(handlers::insight_digest))
        .route("/api/v1/analytics/statistics", post(handlers::test_statistics))
        .route("/api/v1/analytics/compare", post(handlers::compare_student))
        .route("/api/v1/analytics/student-topics", post(handlers::student_topics))
        .route("/api/v1/submissions/grade", post(handlers::grade_attempt))
        .route("/api/v1/questions/validate", post(handlers::check_questions))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
