//! The analytics engine: pure functions from questions and submissions to
//! class and student diagnostics. Nothing in here performs I/O.

pub mod comparison;
pub mod grading;
pub mod insights;
pub mod readiness;
pub mod report;
pub mod responses;
pub mod risk;
pub mod statistics;
pub mod topics;

pub use comparison::{compare_student_to_class, ComparisonResult, PerformanceCategory};
pub use grading::{grade_submission, student_topic_breakdown, student_weak_topics, Attempt, GradedSubmission, StudentTopicScore};
pub use insights::{InsightDigest, StudentAdviceInput};
pub use readiness::{calculate_class_readiness, ReadinessResult, ReadinessStatus};
pub use report::{generate_comprehensive_analytics, AnalyticsReport, ClassAnalytics};
pub use responses::{build_responses, Response};
pub use risk::{classify_student_risk, RiskClassification, RiskStats, RiskTier, StudentRisk};
pub use statistics::{calculate_test_statistics, Quartiles, TestStatistics};
pub use topics::{compute_topic_performance, identify_strong_topics, identify_weak_topics, RankedTopic, TopicBand, TopicPerformance, TopicStat};

use serde::Serializer;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn serialize_round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
