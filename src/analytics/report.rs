use super::readiness::{calculate_class_readiness, ReadinessResult};
use super::risk::{classify_student_risk, RiskClassification};
use super::statistics::{calculate_test_statistics, TestStatistics};
use super::topics::{compute_topic_performance, identify_strong_topics, identify_weak_topics, RankedTopic, TopicPerformance};
use crate::config::AnalyticsConfig;
use crate::models::{Question, Submission};
use serde::Serialize;
use tracing::info;

pub const NO_SUBMISSIONS: &str = "No submissions available";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassAnalytics {
    pub has_data: bool,
    pub total_submissions: usize,
    pub total_questions: usize,
    pub topic_performance: TopicPerformance,
    pub weak_topics: Vec<RankedTopic>,
    pub strong_topics: Vec<RankedTopic>,
    pub risk_classification: RiskClassification,
    pub class_readiness: ReadinessResult,
    pub statistics: Option<TestStatistics>,
}

/// Output of [`generate_comprehensive_analytics`].
///
/// Consumers must check [`AnalyticsReport::has_data`] before reading anything
/// else; the no-data variant carries only the flag and an error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyticsReport {
    NoData { has_data: bool, error: String },
    Ready(Box<ClassAnalytics>),
}

impl AnalyticsReport {
    fn no_data() -> Self {
        AnalyticsReport::NoData {
            has_data: false,
            error: NO_SUBMISSIONS.to_string(),
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self, AnalyticsReport::Ready(_))
    }

    pub fn analytics(&self) -> Option<&ClassAnalytics> {
        match self {
            AnalyticsReport::Ready(a) => Some(&**a),
            AnalyticsReport::NoData { .. } => None,
        }
    }
}

pub fn generate_comprehensive_analytics(
    questions: &[Question],
    submissions: &[Submission],
    config: &AnalyticsConfig,
) -> AnalyticsReport {
    if submissions.is_empty() {
        return AnalyticsReport::no_data();
    }

    let topic_performance = compute_topic_performance(questions, submissions).with_bands(config);
    let weak_topics = identify_weak_topics(&topic_performance, config.weak_topic_threshold);
    let strong_topics = identify_strong_topics(&topic_performance, config.strong_topic_threshold);
    let risk_classification = classify_student_risk(submissions, config.high_risk_cut, config.medium_risk_cut);
    let class_readiness = calculate_class_readiness(submissions);
    let statistics = calculate_test_statistics(submissions);

    info!(
        submissions = submissions.len(),
        questions = questions.len(),
        topics = topic_performance.len(),
        weak_topics = weak_topics.len(),
        readiness = class_readiness.readiness_score,
        "class analytics computed"
    );

    AnalyticsReport::Ready(Box::new(ClassAnalytics {
        has_data: true,
        total_submissions: submissions.len(),
        total_questions: questions.len(),
        topic_performance,
        weak_topics,
        strong_topics,
        risk_classification,
        class_readiness,
        statistics,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::readiness::ReadinessStatus;
    use crate::models::AnswerOption;
    use crate::test_support::{question, submission};

    fn class() -> (Vec<Question>, Vec<Submission>) {
        let questions = vec![
            question("q1", "Algebra", AnswerOption::A),
            question("q2", "Algebra", AnswerOption::B),
            question("q3", "Optics", AnswerOption::C),
            question("q4", "Optics", AnswerOption::D),
        ];
        let submissions = vec![
            submission("s1", "Ada", 30.0, &[("q1", "B"), ("q2", "A"), ("q3", "C"), ("q4", "A")]),
            submission("s2", "Bola", 50.0, &[("q1", "A"), ("q2", "C"), ("q3", "C"), ("q4", "D")]),
            submission("s3", "Chi", 70.0, &[("q1", "C"), ("q2", "B"), ("q3", "C"), ("q4", "D")]),
            submission("s4", "Dayo", 90.0, &[("q1", "A"), ("q2", "D"), ("q3", "c"), ("q4", "d"), ("old", "A")]),
        ];
        (questions, submissions)
    }

    #[test]
    fn no_submissions_reports_no_data() {
        let (questions, _) = class();
        let report = generate_comprehensive_analytics(&questions, &[], &AnalyticsConfig::default());
        assert!(!report.has_data());
        assert!(report.analytics().is_none());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, serde_json::json!({"has_data": false, "error": "No submissions available"}));
    }

    #[test]
    fn full_report_composes_components() {
        let (questions, submissions) = class();
        let report = generate_comprehensive_analytics(&questions, &submissions, &AnalyticsConfig::default());
        let a = report.analytics().unwrap();
        assert!(a.has_data);
        assert_eq!(a.total_submissions, 4);
        assert_eq!(a.total_questions, 4);

        let algebra = a.topic_performance.get("Algebra").unwrap();
        assert_eq!((algebra.correct, algebra.total_attempts), (3, 8));
        let optics = a.topic_performance.get("Optics").unwrap();
        assert_eq!((optics.correct, optics.total_attempts), (7, 8));

        assert_eq!(a.weak_topics.len(), 1);
        assert_eq!(a.weak_topics[0].topic, "Algebra");
        assert_eq!(a.strong_topics.len(), 1);
        assert_eq!(a.strong_topics[0].topic, "Optics");

        let stats = &a.risk_classification.stats;
        assert_eq!((stats.high_risk_count, stats.medium_risk_count, stats.low_risk_count), (1, 1, 2));
        assert_eq!(a.statistics.as_ref().unwrap().mean, 60.0);
        assert_eq!(a.class_readiness.status, ReadinessStatus::Borderline);
    }

    #[test]
    fn report_is_idempotent() {
        let (questions, submissions) = class();
        let cfg = AnalyticsConfig::default();
        let first = generate_comprehensive_analytics(&questions, &submissions, &cfg);
        let second = generate_comprehensive_analytics(&questions, &submissions, &cfg);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn thresholds_come_from_config() {
        let (questions, submissions) = class();
        let cfg = AnalyticsConfig {
            weak_topic_threshold: 30.0,
            strong_topic_threshold: 90.0,
            ..AnalyticsConfig::default()
        };
        let report = generate_comprehensive_analytics(&questions, &submissions, &cfg);
        let a = report.analytics().unwrap();
        assert!(a.weak_topics.is_empty());
        assert!(a.strong_topics.is_empty());
    }

    #[test]
    fn serialized_report_has_stable_keys() {
        let (questions, submissions) = class();
        let report = generate_comprehensive_analytics(&questions, &submissions, &AnalyticsConfig::default());
        let value = serde_json::to_value(&report).unwrap();
        for key in [
            "has_data",
            "total_submissions",
            "total_questions",
            "topic_performance",
            "weak_topics",
            "strong_topics",
            "risk_classification",
            "class_readiness",
            "statistics",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["class_readiness"]["status"], "Borderline");
        assert_eq!(value["weak_topics"][0]["accuracy"], 37.5);
        assert_eq!(value["topic_performance"]["Algebra"]["band"], "Weak");
        assert_eq!(value["topic_performance"]["Optics"]["band"], "Strong");
    }
}
