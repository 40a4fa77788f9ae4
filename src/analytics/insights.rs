//! Structured summaries handed to the narrative writer. Numbers and labels only.

use super::readiness::ReadinessStatus;
use super::report::AnalyticsReport;
use super::risk::{RiskStats, RiskTier};
use super::serialize_round2;
use super::topics::RankedTopic;
use crate::config::AnalyticsConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightDigest {
    pub total_students: usize,
    #[serde(serialize_with = "serialize_round2")]
    pub average_percentage: f64,
    pub readiness_status: ReadinessStatus,
    #[serde(serialize_with = "serialize_round2")]
    pub readiness_score: f64,
    pub risk_stats: RiskStats,
    pub weak_topics: Vec<RankedTopic>,
    pub strong_topics: Vec<RankedTopic>,
}

impl InsightDigest {
    /// `None` when the report carries no data.
    pub fn from_report(report: &AnalyticsReport, config: &AnalyticsConfig) -> Option<Self> {
        let a = report.analytics()?;
        let limit = config.insight_topic_limit;
        Some(Self {
            total_students: a.total_submissions,
            average_percentage: a.class_readiness.average_percentage,
            readiness_status: a.class_readiness.status,
            readiness_score: a.class_readiness.readiness_score,
            risk_stats: a.risk_classification.stats.clone(),
            weak_topics: a.weak_topics.iter().take(limit).cloned().collect(),
            strong_topics: a.strong_topics.iter().take(limit).cloned().collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAdviceInput {
    pub student_name: String,
    #[serde(serialize_with = "serialize_round2")]
    pub percentage: f64,
    pub risk_tier: RiskTier,
    pub weak_topics: Vec<String>,
}

impl StudentAdviceInput {
    pub fn new(student_name: impl Into<String>, percentage: f64, weak_topics: Vec<String>, config: &AnalyticsConfig) -> Self {
        Self {
            student_name: student_name.into(),
            percentage,
            risk_tier: RiskTier::for_percentage(percentage, config.high_risk_cut, config.medium_risk_cut),
            weak_topics,
        }
    }
}
