use super::{mean, serialize_round2, std_dev};
use crate::models::Submission;
use serde::Serialize;

pub const CONSISTENCY_STD_DEV: f64 = 15.0;
pub const CONSISTENCY_BONUS: f64 = 5.0;
pub const HIGH_PERFORMER_CUT: f64 = 70.0;
pub const HIGH_PERFORMER_SHARE: f64 = 50.0;
pub const HIGH_PERFORMER_BONUS: f64 = 3.0;
pub const AT_RISK_CUT: f64 = 40.0;
pub const AT_RISK_SHARE: f64 = 30.0;
pub const AT_RISK_PENALTY: f64 = 10.0;
pub const EXAM_READY_CUT: f64 = 75.0;
pub const BORDERLINE_CUT: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadinessStatus {
    #[serde(rename = "Exam Ready")]
    ExamReady,
    Borderline,
    #[serde(rename = "Not Ready")]
    NotReady,
    #[serde(rename = "No Data")]
    NoData,
}

impl ReadinessStatus {
    pub fn for_score(score: f64) -> Self {
        if score >= EXAM_READY_CUT {
            ReadinessStatus::ExamReady
        } else if score >= BORDERLINE_CUT {
            ReadinessStatus::Borderline
        } else {
            ReadinessStatus::NotReady
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            ReadinessStatus::ExamReady => "Class is well-prepared. Focus on revision and practice.",
            ReadinessStatus::Borderline => {
                "Class needs targeted intervention on weak topics. 1-2 weeks of focused revision recommended."
            }
            ReadinessStatus::NotReady => "Significant gaps identified. Conduct intensive revision sessions.",
            ReadinessStatus::NoData => "No submissions to analyze",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessResult {
    #[serde(serialize_with = "serialize_round2")]
    pub readiness_score: f64,
    pub status: ReadinessStatus,
    #[serde(serialize_with = "serialize_round2")]
    pub average_percentage: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub std_deviation: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub high_performers_pct: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub at_risk_pct: f64,
    pub recommendation: String,
}

impl ReadinessResult {
    fn no_data() -> Self {
        Self {
            readiness_score: 0.0,
            status: ReadinessStatus::NoData,
            average_percentage: 0.0,
            std_deviation: 0.0,
            high_performers_pct: 0.0,
            at_risk_pct: 0.0,
            recommendation: ReadinessStatus::NoData.recommendation().to_string(),
        }
    }
}

/// Composite 0-100 readiness score.
///
/// Starts from the class mean, then applies the consistency bonus, the
/// high-performer bonus and the at-risk penalty. Each rule looks at the raw
/// class metrics, never at the partially adjusted score.
pub fn calculate_class_readiness(submissions: &[Submission]) -> ReadinessResult {
    if submissions.is_empty() {
        return ReadinessResult::no_data();
    }

    let percentages: Vec<f64> = submissions.iter().map(|s| s.percentage).collect();
    let n = percentages.len() as f64;
    let average = mean(&percentages);
    let spread = std_dev(&percentages);
    let high_performers_pct = percentages.iter().filter(|p| **p >= HIGH_PERFORMER_CUT).count() as f64 * 100.0 / n;
    let at_risk_pct = percentages.iter().filter(|p| **p < AT_RISK_CUT).count() as f64 * 100.0 / n;

    let mut score = average;
    if spread < CONSISTENCY_STD_DEV {
        score += CONSISTENCY_BONUS;
    }
    if high_performers_pct > HIGH_PERFORMER_SHARE {
        score += HIGH_PERFORMER_BONUS;
    }
    if at_risk_pct > AT_RISK_SHARE {
        score -= AT_RISK_PENALTY;
    }
    let score = score.clamp(0.0, 100.0);
    let status = ReadinessStatus::for_score(score);

    ReadinessResult {
        readiness_score: score,
        status,
        average_percentage: average,
        std_deviation: spread,
        high_performers_pct,
        at_risk_pct,
        recommendation: status.recommendation().to_string(),
    }
}
