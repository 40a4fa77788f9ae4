use super::serialize_round2;
use crate::models::Submission;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// `[0, high_cut)` is High, `[high_cut, medium_cut)` is Medium, the rest Low.
    pub fn for_percentage(percentage: f64, high_cut: f64, medium_cut: f64) -> Self {
        if percentage < high_cut {
            RiskTier::High
        } else if percentage < medium_cut {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRisk {
    pub name: String,
    #[serde(serialize_with = "serialize_round2")]
    pub percentage: f64,
    pub score: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskStats {
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub total_students: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskClassification {
    pub high_risk: Vec<StudentRisk>,
    pub medium_risk: Vec<StudentRisk>,
    pub low_risk: Vec<StudentRisk>,
    pub stats: RiskStats,
}

/// Buckets every submission by percentage.
///
/// High and medium lists are ordered worst first so the students needing help
/// lead; the low list is ordered best first.
pub fn classify_student_risk(submissions: &[Submission], high_cut: f64, medium_cut: f64) -> RiskClassification {
    let mut out = RiskClassification::default();

    for s in submissions {
        let student = StudentRisk {
            name: s.student_name.clone(),
            percentage: s.percentage,
            score: s.score,
            total: s.total_questions,
        };
        match RiskTier::for_percentage(s.percentage, high_cut, medium_cut) {
            RiskTier::High => out.high_risk.push(student),
            RiskTier::Medium => out.medium_risk.push(student),
            RiskTier::Low => out.low_risk.push(student),
        }
    }

    out.high_risk.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
    out.medium_risk.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
    out.low_risk.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    out.stats = RiskStats {
        high_risk_count: out.high_risk.len(),
        medium_risk_count: out.medium_risk.len(),
        low_risk_count: out.low_risk.len(),
        total_students: submissions.len(),
    };
    out
}
