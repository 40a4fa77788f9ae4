use super::{mean, serialize_round2};
use crate::error::AnalyticsError;
use crate::models::Submission;
use serde::Serialize;

pub const TOP_PERFORMER_PERCENTILE: f64 = 75.0;
pub const ABOVE_AVERAGE_PERCENTILE: f64 = 50.0;
pub const BELOW_AVERAGE_PERCENTILE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceCategory {
    #[serde(rename = "Top Performer")]
    TopPerformer,
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Below Average")]
    BelowAverage,
    #[serde(rename = "Needs Support")]
    NeedsSupport,
}

impl PerformanceCategory {
    pub fn for_percentile(percentile: f64) -> Self {
        if percentile >= TOP_PERFORMER_PERCENTILE {
            PerformanceCategory::TopPerformer
        } else if percentile >= ABOVE_AVERAGE_PERCENTILE {
            PerformanceCategory::AboveAverage
        } else if percentile >= BELOW_AVERAGE_PERCENTILE {
            PerformanceCategory::BelowAverage
        } else {
            PerformanceCategory::NeedsSupport
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    #[serde(serialize_with = "serialize_round2")]
    pub student_percentage: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub class_average: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub difference: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub percentile: f64,
    pub rank: usize,
    pub total_students: usize,
    pub performance_category: PerformanceCategory,
}

/// Places one submission within its cohort.
///
/// `percentile` is the share of the cohort at or below the student, the
/// student included. `rank` is one plus the number of strictly higher
/// percentages, so tied students share a rank. The student must belong to the
/// cohort, matched by percentage.
pub fn compare_student_to_class(
    student: &Submission,
    all_submissions: &[Submission],
) -> Result<ComparisonResult, AnalyticsError> {
    if all_submissions.is_empty() {
        return Err(AnalyticsError::EmptyCohort);
    }
    let pct = student.percentage;
    let percentages: Vec<f64> = all_submissions.iter().map(|s| s.percentage).collect();
    if !percentages.contains(&pct) {
        return Err(AnalyticsError::UnknownSubmission(student.id.clone()));
    }
    let total = percentages.len();

    let class_average = mean(&percentages);
    let at_or_below = percentages.iter().filter(|p| **p <= pct).count();
    let percentile = at_or_below as f64 * 100.0 / total as f64;
    let rank = percentages.iter().filter(|p| **p > pct).count() + 1;

    Ok(ComparisonResult {
        student_percentage: pct,
        class_average,
        difference: pct - class_average,
        percentile,
        rank,
        total_students: total,
        performance_category: PerformanceCategory::for_percentile(percentile),
    })
}

/// Looks the student up by submission id before comparing.
pub fn compare_submission_by_id(
    submission_id: &str,
    all_submissions: &[Submission],
) -> Result<ComparisonResult, AnalyticsError> {
    let student = all_submissions
        .iter()
        .find(|s| s.id == submission_id)
        .ok_or_else(|| AnalyticsError::UnknownSubmission(submission_id.to_string()))?;
    compare_student_to_class(student, all_submissions)
}
