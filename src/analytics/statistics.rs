use super::{mean, serialize_round2, std_dev};
use crate::models::Submission;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quartiles {
    #[serde(rename = "Q1", serialize_with = "serialize_round2")]
    pub q1: f64,
    #[serde(rename = "Q2", serialize_with = "serialize_round2")]
    pub q2: f64,
    #[serde(rename = "Q3", serialize_with = "serialize_round2")]
    pub q3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestStatistics {
    #[serde(serialize_with = "serialize_round2")]
    pub mean: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub median: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub std_deviation: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub min_score: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub max_score: f64,
    pub quartiles: Quartiles,
}

/// Linear-interpolation percentile over an ascending slice. `q` is in [0, 100].
fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (n - 1) as f64 * q / 100.0;
            let lo = rank.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Descriptive statistics over submission percentages.
///
/// Returns `None` for an empty cohort rather than a row of zeros.
pub fn calculate_test_statistics(submissions: &[Submission]) -> Option<TestStatistics> {
    if submissions.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = submissions.iter().map(|s| s.percentage).collect();
    sorted.sort_by(f64::total_cmp);

    let median = percentile(&sorted, 50.0);
    Some(TestStatistics {
        mean: mean(&sorted),
        median,
        std_deviation: std_dev(&sorted),
        min_score: sorted[0],
        max_score: sorted[sorted.len() - 1],
        quartiles: Quartiles {
            q1: percentile(&sorted, 25.0),
            q2: median,
            q3: percentile(&sorted, 75.0),
        },
    })
}
