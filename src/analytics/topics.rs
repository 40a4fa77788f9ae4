use super::responses::build_responses;
use super::{round2, serialize_round2};
use crate::config::AnalyticsConfig;
use crate::models::{Question, Submission};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicStat {
    pub topic: String,
    #[serde(serialize_with = "serialize_round2")]
    pub accuracy: f64,
    pub correct: u32,
    pub total_attempts: u32,
    pub total_questions: u32,
    pub students_attempted: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<TopicBand>,
}

pub(crate) fn accuracy(correct: u32, attempts: u32) -> f64 {
    if attempts == 0 {
        0.0
    } else {
        f64::from(correct) * 100.0 / f64::from(attempts)
    }
}

/// Per-topic statistics in the order topics are first answered.
///
/// Serializes as a JSON object keyed by topic name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicPerformance(Vec<TopicStat>);

impl TopicPerformance {
    pub fn get(&self, topic: &str) -> Option<&TopicStat> {
        self.0.iter().find(|s| s.topic == topic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicStat> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attaches the display band of every topic.
    pub fn with_bands(mut self, config: &AnalyticsConfig) -> Self {
        for stat in &mut self.0 {
            stat.band = Some(TopicBand::for_accuracy(round2(stat.accuracy), config));
        }
        self
    }
}

impl Serialize for TopicPerformance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for stat in &self.0 {
            map.serialize_entry(&stat.topic, stat)?;
        }
        map.end()
    }
}

#[derive(Default)]
struct Tally<'a> {
    correct: u32,
    attempts: u32,
    students: HashSet<&'a str>,
}

/// Accuracy per topic over every answered question.
///
/// Only topics that received at least one answer are reported. `total_questions`
/// counts the topic's questions whether or not anyone answered them.
pub fn compute_topic_performance(questions: &[Question], submissions: &[Submission]) -> TopicPerformance {
    let responses = build_responses(questions, submissions);
    if responses.is_empty() {
        return TopicPerformance::default();
    }

    let mut question_counts: HashMap<&str, u32> = HashMap::new();
    for q in questions {
        *question_counts.entry(q.topic.as_str()).or_insert(0) += 1;
    }

    // Submission order, then answer order within a submission.
    let mut order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for r in &responses {
        let tally = tallies.entry(r.topic).or_insert_with(|| {
            order.push(r.topic);
            Tally::default()
        });
        tally.attempts += 1;
        if r.is_correct {
            tally.correct += 1;
        }
        tally.students.insert(r.student_name);
    }

    let stats = order
        .into_iter()
        .map(|topic| {
            let tally = &tallies[topic];
            TopicStat {
                topic: topic.to_string(),
                accuracy: accuracy(tally.correct, tally.attempts),
                correct: tally.correct,
                total_attempts: tally.attempts,
                total_questions: question_counts.get(topic).copied().unwrap_or(0),
                students_attempted: tally.students.len() as u32,
                band: None,
            }
        })
        .collect();
    TopicPerformance(stats)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTopic {
    pub topic: String,
    #[serde(serialize_with = "serialize_round2")]
    pub accuracy: f64,
}

impl From<&TopicStat> for RankedTopic {
    fn from(stat: &TopicStat) -> Self {
        Self {
            topic: stat.topic.clone(),
            accuracy: stat.accuracy,
        }
    }
}

/// Topics below `threshold`, worst first. Ties keep topic order.
///
/// The cutoff applies to the accuracy as reported, rounded to two decimals.
pub fn identify_weak_topics(performance: &TopicPerformance, threshold: f64) -> Vec<RankedTopic> {
    let mut weak: Vec<RankedTopic> = performance
        .iter()
        .filter(|s| round2(s.accuracy) < threshold)
        .map(RankedTopic::from)
        .collect();
    weak.sort_by(|a, b| a.accuracy.total_cmp(&b.accuracy));
    weak
}

/// Topics at or above `threshold`, best first. Ties keep topic order.
pub fn identify_strong_topics(performance: &TopicPerformance, threshold: f64) -> Vec<RankedTopic> {
    let mut strong: Vec<RankedTopic> = performance
        .iter()
        .filter(|s| round2(s.accuracy) >= threshold)
        .map(RankedTopic::from)
        .collect();
    strong.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
    strong
}

/// Display band for dashboards and reports. Independent of the weak/strong lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TopicBand {
    Strong,
    Moderate,
    Weak,
}

impl TopicBand {
    pub fn for_accuracy(accuracy: f64, config: &AnalyticsConfig) -> Self {
        if accuracy >= config.band_strong_threshold {
            TopicBand::Strong
        } else if accuracy >= config.band_moderate_threshold {
            TopicBand::Moderate
        } else {
            TopicBand::Weak
        }
    }
}
