//! Storage-shaped records and their conversion into engine types.
//!
//! Records mirror the document layout used by the question bank and submission
//! store (`question` instead of `question_text`, `time_taken` in seconds).
//! Conversion is the only place malformed input is detected.

use crate::error::AnalyticsError;
use crate::models::{AnswerOption, Answers, Question, Submission};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MAX_QUESTION_LEN: usize = 500;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub option_a: String,
    #[serde(default)]
    pub option_b: String,
    #[serde(default)]
    pub option_c: String,
    #[serde(default)]
    pub option_d: String,
    #[serde(default)]
    pub correct_option: String,
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub test_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub answers: Answers,
    pub score: Option<i64>,
    pub percentage: Option<f64>,
    pub total_questions: Option<i64>,
    pub time_taken: Option<i64>,
}

fn required(entity: &'static str, id: &str, field: &str, value: String) -> Result<String, AnalyticsError> {
    if value.trim().is_empty() {
        return Err(AnalyticsError::malformed(entity, id, field, "must not be empty"));
    }
    Ok(value)
}

fn required_count(entity: &'static str, id: &str, field: &str, value: Option<i64>) -> Result<i64, AnalyticsError> {
    let value = value.ok_or_else(|| AnalyticsError::malformed(entity, id, field, "is required"))?;
    if value < 0 {
        return Err(AnalyticsError::malformed(entity, id, field, "must not be negative"));
    }
    Ok(value)
}

impl TryFrom<QuestionRecord> for Question {
    type Error = AnalyticsError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let id = required("question", "", "id", record.id)?;
        let correct_option = record
            .correct_option
            .parse::<AnswerOption>()
            .map_err(|issue| AnalyticsError::malformed("question", &id, "correct_option", issue))?;
        Ok(Question {
            question_text: required("question", &id, "question", record.question)?,
            option_a: required("question", &id, "option_a", record.option_a)?,
            option_b: required("question", &id, "option_b", record.option_b)?,
            option_c: required("question", &id, "option_c", record.option_c)?,
            option_d: required("question", &id, "option_d", record.option_d)?,
            topic: required("question", &id, "topic", record.topic)?,
            correct_option,
            id,
        })
    }
}

impl TryFrom<SubmissionRecord> for Submission {
    type Error = AnalyticsError;

    fn try_from(record: SubmissionRecord) -> Result<Self, Self::Error> {
        let id = required("submission", "", "id", record.id)?;
        let student_name = required("submission", &id, "student_name", record.student_name)?;
        let percentage = record
            .percentage
            .ok_or_else(|| AnalyticsError::malformed("submission", &id, "percentage", "is required"))?;
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(AnalyticsError::malformed(
                "submission",
                &id,
                "percentage",
                "must be within [0, 100]",
            ));
        }
        let score = required_count("submission", &id, "score", record.score)?;
        let total_questions = required_count("submission", &id, "total_questions", record.total_questions)?;
        let time_taken = required_count("submission", &id, "time_taken", record.time_taken)?;
        let as_u32 = |field: &str, v: i64| {
            u32::try_from(v).map_err(|_| AnalyticsError::malformed("submission", &id, field, "is out of range"))
        };
        Ok(Submission {
            score: as_u32("score", score)?,
            total_questions: as_u32("total_questions", total_questions)?,
            time_taken_seconds: time_taken as u64,
            test_id: record.test_id,
            answers: record.answers,
            student_name,
            percentage,
            id,
        })
    }
}

pub fn questions_from_records(records: Vec<QuestionRecord>) -> Result<Vec<Question>, AnalyticsError> {
    records.into_iter().map(Question::try_from).collect()
}

pub fn submissions_from_records(records: Vec<SubmissionRecord>) -> Result<Vec<Submission>, AnalyticsError> {
    records.into_iter().map(Submission::try_from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    pub field: String,
    pub issue: String,
}

/// Checks an uploaded question set before it is stored.
pub fn validate_questions(records: &[QuestionRecord]) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    if records.is_empty() {
        issues.push(ValidationIssue {
            field: "questions".into(),
            issue: "must contain at least one question".into(),
        });
    }

    let mut ids = HashSet::new();
    for (i, q) in records.iter().enumerate() {
        let text_fields = [
            ("id", &q.id),
            ("question", &q.question),
            ("option_a", &q.option_a),
            ("option_b", &q.option_b),
            ("option_c", &q.option_c),
            ("option_d", &q.option_d),
            ("topic", &q.topic),
        ];
        for (name, value) in text_fields {
            if value.trim().is_empty() {
                issues.push(ValidationIssue {
                    field: format!("questions[{i}].{name}"),
                    issue: "must not be empty".into(),
                });
            }
        }
        if !q.id.trim().is_empty() && !ids.insert(q.id.trim()) {
            issues.push(ValidationIssue {
                field: format!("questions[{i}].id"),
                issue: "must be unique".into(),
            });
        }
        if q.correct_option.parse::<AnswerOption>().is_err() {
            issues.push(ValidationIssue {
                field: format!("questions[{i}].correct_option"),
                issue: "must be A, B, C or D".into(),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

pub fn long_question_warnings(records: &[QuestionRecord]) -> Vec<ValidationIssue> {
    records
        .iter()
        .enumerate()
        .filter(|(_, q)| q.question.chars().count() > MAX_QUESTION_LEN)
        .map(|(i, _)| ValidationIssue {
            field: format!("questions[{i}].question"),
            issue: format!("is longer than {MAX_QUESTION_LEN} characters"),
        })
        .collect()
}
