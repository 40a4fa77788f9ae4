use super::topics::accuracy;
use super::{round2, serialize_round2};
use crate::models::{Answers, Question, Submission};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A finished exam attempt before it is scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub test_id: String,
    pub student_name: String,
    #[serde(default)]
    pub answers: Answers,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentTopicScore {
    pub topic: String,
    pub correct: u32,
    pub total: u32,
    #[serde(serialize_with = "serialize_round2")]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedSubmission {
    pub submission: Submission,
    pub topic_scores: Vec<StudentTopicScore>,
}

/// Scores every question of the test against one student's answers.
///
/// Unanswered questions count as wrong, answers to questions outside the test
/// are ignored. Topics keep the order they first appear in `questions`.
fn tally_answers(questions: &[Question], answers: &Answers) -> (u32, Vec<StudentTopicScore>) {
    let mut order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, (u32, u32)> = HashMap::new();
    let mut correct_total = 0u32;

    for q in questions {
        let entry = tallies.entry(q.topic.as_str()).or_insert_with(|| {
            order.push(&q.topic);
            (0, 0)
        });
        entry.1 += 1;
        if answers.get(&q.id).is_some_and(|selected| q.is_correct(selected)) {
            entry.0 += 1;
            correct_total += 1;
        }
    }

    let scores = order
        .into_iter()
        .map(|topic| {
            let (correct, total) = tallies[topic];
            StudentTopicScore {
                topic: topic.to_string(),
                correct,
                total,
                percentage: accuracy(correct, total),
            }
        })
        .collect();
    (correct_total, scores)
}

/// Per-topic score of a stored submission against the test's questions.
pub fn student_topic_breakdown(questions: &[Question], submission: &Submission) -> Vec<StudentTopicScore> {
    tally_answers(questions, &submission.answers).1
}

pub fn grade_submission(questions: &[Question], attempt: Attempt) -> GradedSubmission {
    let (score, topic_scores) = tally_answers(questions, &attempt.answers);
    let total_questions = questions.len() as u32;
    let percentage = if total_questions == 0 {
        0.0
    } else {
        round2(f64::from(score) * 100.0 / f64::from(total_questions))
    };
    let time_taken_seconds = (attempt.submitted_at - attempt.started_at).num_seconds().max(0) as u64;

    GradedSubmission {
        submission: Submission {
            id: attempt.id,
            test_id: attempt.test_id,
            student_name: attempt.student_name,
            answers: attempt.answers,
            score,
            percentage,
            total_questions,
            time_taken_seconds,
        },
        topic_scores,
    }
}

/// Topics where this student scored below `threshold`, in breakdown order.
pub fn student_weak_topics(topic_scores: &[StudentTopicScore], threshold: f64) -> Vec<String> {
    topic_scores
        .iter()
        .filter(|t| t.total > 0 && t.percentage < threshold)
        .map(|t| t.topic.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;
    use crate::test_support::question;
    use chrono::Duration;

    fn physics_test() -> Vec<Question> {
        vec![
            question("q1", "Units", AnswerOption::A),
            question("q2", "Mechanics", AnswerOption::C),
            question("q3", "Mechanics", AnswerOption::B),
            question("q4", "Waves", AnswerOption::D),
        ]
    }

    fn attempt(answers: &[(&str, &str)], seconds: i64) -> Attempt {
        let started_at = DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Attempt {
            id: "sub-1".into(),
            test_id: "phy-101".into(),
            student_name: "Ada".into(),
            answers: answers.iter().map(|(q, a)| (q.to_string(), a.to_string())).collect(),
            started_at,
            submitted_at: started_at + Duration::seconds(seconds),
        }
    }

    #[test]
    fn grades_score_percentage_and_time() {
        let graded = grade_submission(&physics_test(), attempt(&[("q1", "a"), ("q2", "C"), ("q3", "A")], 754));
        let s = &graded.submission;
        assert_eq!(s.score, 2);
        assert_eq!(s.total_questions, 4);
        assert_eq!(s.percentage, 50.0);
        assert_eq!(s.time_taken_seconds, 754);
    }

    #[test]
    fn percentage_is_stored_to_two_decimals() {
        let graded = grade_submission(&physics_test()[..3], attempt(&[("q1", "A")], 60));
        assert_eq!(graded.submission.percentage, 33.33);
    }

    #[test]
    fn breakdown_covers_unanswered_questions() {
        let graded = grade_submission(&physics_test(), attempt(&[("q2", "C")], 10));
        let topics: Vec<_> = graded.topic_scores.iter().map(|t| (t.topic.as_str(), t.correct, t.total)).collect();
        assert_eq!(topics, vec![("Units", 0, 1), ("Mechanics", 1, 2), ("Waves", 0, 1)]);
    }

    #[test]
    fn answers_outside_the_test_are_ignored() {
        let graded = grade_submission(&physics_test(), attempt(&[("q1", "A"), ("other", "A")], 10));
        assert_eq!(graded.submission.score, 1);
    }

    #[test]
    fn clock_skew_never_gives_negative_time() {
        let graded = grade_submission(&physics_test(), attempt(&[], -30));
        assert_eq!(graded.submission.time_taken_seconds, 0);
    }

    #[test]
    fn empty_test_scores_zero() {
        let graded = grade_submission(&[], attempt(&[("q1", "A")], 10));
        assert_eq!(graded.submission.percentage, 0.0);
        assert!(graded.topic_scores.is_empty());
    }

    #[test]
    fn weak_topics_below_threshold() {
        let graded = grade_submission(&physics_test(), attempt(&[("q1", "A"), ("q2", "C"), ("q4", "B")], 10));
        // Units 100, Mechanics 50, Waves 0
        assert_eq!(student_weak_topics(&graded.topic_scores, 60.0), vec!["Mechanics", "Waves"]);
    }

    #[test]
    fn breakdown_from_stored_submission_matches_grading() {
        let questions = physics_test();
        let graded = grade_submission(&questions, attempt(&[("q3", "b"), ("q4", "D")], 10));
        assert_eq!(student_topic_breakdown(&questions, &graded.submission), graded.topic_scores);
    }
}
