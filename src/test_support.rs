use crate::models::{AnswerOption, Answers, Question, Submission};

pub fn question(id: &str, topic: &str, correct: AnswerOption) -> Question {
    Question {
        id: id.into(),
        question_text: format!("Question {id}"),
        option_a: "first".into(),
        option_b: "second".into(),
        option_c: "third".into(),
        option_d: "fourth".into(),
        correct_option: correct,
        topic: topic.into(),
    }
}

pub fn submission(id: &str, student: &str, percentage: f64, answers: &[(&str, &str)]) -> Submission {
    Submission {
        id: id.into(),
        test_id: "t1".into(),
        student_name: student.into(),
        answers: answers
            .iter()
            .map(|(q, a)| (q.to_string(), a.to_string()))
            .collect::<Answers>(),
        score: 0,
        percentage,
        total_questions: answers.len() as u32,
        time_taken_seconds: 600,
    }
}

/// Submissions with only a percentage set, for the percentage-driven components.
pub fn cohort(percentages: &[f64]) -> Vec<Submission> {
    percentages
        .iter()
        .enumerate()
        .map(|(i, p)| submission(&format!("s{}", i + 1), &format!("Student {}", i + 1), *p, &[]))
        .collect()
}
