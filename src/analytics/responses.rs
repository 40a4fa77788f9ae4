use crate::models::{AnswerOption, Question, Submission};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// One answered question from one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<'a> {
    pub student_name: &'a str,
    pub question_id: &'a str,
    pub topic: &'a str,
    pub correct_option: AnswerOption,
    pub selected_option: &'a str,
    pub is_correct: bool,
}

/// Flattens submissions into per-answer rows joined with their question.
///
/// Answers that reference a question id not present in `questions` are skipped.
pub fn build_responses<'a>(questions: &'a [Question], submissions: &'a [Submission]) -> Vec<Response<'a>> {
    let lookup: HashMap<&str, &Question> = questions.iter().map(|q| (q.id.as_str(), q)).collect();
    let mut responses = Vec::new();
    let mut orphans = 0usize;

    for submission in submissions {
        for (question_id, selected) in &submission.answers {
            let Some(&question) = lookup.get(question_id.as_str()) else {
                orphans += 1;
                continue;
            };
            responses.push(Response {
                student_name: &submission.student_name,
                question_id: &question.id,
                topic: &question.topic,
                correct_option: question.correct_option,
                selected_option: selected,
                is_correct: question.is_correct(selected),
            });
        }
    }

    if orphans > 0 {
        debug!("skipped {} answers referencing unknown questions", orphans);
    }
    responses
}
