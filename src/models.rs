use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
            AnswerOption::C => "C",
            AnswerOption::D => "D",
        }
    }

    /// Trimmed, case-insensitive comparison against a raw selected option.
    pub fn matches(&self, selected: &str) -> bool {
        selected.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(AnswerOption::A),
            "B" => Ok(AnswerOption::B),
            "C" => Ok(AnswerOption::C),
            "D" => Ok(AnswerOption::D),
            _ => Err(format!("`{}` is not one of A, B, C, D", s)),
        }
    }
}

impl TryFrom<String> for AnswerOption {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AnswerOption> for String {
    fn from(value: AnswerOption) -> Self {
        value.as_str().to_string()
    }
}

/// Question id to the raw selected option, in the order the student answered.
pub type Answers = IndexMap<String, String>;

/// A multiple-choice question as seen by the analytics engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: AnswerOption,
    pub topic: String,
}

impl Question {
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_option.matches(selected)
    }
}

/// One student's completed attempt at a test.
///
/// `answers` maps question ids to the raw option the student picked. The
/// selected value is kept as submitted; matching is done case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: String,
    pub test_id: String,
    pub student_name: String,
    pub answers: Answers,
    pub score: u32,
    pub percentage: f64,
    pub total_questions: u32,
    pub time_taken_seconds: u64,
}
