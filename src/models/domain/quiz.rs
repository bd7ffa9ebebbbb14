use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::domain::question::Question;

/// A validated quiz. Created fresh per generation attempt and never mutated
/// after the parser has accepted it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub topics: Vec<String>,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(topics: Vec<String>, questions: Vec<Question>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            topics,
            questions,
            created_at: Some(Utc::now()),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

impl fmt::Display for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, question) in self.questions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{}. {}", i + 1, question)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::short_answer_question as sample_question;

    #[test]
    fn new_quiz_gets_id_and_timestamp() {
        let quiz = Quiz::new(
            vec!["Supervised learning".to_string()],
            vec![sample_question("What is supervised learning?")],
        );

        assert!(!quiz.id.is_empty());
        assert!(quiz.created_at.is_some());
        assert_eq!(quiz.question_count(), 1);
    }

    #[test]
    fn quiz_round_trip_serialization() {
        let quiz = Quiz::new(
            vec!["Supervised learning".to_string()],
            vec![sample_question("What is supervised learning?")],
        );

        let json = serde_json::to_string(&quiz).expect("quiz should serialize");
        let parsed: Quiz = serde_json::from_str(&json).expect("quiz should deserialize");

        assert_eq!(parsed, quiz);
    }

    #[test]
    fn quiz_display_numbers_questions() {
        let quiz = Quiz::new(
            vec!["Supervised learning".to_string()],
            vec![
                sample_question("What is supervised learning?"),
                sample_question("Name one supervised learning algorithm."),
            ],
        );

        let rendered = quiz.to_string();
        assert!(rendered.contains("1. What is supervised learning?"));
        assert!(rendered.contains("2. Name one supervised learning algorithm."));
    }
}
