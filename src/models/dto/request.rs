use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::question::QuestionType;

/// Parameters for one quiz generation request. The count ceiling mirrors the
/// refusal instruction given to the model.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuizRequest {
    #[validate(range(min = 1, max = 50))]
    pub count: u32,

    #[validate(length(min = 1, message = "At least one question type is required"))]
    pub allowed_types: Vec<QuestionType>,

    #[validate(length(min = 1, message = "Topics must not be empty"))]
    pub topics: String,
}

impl QuizRequest {
    pub fn new(count: u32, allowed_types: Vec<QuestionType>, topics: impl Into<String>) -> Self {
        Self {
            count,
            allowed_types,
            topics: topics.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_request_passes_validation() {
        let request = QuizRequest::new(
            10,
            vec![QuestionType::MultipleChoice],
            "dimensionality reduction, supervised learning",
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn zero_count_fails_validation() {
        let request = QuizRequest::new(0, vec![QuestionType::MultipleChoice], "clustering");
        assert!(request.validate().is_err());
    }

    #[test]
    fn count_over_fifty_fails_validation() {
        let request = QuizRequest::new(51, vec![QuestionType::MultipleChoice], "clustering");
        assert!(request.validate().is_err());
    }

    #[test]
    fn empty_topics_fails_validation() {
        let request = QuizRequest::new(5, vec![QuestionType::TrueFalse], "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn empty_types_fails_validation() {
        let request = QuizRequest::new(5, vec![], "clustering");
        assert!(request.validate().is_err());
    }
}
