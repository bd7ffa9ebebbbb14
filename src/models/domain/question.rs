use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Copy)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Coding,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
        QuestionType::Coding,
    ];

    /// The tag the generation prompt asks the model to emit on "Type:" lines.
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::ShortAnswer => "SHORT_ANSWER",
            QuestionType::Coding => "CODING",
        }
    }

    pub fn parse_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.tag().eq_ignore_ascii_case(tag))
    }

    /// Maps the free-text labels the CLI accepts ("multiple choice",
    /// "free response", ...) onto a type tag.
    pub fn parse_user_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "multiple choice" => Some(QuestionType::MultipleChoice),
            "true/false" | "true false" => Some(QuestionType::TrueFalse),
            "free response" | "short answer" => Some(QuestionType::ShortAnswer),
            "coding" => Some(QuestionType::Coding),
            other => Self::parse_tag(other),
        }
    }

    pub fn expected_choice_count(&self) -> Option<usize> {
        match self {
            QuestionType::MultipleChoice => Some(4),
            QuestionType::TrueFalse => Some(2),
            QuestionType::ShortAnswer | QuestionType::Coding => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question_type: QuestionType,
    pub text: String,
    pub topic: String,
    pub choices: Vec<String>,
    pub answer: String,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.text)?;
        for choice in &self.choices {
            writeln!(f, "{}", choice)?;
        }
        write!(f, "Answer: {}", self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_tag_round_trip() {
        for variant in QuestionType::ALL {
            assert_eq!(QuestionType::parse_tag(variant.tag()), Some(variant));
        }
    }

    #[test]
    fn question_type_parse_tag_is_case_insensitive() {
        assert_eq!(
            QuestionType::parse_tag("multiple_choice"),
            Some(QuestionType::MultipleChoice)
        );
        assert_eq!(
            QuestionType::parse_tag(" true_false "),
            Some(QuestionType::TrueFalse)
        );
    }

    #[test]
    fn question_type_rejects_unknown_tag() {
        assert_eq!(QuestionType::parse_tag("ESSAY"), None);
        assert_eq!(QuestionType::parse_tag(""), None);
    }

    #[test]
    fn question_type_parses_user_labels() {
        assert_eq!(
            QuestionType::parse_user_label("multiple choice"),
            Some(QuestionType::MultipleChoice)
        );
        assert_eq!(
            QuestionType::parse_user_label("free response"),
            Some(QuestionType::ShortAnswer)
        );
        assert_eq!(
            QuestionType::parse_user_label("True/False"),
            Some(QuestionType::TrueFalse)
        );
        assert_eq!(
            QuestionType::parse_user_label("CODING"),
            Some(QuestionType::Coding)
        );
        assert_eq!(QuestionType::parse_user_label("essay"), None);
    }

    #[test]
    fn expected_choice_counts_match_type_invariants() {
        assert_eq!(
            QuestionType::MultipleChoice.expected_choice_count(),
            Some(4)
        );
        assert_eq!(QuestionType::TrueFalse.expected_choice_count(), Some(2));
        assert_eq!(QuestionType::ShortAnswer.expected_choice_count(), None);
        assert_eq!(QuestionType::Coding.expected_choice_count(), None);
    }

    #[test]
    fn question_display_lists_choices_and_answer() {
        let question = Question {
            question_type: QuestionType::MultipleChoice,
            text: "What does SGD stand for?".to_string(),
            topic: "Optimization".to_string(),
            choices: vec![
                "A) Stochastic gradient descent".to_string(),
                "B) Standard gradient descent".to_string(),
                "C) Sampled gradient direction".to_string(),
                "D) Scaled gradient delta".to_string(),
            ],
            answer: "A) Stochastic gradient descent".to_string(),
        };

        let rendered = question.to_string();
        assert!(rendered.starts_with("What does SGD stand for?"));
        assert!(rendered.contains("B) Standard gradient descent"));
        assert!(rendered.ends_with("Answer: A) Stochastic gradient descent"));
    }
}
