use serde::{Deserialize, Serialize};

use crate::models::domain::question::Question;

/// A question paired with the answer a student submitted for it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub user_answer: String,
}

/// Grading output for a single question. Execution diagnostics from the code
/// sandbox land in `error` and never change the score.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GradedQuestion {
    pub question: Question,
    pub user_answer: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GradeReport {
    pub overall_score: f64,
    pub questions: Vec<GradedQuestion>,
}

impl GradeReport {
    pub fn scores(&self) -> Vec<f64> {
        self.questions.iter().map(|q| q.score).collect()
    }

    pub fn errors(&self) -> Vec<Option<&str>> {
        self.questions
            .iter()
            .map(|q| q.error.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::question::QuestionType;

    fn graded(score: f64, error: Option<&str>) -> GradedQuestion {
        GradedQuestion {
            question: Question {
                question_type: QuestionType::Coding,
                text: "Write a function that doubles a number.".to_string(),
                topic: "Python".to_string(),
                choices: vec![],
                answer: "def double(x):\n    return 2 * x".to_string(),
            },
            user_answer: "def double(x): return x + x".to_string(),
            score,
            error: error.map(|e| e.to_string()),
        }
    }

    #[test]
    fn report_exposes_ordered_scores_and_errors() {
        let report = GradeReport {
            overall_score: 0.5,
            questions: vec![graded(1.0, None), graded(0.0, Some("NameError: x"))],
        };

        assert_eq!(report.scores(), vec![1.0, 0.0]);
        assert_eq!(report.errors(), vec![None, Some("NameError: x")]);
    }

    #[test]
    fn graded_question_serializes_without_null_error() {
        let json = serde_json::to_string(&graded(0.8, None)).expect("should serialize");
        assert!(!json.contains("\"error\""));
    }
}
