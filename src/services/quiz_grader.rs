use std::sync::Arc;

use crate::{
    constants::prompts::{CODE_JUDGE_SYSTEM_PROMPT, SHORT_ANSWER_JUDGE_SYSTEM_PROMPT},
    errors::{AppError, AppResult},
    models::domain::{AnsweredQuestion, GradeReport, GradedQuestion, QuestionType},
    services::{
        code_runner::CodeExecutor,
        text_generation::{extract_rating, TextGenerator},
    },
};

/// Share of a coding question's score earned just by code that runs.
/// The remainder comes from judged similarity to the reference solution.
pub const EXECUTION_WEIGHT: f64 = 0.2;

pub struct QuizGrader {
    generator: TextGenerator,
    executor: Arc<dyn CodeExecutor>,
}

impl QuizGrader {
    pub fn new(generator: TextGenerator, executor: Arc<dyn CodeExecutor>) -> Self {
        Self {
            generator,
            executor,
        }
    }

    /// Grades submitted answers in order. Sandbox failures are fatal for the
    /// whole call; sandbox diagnostics for code that ran but misbehaved are
    /// reported per question.
    pub async fn grade(&self, answers: &[AnsweredQuestion]) -> AppResult<GradeReport> {
        if answers.is_empty() {
            return Err(AppError::ValidationError(
                "Cannot grade an empty answer set".to_string(),
            ));
        }

        let mut questions = Vec::with_capacity(answers.len());
        for answered in answers {
            let (score, error) = self.grade_question(answered).await?;
            questions.push(GradedQuestion {
                question: answered.question.clone(),
                user_answer: answered.user_answer.clone(),
                score,
                error,
            });
        }

        let overall_score =
            questions.iter().map(|q| q.score).sum::<f64>() / questions.len() as f64;

        Ok(GradeReport {
            overall_score,
            questions,
        })
    }

    async fn grade_question(&self, answered: &AnsweredQuestion) -> AppResult<(f64, Option<String>)> {
        match answered.question.question_type {
            QuestionType::MultipleChoice | QuestionType::TrueFalse => {
                let score = if answered.user_answer == answered.question.answer {
                    1.0
                } else {
                    0.0
                };
                Ok((score, None))
            }
            QuestionType::ShortAnswer => {
                let score = self
                    .judge(
                        SHORT_ANSWER_JUDGE_SYSTEM_PROMPT,
                        &answered.question.text,
                        &answered.question.answer,
                        &answered.user_answer,
                    )
                    .await?;
                Ok((score, None))
            }
            QuestionType::Coding => self.grade_coding(answered).await,
        }
    }

    async fn grade_coding(&self, answered: &AnsweredQuestion) -> AppResult<(f64, Option<String>)> {
        let outcome = self.executor.execute(&answered.user_answer).await?;
        let execution_credit = if outcome.ran { EXECUTION_WEIGHT } else { 0.0 };

        let similarity = self
            .judge(
                CODE_JUDGE_SYSTEM_PROMPT,
                &answered.question.text,
                &answered.question.answer,
                &answered.user_answer,
            )
            .await?;

        let score = execution_credit + (1.0 - EXECUTION_WEIGHT) * similarity;
        Ok((score, outcome.errors))
    }

    async fn judge(
        &self,
        system_prompt: &str,
        question: &str,
        reference_answer: &str,
        user_answer: &str,
    ) -> AppResult<f64> {
        let input = format!(
            "Question: {}\nReference answer: {}\nStudent answer: {}",
            question, reference_answer, user_answer
        );

        let response = self.generator.generate(&input, system_prompt).await?;
        log::debug!("Judge response: {}", response);

        let score = extract_rating(&response).ok_or_else(|| {
            AppError::Completion(format!("judge response contained no score: {}", response))
        })?;

        Ok(score.clamp(0.0, 1.0))
    }
}
