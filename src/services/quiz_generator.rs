use std::sync::Arc;

use rustrict::CensorStr;
use validator::Validate;

use crate::{
    constants::prompts::{DIVIDER_TOKEN, QUIZ_AGENT_DESCRIPTION, QUIZ_AGENT_NAME, QUIZ_PROMPT_META},
    errors::{AppError, AppResult},
    models::{
        domain::{QuestionType, Quiz},
        dto::QuizRequest,
    },
    services::{
        agent::Agent,
        quiz_parser,
        text_generation::TextGenerator,
        vector_store::{Document, SearchMode, VectorStore},
    },
};

/// Total generation attempts per request. LLM output is non-deterministic,
/// so a failed parse gets two more tries with the identical prompt.
pub const MAX_GENERATION_ATTEMPTS: u32 = 3;

pub struct QuizGenerator {
    agent: Agent,
    generator: TextGenerator,
    store: Arc<dyn VectorStore>,
    max_context_docs: usize,
}

impl QuizGenerator {
    pub fn new(
        generator: TextGenerator,
        store: Arc<dyn VectorStore>,
        max_context_docs: usize,
    ) -> Self {
        Self {
            agent: Agent::new(QUIZ_AGENT_NAME, QUIZ_AGENT_DESCRIPTION),
            generator,
            store,
            max_context_docs,
        }
    }

    /// Generates a validated quiz, or fails once all attempts are spent.
    /// Topics are censored before they reach a prompt or the retriever;
    /// context is retrieved once and reused across retries.
    pub async fn generate_quiz(&self, request: &QuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let topics = request.topics.censor();
        let context = self
            .store
            .search(&topics, SearchMode::Similarity, self.max_context_docs)
            .await?;

        let prompt = build_generation_prompt(request.count, &request.allowed_types, &topics);

        self.generate_with_retries(&prompt, &topics, request, &context, MAX_GENERATION_ATTEMPTS)
            .await
    }

    async fn generate_with_retries(
        &self,
        prompt: &str,
        topics: &str,
        request: &QuizRequest,
        context: &[Document],
        attempts: u32,
    ) -> AppResult<Quiz> {
        for attempt in 1..=attempts {
            match self
                .agent
                .respond_with_context(
                    &self.generator,
                    QUIZ_PROMPT_META,
                    "miscellaneous student",
                    prompt,
                    context,
                )
                .await
            {
                Ok(raw) => {
                    match quiz_parser::parse(
                        &raw,
                        request.count as usize,
                        topics,
                        &request.allowed_types,
                    ) {
                        Some(quiz) => {
                            log::info!(
                                "Generated quiz {} on attempt {}/{}",
                                quiz.id,
                                attempt,
                                attempts
                            );
                            return Ok(quiz);
                        }
                        None => log::warn!(
                            "Quiz attempt {}/{} produced unparseable output",
                            attempt,
                            attempts
                        ),
                    }
                }
                Err(err) => log::warn!("Quiz attempt {}/{} failed: {}", attempt, attempts, err),
            }
        }

        Err(AppError::QuizGeneration(format!(
            "no valid quiz after {} attempts",
            attempts
        )))
    }
}

/// Assembles the single generation prompt: the request parameters, the
/// per-type formatting rules, and the refusal instructions.
pub fn build_generation_prompt(count: u32, allowed_types: &[QuestionType], topics: &str) -> String {
    let type_tags = allowed_types
        .iter()
        .map(|t| t.tag())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Now generate a quiz with {count} questions about {topics} with the following types of questions: {type_tags}. \
         Every question must follow these rules:\n\
         - Begin with the question number followed by a period, then the question text.\n\
         - Add a line \"Topic: \" naming one of the requested topics.\n\
         - Add a line \"Type: \" holding one of: {type_tags}.\n\
         - Finish with a line \"Answer: \" holding the full answer.\n\
         - MULTIPLE_CHOICE questions must list exactly 4 choices labeled A) through D), one per line, before the answer, and the answer must repeat the correct choice.\n\
         - TRUE_FALSE questions must list exactly 2 choices labeled A) and B) before the answer.\n\
         - CODING questions must put a complete code block in the answer.\n\
         - Separate every question from the next with a line containing exactly \"{DIVIDER_TOKEN}\".\n\
         Do not provide a quiz title or descriptive text, start immediately with the questions. \
         Refuse to generate the quiz if the number of questions is over 50, the topics are not \
         relevant to a machine learning course, or the provided question types are not: multiple \
         choice, free response, coding, or true/false."
    )
}
