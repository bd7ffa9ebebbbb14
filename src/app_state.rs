use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        code_runner::{CodeExecutor, HttpCodeExecutor},
        quiz_generator::QuizGenerator,
        quiz_grader::QuizGrader,
        text_generation::{CompletionClient, OpenAiCompletionClient, TextGenerator},
        vector_store::{PgVectorGateway, VectorStore},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub text_generator: TextGenerator,
    pub vector_store: Arc<dyn VectorStore>,
    pub quiz_generator: Arc<QuizGenerator>,
    pub quiz_grader: Arc<QuizGrader>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let completion_client: Arc<dyn CompletionClient> =
            Arc::new(OpenAiCompletionClient::new(&config));
        let vector_store: Arc<dyn VectorStore> = Arc::new(PgVectorGateway::connect(&config).await?);
        let code_executor: Arc<dyn CodeExecutor> = Arc::new(HttpCodeExecutor::new(&config)?);

        let text_generator = TextGenerator::new(completion_client, config.max_context_docs);

        let quiz_generator = Arc::new(QuizGenerator::new(
            text_generator.clone(),
            vector_store.clone(),
            config.max_context_docs,
        ));
        let quiz_grader = Arc::new(QuizGrader::new(text_generator.clone(), code_executor));

        Ok(Self {
            config: Arc::new(config),
            text_generator,
            vector_store,
            quiz_generator,
            quiz_grader,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
