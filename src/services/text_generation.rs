use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::vector_store::{Document, SearchMode, VectorStore},
};

#[derive(Clone, Debug)]
pub enum ChatTurn {
    User(String),
    Assistant(String),
}

/// One fully-assembled completion call: a system prompt, optional prior
/// turns, and the current user input.
#[derive(Clone, Debug, Default)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub input: String,
    pub history: Vec<ChatTurn>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}

pub struct OpenAiCompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiCompletionClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::with_config(
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret()),
        );

        Self {
            client,
            model: config.openai_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(request.history.len() + 2);

        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system_prompt)
                .build()?
                .into(),
        );

        for turn in request.history {
            match turn {
                ChatTurn::User(text) => messages.push(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(text)
                        .build()?
                        .into(),
                ),
                ChatTurn::Assistant(text) => messages.push(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(text)
                        .build()?
                        .into(),
                ),
            }
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.input)
                .build()?
                .into(),
        );

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_completion_tokens(self.max_tokens)
            .build()?;

        let response = self.client.chat().create(chat_request).await?;
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::Completion("completion response contained no content".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

/// Front door for text generation. The four variants mirror which of
/// retrieved context and chat history a caller supplies.
#[derive(Clone)]
pub struct TextGenerator {
    client: Arc<dyn CompletionClient>,
    max_context_docs: usize,
}

impl TextGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, max_context_docs: usize) -> Self {
        Self {
            client,
            max_context_docs,
        }
    }

    pub async fn generate(&self, input: &str, system_prompt: &str) -> AppResult<String> {
        self.client
            .complete(CompletionRequest {
                system_prompt: system_prompt.to_string(),
                input: input.to_string(),
                history: vec![],
            })
            .await
    }

    pub async fn generate_with_docs(
        &self,
        input: &str,
        system_prompt: &str,
        store: &dyn VectorStore,
    ) -> AppResult<String> {
        let documents = store
            .search(input, SearchMode::Similarity, self.max_context_docs)
            .await?;
        self.generate_with_context(input, system_prompt, &documents)
            .await
    }

    /// Generation against context documents the caller retrieved up front.
    /// Used by the quiz generator so retries reuse identical context.
    pub async fn generate_with_context(
        &self,
        input: &str,
        system_prompt: &str,
        documents: &[Document],
    ) -> AppResult<String> {
        self.client
            .complete(CompletionRequest {
                system_prompt: with_context(system_prompt, documents),
                input: input.to_string(),
                history: vec![],
            })
            .await
    }

    pub async fn generate_with_history(
        &self,
        input: &str,
        system_prompt: &str,
        messages: &[String],
    ) -> AppResult<String> {
        self.client
            .complete(CompletionRequest {
                system_prompt: system_prompt.to_string(),
                input: input.to_string(),
                history: history_turns(messages),
            })
            .await
    }

    pub async fn generate_with_docs_and_history(
        &self,
        input: &str,
        system_prompt: &str,
        store: &dyn VectorStore,
        messages: &[String],
    ) -> AppResult<String> {
        let documents = store
            .search(input, SearchMode::Similarity, self.max_context_docs)
            .await?;

        self.client
            .complete(CompletionRequest {
                system_prompt: with_context(system_prompt, &documents),
                input: input.to_string(),
                history: history_turns(messages),
            })
            .await
    }
}

/// Even indices are student messages, odd indices are prior agent replies.
fn history_turns(messages: &[String]) -> Vec<ChatTurn> {
    messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            if i % 2 == 0 {
                ChatTurn::User(message.clone())
            } else {
                ChatTurn::Assistant(message.clone())
            }
        })
        .collect()
}

fn with_context(system_prompt: &str, documents: &[Document]) -> String {
    if documents.is_empty() {
        return system_prompt.to_string();
    }

    let context = documents
        .iter()
        .map(|doc| doc.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\nCONTEXT:\n{}", system_prompt, context)
}

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is a valid regex"));

/// Extracts a numeric rating from free-text judge output. When several
/// numbers appear the smallest wins; no number yields `None`.
pub fn extract_rating(text: &str) -> Option<f64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .fold(None, |min, n| match min {
            Some(current) if current <= n => Some(current),
            _ => Some(n),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vector_store::MockVectorStore;

    fn doc(text: &str) -> Document {
        Document {
            text: text.to_string(),
            source: "notes.md".to_string(),
            metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn extract_rating_finds_single_number() {
        assert_eq!(extract_rating("Score: 0.8"), Some(0.8));
    }

    #[test]
    fn extract_rating_takes_smallest_of_several() {
        assert_eq!(extract_rating("I would give this 0.8 out of 1.0"), Some(0.8));
        assert_eq!(extract_rating("Between 3 and 7"), Some(3.0));
    }

    #[test]
    fn extract_rating_returns_none_without_numbers() {
        assert_eq!(extract_rating("The answer covers every key point."), None);
    }

    #[test]
    fn history_turns_alternate_starting_with_user() {
        let turns = history_turns(&[
            "What is deep learning?".to_string(),
            "That is a complex machine learning topic.".to_string(),
            "Can you give an example?".to_string(),
        ]);

        assert_eq!(turns.len(), 3);
        assert!(matches!(&turns[0], ChatTurn::User(m) if m == "What is deep learning?"));
        assert!(matches!(&turns[1], ChatTurn::Assistant(_)));
        assert!(matches!(&turns[2], ChatTurn::User(_)));
    }

    #[test]
    fn with_context_appends_document_block() {
        let prompt = with_context("You are Tutor.", &[doc("Backprop uses the chain rule.")]);
        assert!(prompt.starts_with("You are Tutor."));
        assert!(prompt.contains("CONTEXT:\nBackprop uses the chain rule."));
    }

    #[test]
    fn with_context_without_documents_is_unchanged() {
        assert_eq!(with_context("You are Tutor.", &[]), "You are Tutor.");
    }

    #[tokio::test]
    async fn generate_with_docs_stuffs_retrieved_context() {
        let mut store = MockVectorStore::new();
        store
            .expect_search()
            .withf(|query, mode, k| {
                query == "What is backprop?" && *mode == SearchMode::Similarity && *k == 3
            })
            .returning(|_, _, _| Ok(vec![doc("Backprop uses the chain rule.")]));

        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|request| {
                request.system_prompt.contains("CONTEXT:")
                    && request.system_prompt.contains("chain rule")
                    && request.input == "What is backprop?"
            })
            .returning(|_| Ok("It propagates gradients backwards.".to_string()));

        let generator = TextGenerator::new(Arc::new(client), 3);
        let response = generator
            .generate_with_docs("What is backprop?", "You are Tutor.", &store)
            .await
            .expect("generation should succeed");

        assert_eq!(response, "It propagates gradients backwards.");
    }

    #[tokio::test]
    async fn generate_with_history_threads_turns() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|request| request.history.len() == 2)
            .returning(|_| Ok("ok".to_string()));

        let generator = TextGenerator::new(Arc::new(client), 3);
        let response = generator
            .generate_with_history(
                "Next question",
                "You are Tutor.",
                &["hi".to_string(), "hello".to_string()],
            )
            .await
            .expect("generation should succeed");

        assert_eq!(response, "ok");
    }
}
