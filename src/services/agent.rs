use chrono::Utc;

use crate::{
    errors::AppResult,
    services::{
        text_generation::TextGenerator,
        vector_store::{Document, VectorStore},
    },
};

/// A persona the assistant speaks as. The name and description seed the
/// system prompt for every response variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    pub name: String,
    pub description: String,
}

impl Agent {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Persona preamble for single-shot responses. Carries the current
    /// timestamp; the history variants omit it.
    fn persona_with_timestamp(&self, user_name: &str) -> String {
        format!(
            "You are {}. {} It is currently {}. You are interacting with {}. ",
            self.name,
            self.description,
            Utc::now(),
            user_name
        )
    }

    fn persona(&self, user_name: &str) -> String {
        format!(
            "You are {}. {} You are interacting with {}. ",
            self.name, self.description, user_name
        )
    }

    /// Substitutes the persona into a formattable prompt template holding a
    /// single `{}` placeholder.
    fn system_prompt(prompt_template: &str, persona: &str) -> String {
        prompt_template.replace("{}", persona)
    }

    pub async fn respond(
        &self,
        generator: &TextGenerator,
        prompt_template: &str,
        user_name: &str,
        user_input: &str,
    ) -> AppResult<String> {
        let persona = self.persona_with_timestamp(user_name);
        log::debug!("Agent prompt: {}", persona);

        generator
            .generate(user_input, &Self::system_prompt(prompt_template, &persona))
            .await
    }

    pub async fn respond_with_docs(
        &self,
        generator: &TextGenerator,
        prompt_template: &str,
        user_name: &str,
        user_input: &str,
        store: &dyn VectorStore,
    ) -> AppResult<String> {
        let persona = self.persona_with_timestamp(user_name);
        log::debug!("Agent prompt: {}", persona);

        generator
            .generate_with_docs(
                user_input,
                &Self::system_prompt(prompt_template, &persona),
                store,
            )
            .await
    }

    /// Response against context documents the caller already retrieved.
    pub async fn respond_with_context(
        &self,
        generator: &TextGenerator,
        prompt_template: &str,
        user_name: &str,
        user_input: &str,
        documents: &[Document],
    ) -> AppResult<String> {
        let persona = self.persona_with_timestamp(user_name);
        log::debug!("Agent prompt: {}", persona);

        generator
            .generate_with_context(
                user_input,
                &Self::system_prompt(prompt_template, &persona),
                documents,
            )
            .await
    }

    pub async fn respond_with_history(
        &self,
        generator: &TextGenerator,
        prompt_template: &str,
        user_name: &str,
        user_input: &str,
        messages: &[String],
    ) -> AppResult<String> {
        let persona = self.persona(user_name);
        log::debug!("Agent prompt: {}", persona);

        generator
            .generate_with_history(
                user_input,
                &Self::system_prompt(prompt_template, &persona),
                messages,
            )
            .await
    }

    pub async fn respond_with_docs_and_history(
        &self,
        generator: &TextGenerator,
        prompt_template: &str,
        user_name: &str,
        user_input: &str,
        store: &dyn VectorStore,
        messages: &[String],
    ) -> AppResult<String> {
        let persona = self.persona(user_name);
        log::debug!("Agent prompt: {}", persona);

        generator
            .generate_with_docs_and_history(
                user_input,
                &Self::system_prompt(prompt_template, &persona),
                store,
                messages,
            )
            .await
    }
}
