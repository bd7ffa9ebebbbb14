use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub vector_store_url: String,
    pub vector_collection: String,
    pub postgresql_password: SecretString,
    pub code_runner_url: String,
    pub code_runner_timeout_secs: u64,
    pub max_context_docs: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_else(|_| "dev_openai_key".to_string()),
            ),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            temperature: env::var("GENERATION_TEMPERATURE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(0.7),
            max_tokens: env::var("GENERATION_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(1024),
            vector_store_url: env::var("VECTOR_STORE_URL")
                .unwrap_or_else(|_| "http://localhost:8100".to_string()),
            vector_collection: env::var("VECTOR_COLLECTION")
                .unwrap_or_else(|_| "corpus".to_string()),
            postgresql_password: SecretString::from(
                env::var("POSTGRESQL_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
            ),
            code_runner_url: env::var("CODE_RUNNER_URL")
                .unwrap_or_else(|_| "http://localhost:8008/execute".to_string()),
            code_runner_timeout_secs: env::var("CODE_RUNNER_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            max_context_docs: env::var("MAX_CONTEXT_DOCS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret() == "dev_openai_key" {
            panic!(
                "FATAL: OPENAI_API_KEY is using default value! Set OPENAI_API_KEY environment variable."
            );
        }

        if self.postgresql_password.expose_secret() == "postgres" {
            panic!(
                "FATAL: POSTGRESQL_PASSWORD is using default value! Set POSTGRESQL_PASSWORD environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("test_openai_key".to_string()),
            openai_model: "gpt-3.5-turbo".to_string(),
            temperature: 0.0,
            max_tokens: 256,
            vector_store_url: "http://localhost:8100".to_string(),
            vector_collection: "corpus-test".to_string(),
            postgresql_password: SecretString::from("test_password".to_string()),
            code_runner_url: "http://localhost:8008/execute".to_string(),
            code_runner_timeout_secs: 5,
            max_context_docs: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.openai_model.is_empty());
        assert!(!config.vector_store_url.is_empty());
        assert!(config.code_runner_timeout_secs > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.vector_collection, "corpus-test");
        assert_eq!(config.max_context_docs, 3);
        assert_eq!(config.code_runner_url, "http://localhost:8008/execute");
    }
}
