use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Similarity,
    MaxMarginalRelevance,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Similarity => "similarity",
            SearchMode::MaxMarginalRelevance => "mmr",
        }
    }
}

/// One ranked match from the embedding store.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Document {
    pub text: String,
    pub source: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn search(&self, query: &str, mode: SearchMode, k: usize) -> AppResult<Vec<Document>>;
}

/// HTTP client for the pgvector search gateway in front of the document
/// embedding database.
pub struct PgVectorGateway {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    password: SecretString,
}

#[derive(Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    mode: &'a str,
    k: usize,
    collection: &'a str,
}

impl PgVectorGateway {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let gateway = Self {
            http: reqwest::Client::new(),
            base_url: config.vector_store_url.trim_end_matches('/').to_string(),
            collection: config.vector_collection.clone(),
            password: config.postgresql_password.clone(),
        };

        gateway.health_check().await?;
        log::info!("Connected to vector store at {}", gateway.base_url);

        Ok(gateway)
    }

    async fn health_check(&self) -> AppResult<()> {
        self.http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("health check failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::VectorStore(format!("health check failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for PgVectorGateway {
    async fn search(&self, query: &str, mode: SearchMode, k: usize) -> AppResult<Vec<Document>> {
        let body = SearchBody {
            query,
            mode: mode.as_str(),
            k,
            collection: &self.collection,
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .header("x-database-password", self.password.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("search request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::VectorStore(format!("search request failed: {}", e)))?;

        let documents = response
            .json::<Vec<Document>>()
            .await
            .map_err(|e| AppError::VectorStore(format!("invalid search response: {}", e)))?;

        log::debug!(
            "Vector search ({}) for {:?} returned {} documents",
            mode.as_str(),
            query,
            documents.len()
        );

        Ok(documents)
    }
}
