use std::collections::HashMap;

use crate::{
    errors::AppResult,
    services::vector_store::{SearchMode, VectorStore},
};

/// Maps each topic to the sources of its closest documents, using
/// max-marginal-relevance search to keep the matches diverse.
pub async fn get_similar(
    store: &dyn VectorStore,
    topics: &[String],
    max_per_topic: usize,
) -> AppResult<HashMap<String, Vec<String>>> {
    let mut result = HashMap::new();

    for topic in topics {
        let documents = store
            .search(topic, SearchMode::MaxMarginalRelevance, max_per_topic)
            .await?;
        result.insert(
            topic.clone(),
            documents.into_iter().map(|doc| doc.source).collect(),
        );
    }

    Ok(result)
}
