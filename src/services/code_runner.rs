use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Result body returned by the code execution sandbox.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExecutionOutcome {
    pub ran: bool,
    pub errors: Option<String>,
    pub status_code: u16,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    async fn execute(&self, code: &str) -> AppResult<ExecutionOutcome>;
}

/// Client for the sandbox that runs student code. The sandbox has no retry
/// of its own, so the request carries an explicit timeout.
pub struct HttpCodeExecutor {
    http: reqwest::Client,
    url: String,
}

impl HttpCodeExecutor {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.code_runner_timeout_secs))
            .build()
            .map_err(|e| AppError::CodeExecution(format!("failed to build client: {}", e)))?;

        Ok(Self {
            http,
            url: config.code_runner_url.clone(),
        })
    }
}

#[async_trait]
impl CodeExecutor for HttpCodeExecutor {
    async fn execute(&self, code: &str) -> AppResult<ExecutionOutcome> {
        let response = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await
            .map_err(|e| AppError::CodeExecution(format!("execution request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| {
                AppError::CodeExecution(format!("execution service returned an error: {}", e))
            })?;

        let outcome = response
            .json::<ExecutionOutcome>()
            .await
            .map_err(|e| AppError::CodeExecution(format!("invalid execution response: {}", e)))?;

        log::debug!(
            "Code execution finished: ran={} status={}",
            outcome.ran,
            outcome.status_code
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_deserializes_success_body() {
        let outcome: ExecutionOutcome =
            serde_json::from_str(r#"{"ran": true, "errors": null, "status_code": 200}"#)
                .expect("outcome should deserialize");

        assert!(outcome.ran);
        assert_eq!(outcome.errors, None);
        assert_eq!(outcome.status_code, 200);
    }

    #[test]
    fn outcome_deserializes_failure_body() {
        let outcome: ExecutionOutcome = serde_json::from_str(
            r#"{"ran": false, "errors": "SyntaxError: invalid syntax", "status_code": 200}"#,
        )
        .expect("outcome should deserialize");

        assert!(!outcome.ran);
        assert_eq!(
            outcome.errors.as_deref(),
            Some("SyntaxError: invalid syntax")
        );
    }

    #[test]
    fn http_executor_builds_from_config() {
        let executor = HttpCodeExecutor::new(&Config::test_config());
        assert!(executor.is_ok());
    }
}
