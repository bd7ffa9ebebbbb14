use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Code execution error: {0}")]
    CodeExecution(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Quiz generation failed: {0}")]
    QuizGeneration(String),
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Completion(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::QuizGeneration("no valid quiz after 3 attempts".into());
        assert_eq!(
            err.to_string(),
            "Quiz generation failed: no valid quiz after 3 attempts"
        );

        let err = AppError::CodeExecution("connection refused".into());
        assert_eq!(err.to_string(), "Code execution error: connection refused");
    }

    #[test]
    fn test_validation_errors_convert() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1))]
            name: String,
        }

        let probe = Probe {
            name: String::new(),
        };
        let err: AppError = probe.validate().unwrap_err().into();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
