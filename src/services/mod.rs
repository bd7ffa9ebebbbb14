pub mod agent;
pub mod code_runner;
pub mod quiz_generator;
pub mod quiz_grader;
pub mod quiz_parser;
pub mod similarity;
pub mod text_generation;
pub mod vector_store;

pub use agent::Agent;
pub use code_runner::{CodeExecutor, HttpCodeExecutor};
pub use quiz_generator::QuizGenerator;
pub use quiz_grader::QuizGrader;
pub use text_generation::{CompletionClient, OpenAiCompletionClient, TextGenerator};
pub use vector_store::{PgVectorGateway, VectorStore};
