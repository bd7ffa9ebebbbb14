pub mod graded;
pub mod question;
pub mod quiz;
pub use graded::{AnsweredQuestion, GradeReport, GradedQuestion};
pub use question::{Question, QuestionType};
pub use quiz::Quiz;
