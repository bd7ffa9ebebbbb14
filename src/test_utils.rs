use crate::models::domain::{AnsweredQuestion, Question, QuestionType};
