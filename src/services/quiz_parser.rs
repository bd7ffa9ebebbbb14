use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants::prompts::DIVIDER_TOKEN,
    models::domain::{Question, QuestionType, Quiz},
};

static QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\.\s*(.*\S)\s*$").expect("question pattern is a valid regex"));
static TOPIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Topic:\s*(.*)$").expect("topic pattern is a valid regex"));
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Type:\s*(.*)$").expect("type pattern is a valid regex"));
static ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Answer:\s*(.*)$").expect("answer pattern is a valid regex"));
static CHOICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]\)").expect("choice pattern is a valid regex"));

/// What a single raw line contributes to the question being assembled.
/// Each line matches at most one field, checked in a fixed order.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    QuestionText(&'a str),
    Topic(&'a str),
    Type(&'a str),
    AnswerStart(&'a str),
    Choice(&'a str),
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    if let Some(caps) = QUESTION_RE.captures(line) {
        return LineKind::QuestionText(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = TOPIC_RE.captures(line) {
        return LineKind::Topic(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = TYPE_RE.captures(line) {
        return LineKind::Type(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = ANSWER_RE.captures(line) {
        return LineKind::AnswerStart(caps.get(1).map_or("", |m| m.as_str()));
    }
    if CHOICE_RE.is_match(line.trim_start()) {
        return LineKind::Choice(line.trim());
    }
    LineKind::Other
}

/// Accumulator for one divider-delimited section. Once an "Answer:" line is
/// seen, every remaining line belongs to the answer verbatim.
#[derive(Debug, Default)]
struct SectionState {
    text: Option<String>,
    topic: Option<String>,
    type_tag: Option<String>,
    choices: Vec<String>,
    answer_lines: Vec<String>,
    accumulating_answer: bool,
}

impl SectionState {
    fn feed(&mut self, line: &str) {
        if self.accumulating_answer {
            self.answer_lines.push(line.to_string());
            return;
        }

        match classify(line) {
            LineKind::QuestionText(text) => self.text = Some(text.to_string()),
            LineKind::Topic(topic) => self.topic = Some(topic.trim().to_string()),
            LineKind::Type(tag) => self.type_tag = Some(tag.trim().to_string()),
            LineKind::AnswerStart(rest) => {
                self.answer_lines.push(rest.to_string());
                self.accumulating_answer = true;
            }
            LineKind::Choice(choice) => self.choices.push(choice.to_string()),
            LineKind::Other => {}
        }
    }

    /// Validates the accumulated fields, failing fast on the first violation.
    fn finish(self, requested_topics: &[String], allowed_types: &[QuestionType]) -> Option<Question> {
        let text = self.text?;

        let question_type = QuestionType::parse_tag(self.type_tag.as_deref()?)?;

        if let Some(expected) = question_type.expected_choice_count() {
            if self.choices.len() != expected {
                log::warn!(
                    "{} question has {} choices, expected {}",
                    question_type,
                    self.choices.len(),
                    expected
                );
                return None;
            }
        }

        if !allowed_types.contains(&question_type) {
            log::warn!("question type {} was not requested", question_type);
            return None;
        }

        let topic = self.topic?;
        if !requested_topics
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&topic))
        {
            log::warn!("question topic {:?} is not in the requested set", topic);
            return None;
        }

        let answer = self.answer_lines.join("\n").trim_end().to_string();

        Some(Question {
            question_type,
            text,
            topic,
            choices: self.choices,
            answer,
        })
    }
}

/// Splits a comma-separated topic string into trimmed, non-empty entries.
pub fn split_topics(topics: &str) -> Vec<String> {
    topics
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses raw generated text into a validated quiz. `None` is the failure
/// sentinel the generator's retry loop checks for.
pub fn parse(
    raw: &str,
    expected_count: usize,
    topics: &str,
    allowed_types: &[QuestionType],
) -> Option<Quiz> {
    let requested_topics = split_topics(topics);
    let mut questions = Vec::new();

    for section in raw.split(DIVIDER_TOKEN) {
        if section.trim().is_empty() {
            continue;
        }

        let mut state = SectionState::default();
        for line in section.lines() {
            state.feed(line);
        }

        questions.push(state.finish(&requested_topics, allowed_types)?);
    }

    if questions.len() != expected_count {
        log::warn!(
            "parsed {} questions, expected {}",
            questions.len(),
            expected_count
        );
        return None;
    }

    Some(Quiz::new(requested_topics, questions))
}
