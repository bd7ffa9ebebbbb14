use std::io::{self, Write};

use rustrict::CensorStr;

use studia::{
    app_state::AppState,
    config::Config,
    constants::prompts::{TUTOR_DESCRIPTION, TUTOR_NAME, TUTOR_SYSTEM_PROMPT},
    errors::{AppError, AppResult},
    models::{
        domain::{AnsweredQuestion, QuestionType},
        dto::QuizRequest,
    },
    services::{similarity::get_similar, Agent},
};

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let state = AppState::new(config).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("quiz") => run_quiz(&state).await,
        Some("similar") => run_similar(&state, &args[1..]).await,
        Some("chat") | None => run_chat(&state).await,
        Some(other) => Err(AppError::ValidationError(format!(
            "Unknown mode: {} (expected chat, quiz, or similar)",
            other
        ))),
    }
}

/// Interactive tutoring loop. Every input is censored before it reaches a
/// prompt; the transcript is threaded back as chat history.
async fn run_chat(state: &AppState) -> AppResult<()> {
    let tutor = Agent::new(TUTOR_NAME, TUTOR_DESCRIPTION);
    let mut previous_messages: Vec<String> = Vec::new();

    println!("Chat with {} (type \"exit\" to quit)", tutor.name);

    while let Some(input) = prompt("Enter your question: ") {
        if input.is_empty() {
            continue;
        }
        if input == "exit" {
            break;
        }

        let censored_input = input.censor();
        log::debug!("User input: {}", censored_input);

        let response = tutor
            .respond_with_docs_and_history(
                &state.text_generator,
                TUTOR_SYSTEM_PROMPT,
                "Student",
                &censored_input,
                state.vector_store.as_ref(),
                &previous_messages,
            )
            .await?;

        println!("\n{}\n", response);

        previous_messages.push(censored_input);
        previous_messages.push(response);
    }

    println!("Exiting");
    Ok(())
}

/// Prompts for quiz parameters, generates a quiz, collects the operator's
/// answers, and prints the grade report.
async fn run_quiz(state: &AppState) -> AppResult<()> {
    let Some(count_input) = prompt("Enter the number of questions you want: ") else {
        return Ok(());
    };
    let count: u32 = count_input.censor().trim().parse().map_err(|_| {
        AppError::ValidationError("The number of questions must be a positive integer".to_string())
    })?;

    let Some(types_input) = prompt(
        "Enter all the types of questions you want (multiple choice, free response, coding, true/false): ",
    ) else {
        return Ok(());
    };
    let allowed_types = parse_requested_types(&types_input.censor())?;

    let Some(topics_input) = prompt("Enter the topics you want the questions to be about: ") else {
        return Ok(());
    };

    let request = QuizRequest::new(count, allowed_types, topics_input.censor());
    let quiz = state.quiz_generator.generate_quiz(&request).await?;

    let mut answers = Vec::with_capacity(quiz.questions.len());
    for (i, question) in quiz.questions.iter().enumerate() {
        println!("\n{}. {}", i + 1, question.text);
        for choice in &question.choices {
            println!("{}", choice);
        }

        let user_answer = prompt("Your answer: ").unwrap_or_default();
        answers.push(AnsweredQuestion {
            question: question.clone(),
            user_answer,
        });
    }

    let report = state.quiz_grader.grade(&answers).await?;

    println!("\nOverall score: {:.0}%", report.overall_score * 100.0);
    for (i, graded) in report.questions.iter().enumerate() {
        println!(
            "{}. {:.2} (expected: {})",
            i + 1,
            graded.score,
            graded.question.answer
        );
        if let Some(error) = &graded.error {
            println!("   execution: {}", error);
        }
    }

    Ok(())
}

/// Prints the most similar corpus documents for each topic argument.
async fn run_similar(state: &AppState, topics: &[String]) -> AppResult<()> {
    if topics.is_empty() {
        return Err(AppError::ValidationError(
            "Provide at least one topic, e.g. studia similar \"Backpropagation\"".to_string(),
        ));
    }

    let similar = get_similar(
        state.vector_store.as_ref(),
        topics,
        state.config.max_context_docs,
    )
    .await?;

    for topic in topics {
        println!("{}:", topic);
        if let Some(sources) = similar.get(topic) {
            for source in sources {
                println!("  {}", source);
            }
        }
    }

    Ok(())
}

fn parse_requested_types(input: &str) -> AppResult<Vec<QuestionType>> {
    input
        .split(',')
        .map(|label| {
            QuestionType::parse_user_label(label).ok_or_else(|| {
                AppError::ValidationError(format!("Unknown question type: {}", label.trim()))
            })
        })
        .collect()
}

fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
