//! The `coursemate grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use coursemate_core::parser;
use coursemate_core::quiz::{QuizAttempt, QuizOutcome};
use coursemate_core::report::QuizReport;

use crate::config::load_config_from;

pub fn execute(
    quiz_path: PathBuf,
    answers: String,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    super::ensure_format(&format, &["text", "json"])?;
    let quiz = parser::parse_quiz(&quiz_path)?;
    let answers = parse_answers(&answers)?;
    anyhow::ensure!(
        answers.len() <= quiz.len(),
        "{} answer(s) given but quiz '{}' has {} question(s)",
        answers.len(),
        quiz.id,
        quiz.len()
    );

    let mut attempt = QuizAttempt::start(quiz)?;
    let outcome = run_attempt(&mut attempt, &answers)?;
    let report = QuizReport::new(attempt.quiz(), attempt.selected_answers().clone(), outcome);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&attempt, &report.outcome),
    }

    if let Some(output) = output {
        let config = load_config_from(config_path.as_deref())?;
        let path = config.output_path(&output);
        report.save_json(&path)?;
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

/// Parse `"0,1,-,2"` into per-question selections. `-` or an empty slot
/// leaves that question unanswered.
fn parse_answers(s: &str) -> Result<Vec<Option<usize>>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .enumerate()
        .map(|(i, token)| match token.trim() {
            "" | "-" => Ok(None),
            t => t
                .parse()
                .map(Some)
                .with_context(|| format!("answer {} is not an option index: {t}", i + 1)),
        })
        .collect()
}

/// Answer each question in turn, then finish. Questions past the end of
/// `answers` are left unanswered.
fn run_attempt(attempt: &mut QuizAttempt, answers: &[Option<usize>]) -> Result<QuizOutcome> {
    for (i, answer) in answers.iter().enumerate() {
        if let Some(option) = answer {
            attempt
                .select_answer(*option)
                .with_context(|| format!("question {}", i + 1))?;
        }
        if i + 1 < answers.len() {
            attempt.advance()?;
        }
    }
    Ok(attempt.complete()?)
}

fn print_text(attempt: &QuizAttempt, outcome: &QuizOutcome) {
    let quiz = attempt.quiz();
    let title = if quiz.title.is_empty() {
        &quiz.id
    } else {
        &quiz.title
    };

    println!("Quiz: {title}");
    println!("Score: {}%", outcome.rounded_score());
    println!(
        "You answered {} out of {} questions correctly.",
        outcome.correct_count, outcome.total_questions
    );

    for review in outcome.review(quiz, attempt.selected_answers()) {
        let mark = if review.correct { "OK" } else { "WRONG" };
        println!("\n{}. [{mark}] {}", review.index + 1, review.question.prompt);
        match review.selected_text() {
            Some(selected) => println!("   your answer: {selected}"),
            None => println!("   your answer: (none)"),
        }
        if let (false, Some(correct)) = (review.correct, review.correct_text()) {
            println!("   correct answer: {correct}");
        }
        if !review.question.explanation.is_empty() {
            println!("   {}", review.question.explanation);
        }
    }
}
