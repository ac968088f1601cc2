//! The `coursemate stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use coursemate_core::report::load_quiz_reports;
use coursemate_core::statistics::{compute_quiz_stats, QuizStats};

pub fn execute(reports_path: PathBuf, format: String) -> Result<()> {
    super::ensure_format(&format, &["text", "json"])?;
    let reports = load_quiz_reports(&reports_path)?;
    tracing::info!(
        "loaded {} quiz report(s) from {}",
        reports.len(),
        reports_path.display()
    );

    let stats = compute_quiz_stats(&reports);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => print_text(&stats),
    }

    Ok(())
}

fn print_text(stats: &QuizStats) {
    if stats.attempts == 0 {
        println!("No quiz reports found.");
        return;
    }

    println!("Attempts: {}", stats.attempts);
    println!("Average score: {:.1}%", stats.average_score);
    println!("Best score: {:.1}%", stats.best_score);
    println!("Worst score: {:.1}%", stats.worst_score);

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Question", "Correct Rate"]);
    for (quiz_id, questions) in &stats.per_question_correct_rate {
        for (question_id, rate) in questions {
            table.add_row(vec![
                Cell::new(quiz_id),
                Cell::new(question_id),
                Cell::new(format!("{:.0}%", rate * 100.0)),
            ]);
        }
    }
    println!("\n{table}");
}
