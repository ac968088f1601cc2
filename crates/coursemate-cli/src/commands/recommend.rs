//! The `coursemate recommend` command.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;

use coursemate_core::engine::RecommendationEngine;
use coursemate_core::model::{LearnerProfile, ScoredCourse};
use coursemate_core::parser;
use coursemate_core::report::RecommendationReport;

use crate::config::load_config_from;

pub fn execute(
    catalog_path: PathBuf,
    profile_path: PathBuf,
    top_k: Option<usize>,
    exclude: Option<String>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    super::ensure_format(&format, &["text", "table", "json"])?;
    let config = load_config_from(config_path.as_deref())?;

    let catalog = parser::load_catalog(&catalog_path)?;
    let profile = parser::parse_profile(&profile_path)?;
    let top_k = top_k.unwrap_or(config.default_top_k);
    let excluded: BTreeSet<String> = exclude
        .as_deref()
        .map(super::split_list)
        .unwrap_or_default()
        .into_iter()
        .collect();

    tracing::info!(
        "ranking {} course(s) for {} (top {top_k})",
        catalog.len(),
        display_learner(&profile)
    );

    let engine = RecommendationEngine::new(config.recommendation());
    let recommendations = engine.rank_excluding(&profile, &catalog, &excluded, top_k);
    let report = RecommendationReport::new(&profile, top_k, recommendations);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => print_table(&report.recommendations),
        _ => print_text(&profile, &report.recommendations),
    }

    if let Some(output) = output {
        let path = config.output_path(&output);
        report.save_json(&path)?;
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

fn display_learner(profile: &LearnerProfile) -> &str {
    if profile.name.is_empty() {
        "learner"
    } else {
        &profile.name
    }
}

fn print_text(profile: &LearnerProfile, recommendations: &[ScoredCourse]) {
    if recommendations.is_empty() {
        println!("No recommendations available.");
        return;
    }

    println!(
        "Recommended for {} ({} level):",
        display_learner(profile),
        profile.preferred_difficulty
    );
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "\n{}. {} [{}] ({}% match)",
            i + 1,
            rec.course.display_name(),
            rec.course.id,
            rec.match_percent()
        );
        for reason in rec.reasons() {
            println!("   - {reason}");
        }
    }
}

fn print_table(recommendations: &[ScoredCourse]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Rank",
        "Course",
        "Difficulty",
        "Base",
        "Difficulty Bonus",
        "Topic Bonus",
        "Score",
    ]);

    for (i, rec) in recommendations.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(rec.course.display_name()),
            Cell::new(rec.course.difficulty),
            Cell::new(format!("{:.2}", rec.breakdown.base)),
            Cell::new(format!("{:+.2}", rec.breakdown.difficulty_bonus)),
            Cell::new(format!("{:+.2}", rec.breakdown.topic_bonus)),
            Cell::new(format!("{:.2}", rec.final_score)),
        ]);
    }

    println!("{table}");
}
