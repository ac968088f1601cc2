//! The `coursemate validate` command.

use std::path::PathBuf;

use anyhow::Result;

use coursemate_core::parser::{self, ValidationWarning};

pub fn execute(
    catalog_path: Option<PathBuf>,
    profile_path: Option<PathBuf>,
    quiz_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        catalog_path.is_some() || profile_path.is_some() || quiz_path.is_some(),
        "nothing to validate: pass --catalog, --profile, or --quiz"
    );

    let mut total_warnings = 0;

    let catalog = match &catalog_path {
        Some(path) => {
            let courses = parser::load_catalog(path)?;
            println!("Catalog: {} ({} courses)", path.display(), courses.len());
            let warnings = parser::validate_catalog(&courses);
            print_warnings(&warnings);
            total_warnings += warnings.len();
            Some(courses)
        }
        None => None,
    };

    if let Some(path) = &profile_path {
        let profile = parser::parse_profile(path)?;
        println!(
            "Profile: {} ({} topics, {} completed)",
            path.display(),
            profile.topics.len(),
            profile.completed_course_ids.len()
        );
        let warnings = parser::validate_profile(&profile, catalog.as_deref());
        print_warnings(&warnings);
        total_warnings += warnings.len();
    }

    if let Some(path) = &quiz_path {
        let quiz = parser::parse_quiz(path)?;
        println!("Quiz: {} ({} questions)", quiz.id, quiz.len());
        let warnings = parser::validate_quiz_content(&quiz);
        print_warnings(&warnings);
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}
