//! The `coursemate init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("coursemate.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("catalogs")?;
    write_if_missing(Path::new("catalogs/catalog.toml"), SAMPLE_CATALOG)?;
    write_if_missing(Path::new("catalogs/profile.toml"), SAMPLE_PROFILE)?;
    write_if_missing(Path::new("catalogs/quiz.toml"), SAMPLE_QUIZ)?;

    println!("\nNext steps:");
    println!("  1. Run: coursemate validate --catalog catalogs/catalog.toml --profile catalogs/profile.toml");
    println!("  2. Run: coursemate recommend --catalog catalogs/catalog.toml --profile catalogs/profile.toml");
    println!("  3. Run: coursemate grade --quiz catalogs/quiz.toml --answers 0,1");

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, contents)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# coursemate configuration

# Recommendations shown when --top-k is not given (COURSEMATE_TOP_K overrides).
default_top_k = 3

# Added when a course matches the learner's preferred difficulty.
difficulty_bonus = 0.10

# Added once when any course tag overlaps a learner topic.
topic_bonus = 0.15

# Where bare --output file names are written. ${VAR} is expanded.
output_dir = "./coursemate-results"
"#;

const SAMPLE_CATALOG: &str = include_str!("../../samples/catalog.toml");
const SAMPLE_PROFILE: &str = include_str!("../../samples/profile.toml");
const SAMPLE_QUIZ: &str = include_str!("../../samples/quiz.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use coursemate_core::parser;

    use crate::config::CoursemateConfig;

    #[test]
    fn sample_files_parse() {
        let source = PathBuf::from("sample.toml");
        let courses = parser::parse_catalog_str(SAMPLE_CATALOG, &source).unwrap();
        assert_eq!(courses.len(), 5);
        assert!(parser::validate_catalog(&courses).is_empty());

        let profile = parser::parse_profile_str(SAMPLE_PROFILE, &source).unwrap();
        assert_eq!(profile.name, "Alex Johnson");

        let quiz = parser::parse_quiz_str(SAMPLE_QUIZ, &source).unwrap();
        assert_eq!(quiz.len(), 2);
    }

    #[test]
    fn sample_config_matches_defaults() {
        let config: CoursemateConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, CoursemateConfig::default());
    }
}
