//! TOML catalog, profile, and quiz parser.
//!
//! Loads input files from disk and validates them. Non-fatal problems come
//! back as [`ValidationWarning`]s; only quizzes that cannot be graded are
//! hard errors.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    Course, Difficulty, LearnerProfile, LearningStyle, Question, Quiz, QuizDifficulty,
};
use crate::quiz::validate_quiz;

/// Intermediate TOML structure for catalog files. A `courses` array is
/// required, so profiles, quizzes, and `[[course]]` typos are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlCatalogFile {
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlCourse {
    id: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    base_score: Option<f64>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    instructor: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    enrolled_students: u32,
}

#[derive(Debug, Deserialize)]
struct TomlProfileFile {
    learner: TomlLearner,
}

#[derive(Debug, Deserialize)]
struct TomlLearner {
    #[serde(default)]
    name: String,
    preferred_difficulty: String,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    completed_course_ids: Vec<String>,
    #[serde(default)]
    learning_style: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    time_limit_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    prompt: String,
    options: Vec<String>,
    correct_option_index: usize,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    difficulty: Option<String>,
}

fn parse_quiz_difficulty(s: Option<String>) -> Result<Option<QuizDifficulty>> {
    s.map(|d| d.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
        .transpose()
}

/// Parse a single catalog TOML file.
pub fn parse_catalog(path: &Path) -> Result<Vec<Course>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse catalog TOML from a string (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Vec<Course>> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let courses = parsed
        .courses
        .into_iter()
        .map(|c| {
            let difficulty = c.difficulty.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "course '{}' has unknown difficulty '{}', it will never match a preference",
                    c.id,
                    c.difficulty
                );
                Difficulty::Unknown
            });

            Course {
                id: c.id,
                difficulty,
                tags: c.tags,
                base_score: c.base_score.unwrap_or(0.0),
                title: c.title,
                description: c.description,
                instructor: c.instructor,
                duration: c.duration,
                category: c.category,
                rating: c.rating,
                enrolled_students: c.enrolled_students,
            }
        })
        .collect();

    Ok(courses)
}

/// Recursively load every `.toml` catalog file under `dir`, in file name order.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Course>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut courses = Vec::new();
    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            courses.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(found) => courses.extend(found),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(courses)
}

/// Load a catalog from a file or a directory of files.
pub fn load_catalog(path: &Path) -> Result<Vec<Course>> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

/// Parse a learner profile TOML file.
pub fn parse_profile(path: &Path) -> Result<LearnerProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile file: {}", path.display()))?;

    parse_profile_str(&content, path)
}

/// Parse a learner profile from a string.
pub fn parse_profile_str(content: &str, source_path: &Path) -> Result<LearnerProfile> {
    let parsed: TomlProfileFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    let learner = parsed.learner;

    let preferred_difficulty: Difficulty = learner
        .preferred_difficulty
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let learning_style: Option<LearningStyle> = learner
        .learning_style
        .map(|s| s.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
        .transpose()?;

    Ok(LearnerProfile {
        name: learner.name,
        preferred_difficulty,
        topics: learner.topics,
        completed_course_ids: learner.completed_course_ids.into_iter().collect(),
        learning_style,
    })
}

/// Parse a quiz TOML file. Fails if any question cannot be graded.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a quiz from a string. Fails if any question cannot be graded.
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            Ok(Question {
                id: q.id,
                prompt: q.prompt,
                options: q.options,
                correct_option_index: q.correct_option_index,
                explanation: q.explanation,
                difficulty: parse_quiz_difficulty(q.difficulty)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let quiz = Quiz {
        id: parsed.quiz.id,
        title: parsed.quiz.title,
        difficulty: parse_quiz_difficulty(parsed.quiz.difficulty)?,
        time_limit_secs: parsed.quiz.time_limit_secs,
        questions,
    };

    validate_quiz(&quiz).with_context(|| format!("invalid quiz: {}", source_path.display()))?;

    Ok(quiz)
}

/// A warning from catalog, profile, or quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The course or question ID (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn about(subject: &str, message: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a catalog for common data problems.
pub fn validate_catalog(courses: &[Course]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for course in courses {
        if course.id.trim().is_empty() {
            warnings.push(ValidationWarning {
                subject: None,
                message: "course with empty id".into(),
            });
        }
        if !seen_ids.insert(&course.id) {
            warnings.push(ValidationWarning::about(
                &course.id,
                format!("duplicate course ID: {}", course.id),
            ));
        }
    }

    for course in courses {
        if !(0.0..=1.0).contains(&course.base_score) {
            warnings.push(ValidationWarning::about(
                &course.id,
                format!("base_score {} is outside [0, 1]", course.base_score),
            ));
        }
        if course.difficulty == Difficulty::Unknown {
            warnings.push(ValidationWarning::about(
                &course.id,
                "difficulty is not beginner, intermediate, or advanced",
            ));
        }
        // An empty tag is a substring of every topic.
        if course.tags.iter().any(|t| t.trim().is_empty()) {
            warnings.push(ValidationWarning::about(
                &course.id,
                "blank tag matches every learner topic",
            ));
        }
    }

    warnings
}

/// Validate a learner profile, and its completed ids against `courses` when given.
pub fn validate_profile(
    profile: &LearnerProfile,
    courses: Option<&[Course]>,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if profile.topics.iter().any(|t| t.trim().is_empty()) {
        warnings.push(ValidationWarning {
            subject: None,
            message: "blank topic matches every course tag".into(),
        });
    }

    let Some(courses) = courses else {
        return warnings;
    };
    let known: HashSet<&str> = courses.iter().map(|c| c.id.as_str()).collect();
    for id in &profile.completed_course_ids {
        if !known.contains(id.as_str()) {
            warnings.push(ValidationWarning::about(
                id,
                "completed course is not in the catalog",
            ));
        }
    }

    warnings
}

/// Validate a quiz for problems that do not prevent grading.
pub fn validate_quiz_content(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning::about(
            &quiz.id,
            "quiz has no questions and will always score 0",
        ));
    }

    let mut seen_ids = HashSet::new();
    for question in &quiz.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning::about(
                &question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        }
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::about(&question.id, "prompt is empty"));
        }
        if question.explanation.trim().is_empty() {
            warnings.push(ValidationWarning::about(&question.id, "no explanation given"));
        }
    }

    warnings
}
