//! Recommendation and quiz report types with JSON persistence.
//!
//! The core never saves anything on its own; these are for callers that want
//! to keep a result around.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{LearnerProfile, Quiz, ScoredCourse};
use crate::quiz::QuizOutcome;

/// A ranked recommendation list for one learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Learner display name.
    pub learner: String,
    /// How many results were requested.
    pub top_k: usize,
    /// Ranked courses, best first.
    pub recommendations: Vec<ScoredCourse>,
}

impl RecommendationReport {
    pub fn new(profile: &LearnerProfile, top_k: usize, recommendations: Vec<ScoredCourse>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            learner: profile.name.clone(),
            top_k,
            recommendations,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

/// A graded quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the attempt was graded.
    pub created_at: DateTime<Utc>,
    pub quiz_id: String,
    /// Question ids in quiz order, so per-question results can be matched up
    /// across reports.
    pub question_ids: Vec<String>,
    /// Selected option per answered question index.
    pub answers: BTreeMap<usize, usize>,
    pub outcome: QuizOutcome,
}

impl QuizReport {
    pub fn new(quiz: &Quiz, answers: BTreeMap<usize, usize>, outcome: QuizOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz_id: quiz.id.clone(),
            question_ids: quiz.questions.iter().map(|q| q.id.clone()).collect(),
            answers,
            outcome,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

/// Load a single quiz report, or every `.json` report directly inside a
/// directory. Unreadable files in a directory are skipped with a warning.
pub fn load_quiz_reports(dir: &Path) -> Result<Vec<QuizReport>> {
    if !dir.is_dir() {
        return Ok(vec![QuizReport::load_json(dir)?]);
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut reports = Vec::new();
    for path in paths {
        match QuizReport::load_json(&path) {
            Ok(report) => reports.push(report),
            Err(e) => tracing::warn!("skipping {}: {:#}", path.display(), e),
        }
    }
    Ok(reports)
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse report JSON: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rank;
    use crate::model::{Course, Difficulty, Question};
    use crate::quiz::grade;

    fn sample_quiz() -> Quiz {
        Quiz::new(
            "q",
            vec![
                Question::new("q1", "?", ["a", "b"], 0),
                Question::new("q2", "?", ["a", "b"], 1),
            ],
        )
    }

    #[test]
    fn recommendation_json_roundtrip() {
        let profile = LearnerProfile::new(Difficulty::Beginner).with_topics(["rust"]);
        let catalog = vec![Course::new("a", Difficulty::Beginner, 0.5).with_tags(["rust"])];
        let report = RecommendationReport::new(&profile, 3, rank(&profile, &catalog, 3));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("recs.json");
        report.save_json(&path).unwrap();
        let loaded = RecommendationReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.recommendations.len(), 1);
        assert_eq!(loaded.recommendations[0].course.id, "a");
        assert_eq!(loaded.recommendations[0].breakdown.matched_tags, vec!["rust"]);
    }

    #[test]
    fn quiz_reports_load_from_directory() {
        let quiz = sample_quiz();
        let answers: BTreeMap<usize, usize> = [(0, 0)].into_iter().collect();
        let outcome = grade(&quiz, &answers).unwrap();

        let dir = tempfile::tempdir().unwrap();
        QuizReport::new(&quiz, answers.clone(), outcome.clone())
            .save_json(&dir.path().join("a.json"))
            .unwrap();
        QuizReport::new(&quiz, answers, outcome)
            .save_json(&dir.path().join("b.json"))
            .unwrap();
        std::fs::write(dir.path().join("junk.json"), "{ not json").unwrap();

        let reports = load_quiz_reports(dir.path()).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].question_ids, vec!["q1", "q2"]);
        assert_eq!(reports[0].outcome.score, 50.0);
    }

    #[test]
    fn load_missing_report_fails() {
        assert!(QuizReport::load_json(Path::new("no_such_report.json")).is_err());
    }
}
