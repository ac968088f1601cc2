//! Course recommendation engine.
//!
//! Scores every catalog course against a learner's preferences, drops the
//! courses the learner has already completed, and returns the top-K by score.
//! Ranking is pure: inputs are only borrowed, and two calls with the same
//! inputs produce the same output.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::model::{Course, LearnerProfile, ScoreBreakdown, ScoredCourse};

/// Bonus for a course at the learner's preferred difficulty.
pub const DIFFICULTY_BONUS: f64 = 0.10;

/// Bonus applied once when any course tag overlaps any learner topic.
pub const TOPIC_BONUS: f64 = 0.15;

/// Configuration for the recommendation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationConfig {
    /// Added when the course difficulty matches the learner's preference.
    pub difficulty_bonus: f64,
    /// Added once when any tag and topic overlap.
    pub topic_bonus: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            difficulty_bonus: DIFFICULTY_BONUS,
            topic_bonus: TOPIC_BONUS,
        }
    }
}

/// The recommendation engine. Holds configuration only; no per-call state.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationConfig {
    /// Reject bonuses that are negative or not finite.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.difficulty_bonus.is_finite() && self.difficulty_bonus >= 0.0,
            "difficulty_bonus must be a non-negative number, got {}",
            self.difficulty_bonus
        );
        anyhow::ensure!(
            self.topic_bonus.is_finite() && self.topic_bonus >= 0.0,
            "topic_bonus must be a non-negative number, got {}",
            self.topic_bonus
        );
        Ok(())
    }
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Rank `catalog` for `profile` and keep the best `top_k`.
    pub fn rank(
        &self,
        profile: &LearnerProfile,
        catalog: &[Course],
        top_k: usize,
    ) -> Vec<ScoredCourse> {
        self.rank_excluding(profile, catalog, &BTreeSet::new(), top_k)
    }

    /// Like [`rank`](Self::rank), also skipping any course whose id is in `excluded`.
    pub fn rank_excluding(
        &self,
        profile: &LearnerProfile,
        catalog: &[Course],
        excluded: &BTreeSet<String>,
        top_k: usize,
    ) -> Vec<ScoredCourse> {
        if top_k == 0 {
            return Vec::new();
        }

        let topics: Vec<String> = profile.topics.iter().map(|t| t.to_lowercase()).collect();

        let mut scored: Vec<ScoredCourse> = catalog
            .iter()
            .filter(|c| !profile.has_completed(&c.id) && !excluded.contains(&c.id))
            .map(|c| self.score(profile, &topics, c))
            .collect();

        // `sort_by` is stable: equal scores keep catalog order. `score` never
        // returns NaN.
        scored.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_k);

        tracing::debug!(
            catalog = catalog.len(),
            returned = scored.len(),
            top_k,
            "ranked catalog"
        );

        scored
    }

    /// Score a single course. `topics` are the learner's topics, lowercased.
    fn score(&self, profile: &LearnerProfile, topics: &[String], course: &Course) -> ScoredCourse {
        let base = if course.base_score.is_nan() {
            0.0
        } else {
            course.base_score
        };

        let difficulty_bonus = if course.difficulty.matches(profile.preferred_difficulty) {
            self.config.difficulty_bonus
        } else {
            0.0
        };

        let matched_tags = matching_tags(&course.tags, topics);
        let topic_bonus = if matched_tags.is_empty() {
            0.0
        } else {
            self.config.topic_bonus
        };

        let breakdown = ScoreBreakdown {
            base,
            difficulty_bonus,
            topic_bonus,
            matched_tags,
        };

        // `clamp` passes NaN through, e.g. from a NaN bonus.
        let raw = breakdown.raw_total();
        let final_score = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };

        ScoredCourse {
            course: course.clone(),
            final_score,
            breakdown,
        }
    }
}

/// Rank `catalog` for `profile` with the default bonuses.
pub fn rank(profile: &LearnerProfile, catalog: &[Course], top_k: usize) -> Vec<ScoredCourse> {
    RecommendationEngine::default().rank(profile, catalog, top_k)
}

/// Tags that contain, or are contained by, any of the lowercased `topics`.
fn matching_tags(tags: &[String], topics: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| {
            let tag = tag.to_lowercase();
            topics
                .iter()
                .any(|topic| tag.contains(topic.as_str()) || topic.contains(tag.as_str()))
        })
        .cloned()
        .collect()
}
