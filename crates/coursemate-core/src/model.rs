//! Core data model types for coursemate.
//!
//! Learner profiles, catalog courses, and quizzes. The core never mutates any
//! of these; callers own them and pass fresh snapshots into each call.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Course difficulty level.
///
/// Deserializes through [`FromStr`], so matching is case-insensitive. A value
/// outside the three known levels becomes `Unknown`, which never matches a
/// learner's preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Unknown,
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(Difficulty::Unknown))
    }
}

impl Difficulty {
    /// Whether a course at this level satisfies a learner preferring `preferred`.
    pub fn matches(self, preferred: Difficulty) -> bool {
        self != Difficulty::Unknown && self == preferred
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
            Difficulty::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// How a learner prefers to take in material. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningStyle::Visual => write!(f, "visual"),
            LearningStyle::Auditory => write!(f, "auditory"),
            LearningStyle::Kinesthetic => write!(f, "kinesthetic"),
            LearningStyle::Reading => write!(f, "reading"),
        }
    }
}

impl FromStr for LearningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visual" => Ok(LearningStyle::Visual),
            "auditory" => Ok(LearningStyle::Auditory),
            "kinesthetic" => Ok(LearningStyle::Kinesthetic),
            "reading" => Ok(LearningStyle::Reading),
            other => Err(format!("unknown learning style: {other}")),
        }
    }
}

/// A learner's stated preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Difficulty the learner wants to study at.
    pub preferred_difficulty: Difficulty,
    /// Free-text interests, matched case-insensitively against course tags.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Courses already finished; never recommended.
    #[serde(default)]
    pub completed_course_ids: BTreeSet<String>,
    #[serde(default)]
    pub learning_style: Option<LearningStyle>,
}

impl LearnerProfile {
    pub fn new(preferred_difficulty: Difficulty) -> Self {
        Self {
            name: String::new(),
            preferred_difficulty,
            topics: Vec::new(),
            completed_course_ids: BTreeSet::new(),
            learning_style: None,
        }
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_completed<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completed_course_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_completed(&self, course_id: &str) -> bool {
        self.completed_course_ids.contains(course_id)
    }
}

/// A catalog course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier within one catalog snapshot.
    pub id: String,
    pub difficulty: Difficulty,
    /// Free-text tags, in catalog order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Precomputed affinity prior in `[0, 1]`. Missing means `0`.
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub category: String,
    /// Average learner rating, 0–5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub enrolled_students: u32,
}

impl Course {
    /// A course with only the fields the recommendation engine reads.
    pub fn new(id: impl Into<String>, difficulty: Difficulty, base_score: f64) -> Self {
        Self {
            id: id.into(),
            difficulty,
            tags: Vec::new(),
            base_score,
            title: String::new(),
            description: String::new(),
            instructor: String::new(),
            duration: String::new(),
            category: String::new(),
            rating: 0.0,
            enrolled_students: 0,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Title if present, otherwise the id.
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// How a course's final score was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// The affinity prior as used (non-finite priors become `0`).
    pub base: f64,
    /// Bonus for matching the learner's preferred difficulty.
    pub difficulty_bonus: f64,
    /// Bonus for any tag/topic overlap.
    pub topic_bonus: f64,
    /// Course tags that matched at least one learner topic.
    #[serde(default)]
    pub matched_tags: Vec<String>,
}

impl ScoreBreakdown {
    /// Sum of all components before clamping.
    pub fn raw_total(&self) -> f64 {
        self.base + self.difficulty_bonus + self.topic_bonus
    }
}

/// A course together with its computed recommendation score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCourse {
    pub course: Course,
    /// Final score, clamped to `[0, 1]`.
    pub final_score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCourse {
    /// Human-readable reasons for the recommendation, derived from the breakdown.
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if self.breakdown.difficulty_bonus > 0.0 {
            reasons.push(format!(
                "matches your {} skill level",
                self.course.difficulty
            ));
        }
        if !self.breakdown.matched_tags.is_empty() {
            reasons.push(format!(
                "covers your interests: {}",
                self.breakdown.matched_tags.join(", ")
            ));
        }
        if reasons.is_empty() {
            reasons.push(format!(
                "{:.0}% base affinity",
                self.breakdown.base.clamp(0.0, 1.0) * 100.0
            ));
        }
        reasons
    }

    /// Score as a whole percentage, for display.
    pub fn match_percent(&self) -> u32 {
        (self.final_score * 100.0).round() as u32
    }
}

/// Quiz difficulty label. Descriptive only; grading ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for QuizDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizDifficulty::Easy => write!(f, "easy"),
            QuizDifficulty::Medium => write!(f, "medium"),
            QuizDifficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for QuizDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(QuizDifficulty::Easy),
            "medium" => Ok(QuizDifficulty::Medium),
            "hard" => Ok(QuizDifficulty::Hard),
            other => Err(format!("unknown quiz difficulty: {other}")),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    /// Answer options, at least two.
    pub options: Vec<String>,
    /// 0-based index into `options`.
    pub correct_option_index: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub difficulty: Option<QuizDifficulty>,
}

impl Question {
    pub fn new<I, S>(id: impl Into<String>, prompt: impl Into<String>, options: I, correct: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_option_index: correct,
            explanation: String::new(),
            difficulty: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// An ordered set of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub difficulty: Option<QuizDifficulty>,
    /// Suggested time limit. The grader does not enforce it.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            difficulty: None,
            time_limit_secs: None,
            questions,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Beginner.to_string(), "beginner");
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert_eq!(
            " intermediate ".parse::<Difficulty>().unwrap(),
            Difficulty::Intermediate
        );
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn unknown_difficulty_deserializes_and_never_matches() {
        let course: Course =
            serde_json::from_str(r#"{"id":"x","difficulty":"expert"}"#).unwrap();
        assert_eq!(course.difficulty, Difficulty::Unknown);
        assert!(!course.difficulty.matches(Difficulty::Beginner));
        assert!(!Difficulty::Unknown.matches(Difficulty::Unknown));
        assert!(Difficulty::Beginner.matches(Difficulty::Beginner));
    }

    #[test]
    fn difficulty_deserialization_ignores_case() {
        for raw in [r#""Beginner""#, r#""BEGINNER""#, r#"" beginner ""#] {
            let parsed: Difficulty = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, Difficulty::Beginner, "input {raw}");
        }
        let parsed: Difficulty = serde_json::from_str(r#""Advanced""#).unwrap();
        assert_eq!(parsed, "Advanced".parse().unwrap());

        // Serialized form reads back unchanged.
        let json = serde_json::to_string(&Difficulty::Intermediate).unwrap();
        assert_eq!(json, r#""intermediate""#);
        assert_eq!(
            serde_json::from_str::<Difficulty>(&json).unwrap(),
            Difficulty::Intermediate
        );
    }

    #[test]
    fn missing_base_score_defaults_to_zero() {
        let course: Course =
            serde_json::from_str(r#"{"id":"x","difficulty":"beginner"}"#).unwrap();
        assert_eq!(course.base_score, 0.0);
        assert!(course.tags.is_empty());
        assert_eq!(course.display_name(), "x");
    }

    #[test]
    fn reasons_fall_back_to_base_affinity() {
        let scored = ScoredCourse {
            course: Course::new("a", Difficulty::Advanced, 0.42),
            final_score: 0.42,
            breakdown: ScoreBreakdown {
                base: 0.42,
                difficulty_bonus: 0.0,
                topic_bonus: 0.0,
                matched_tags: vec![],
            },
        };
        assert_eq!(scored.reasons(), vec!["42% base affinity".to_string()]);
        assert_eq!(scored.match_percent(), 42);
    }

    #[test]
    fn reasons_mention_level_and_tags() {
        let scored = ScoredCourse {
            course: Course::new("a", Difficulty::Beginner, 0.5),
            final_score: 0.75,
            breakdown: ScoreBreakdown {
                base: 0.5,
                difficulty_bonus: 0.1,
                topic_bonus: 0.15,
                matched_tags: vec!["python".into()],
            },
        };
        let reasons = scored.reasons();
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].contains("beginner"));
        assert!(reasons[1].contains("python"));
    }
}
