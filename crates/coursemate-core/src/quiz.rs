//! Quiz grader.
//!
//! A [`QuizAttempt`] walks a learner through one quiz: select an answer,
//! move forward or back, and finish either by advancing past the last
//! question or by calling [`QuizAttempt::complete`]. Completion is terminal;
//! a retake needs a fresh attempt.
//!
//! Grading itself is the pure function [`grade`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Question, Quiz};

/// Check that every question can be graded.
pub fn validate_quiz(quiz: &Quiz) -> Result<(), QuizError> {
    for question in &quiz.questions {
        if question.options.len() < 2 {
            return Err(QuizError::MalformedQuiz {
                question_id: question.id.clone(),
                reason: format!("has {} option(s), need at least 2", question.options.len()),
            });
        }
        if question.correct_option_index >= question.options.len() {
            return Err(QuizError::MalformedQuiz {
                question_id: question.id.clone(),
                reason: format!(
                    "has correct option index {} but only {} options",
                    question.correct_option_index,
                    question.options.len()
                ),
            });
        }
    }
    Ok(())
}

/// Grade a set of answers against a quiz.
///
/// `answers` maps question index to selected option index. Questions without
/// an entry count as incorrect. An empty quiz scores `0`.
pub fn grade(quiz: &Quiz, answers: &BTreeMap<usize, usize>) -> Result<QuizOutcome, QuizError> {
    validate_quiz(quiz)?;
    Ok(score_answers(quiz, answers))
}

fn score_answers(quiz: &Quiz, answers: &BTreeMap<usize, usize>) -> QuizOutcome {
    let per_question: Vec<bool> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| answers.get(&i) == Some(&q.correct_option_index))
        .collect();

    let total_questions = per_question.len();
    let correct_count = per_question.iter().filter(|&&ok| ok).count();
    let score = if total_questions == 0 {
        0.0
    } else {
        100.0 * correct_count as f64 / total_questions as f64
    };

    QuizOutcome {
        score,
        correct_count,
        total_questions,
        per_question,
    }
}

/// Final result of a graded attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Percentage of questions answered correctly, 0–100.
    pub score: f64,
    pub correct_count: usize,
    pub total_questions: usize,
    /// Correctness of each question, in quiz order.
    pub per_question: Vec<bool>,
}

impl QuizOutcome {
    /// Score rounded to a whole percentage.
    pub fn rounded_score(&self) -> u32 {
        self.score.round() as u32
    }

    /// Pair each question with what the learner chose, for the results screen.
    pub fn review<'q>(
        &self,
        quiz: &'q Quiz,
        answers: &BTreeMap<usize, usize>,
    ) -> Vec<QuestionReview<'q>> {
        quiz.questions
            .iter()
            .enumerate()
            .map(|(i, question)| QuestionReview {
                index: i,
                question,
                selected: answers.get(&i).copied(),
                correct: self.per_question.get(i).copied().unwrap_or(false),
            })
            .collect()
    }
}

/// One line of an attempt review.
#[derive(Debug, Clone)]
pub struct QuestionReview<'q> {
    pub index: usize,
    pub question: &'q Question,
    /// Option the learner chose, if any.
    pub selected: Option<usize>,
    pub correct: bool,
}

impl QuestionReview<'_> {
    pub fn selected_text(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.question.options.get(i))
            .map(String::as_str)
    }

    /// `None` when the question's correct index is out of range.
    pub fn correct_text(&self) -> Option<&str> {
        self.question
            .options
            .get(self.question.correct_option_index)
            .map(String::as_str)
    }
}

/// Where an attempt currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptStatus {
    InProgress { current_question_index: usize },
    Completed(QuizOutcome),
}

/// Result of a navigation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Now showing the question at this index.
    Moved { to: usize },
    /// Nothing changed (e.g. `back` on the first question).
    NoOp,
    /// The attempt finished and was graded.
    Completed(QuizOutcome),
}

/// One learner's pass through one quiz.
///
/// Owned by a single caller; all mutation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    quiz: Quiz,
    selected_answers: BTreeMap<usize, usize>,
    status: AttemptStatus,
}

impl QuizAttempt {
    /// Start an attempt. Fails with `MalformedQuiz` if any question cannot be graded.
    pub fn start(quiz: Quiz) -> Result<Self, QuizError> {
        validate_quiz(&quiz)?;
        tracing::debug!(quiz = %quiz.id, questions = quiz.len(), "quiz attempt started");
        Ok(Self {
            quiz,
            selected_answers: BTreeMap::new(),
            status: AttemptStatus::InProgress {
                current_question_index: 0,
            },
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn status(&self) -> &AttemptStatus {
        &self.status
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, AttemptStatus::Completed(_))
    }

    /// The graded outcome, once completed.
    pub fn outcome(&self) -> Option<&QuizOutcome> {
        match &self.status {
            AttemptStatus::Completed(outcome) => Some(outcome),
            AttemptStatus::InProgress { .. } => None,
        }
    }

    /// Index of the question being shown, while in progress.
    pub fn current_question_index(&self) -> Option<usize> {
        match self.status {
            AttemptStatus::InProgress {
                current_question_index,
            } => Some(current_question_index),
            AttemptStatus::Completed(_) => None,
        }
    }

    /// The question being shown. `None` once completed or for an empty quiz.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question_index()
            .and_then(|i| self.quiz.questions.get(i))
    }

    pub fn selected_answer(&self, question_index: usize) -> Option<usize> {
        self.selected_answers.get(&question_index).copied()
    }

    pub fn selected_answers(&self) -> &BTreeMap<usize, usize> {
        &self.selected_answers
    }

    pub fn answered_count(&self) -> usize {
        self.selected_answers.len()
    }

    /// Whether the current question already has a selection.
    pub fn has_selected_answer(&self) -> bool {
        self.current_question_index()
            .is_some_and(|i| self.selected_answers.contains_key(&i))
    }

    /// Whether the next `advance` will complete the attempt.
    pub fn is_last_question(&self) -> bool {
        self.current_question_index()
            .is_some_and(|i| i + 1 >= self.quiz.len())
    }

    /// Fraction of the quiz reached, `(index + 1) / len`. `1.0` once completed.
    pub fn progress(&self) -> f64 {
        match self.status {
            AttemptStatus::Completed(_) => 1.0,
            AttemptStatus::InProgress { .. } if self.quiz.is_empty() => 0.0,
            AttemptStatus::InProgress {
                current_question_index,
            } => (current_question_index + 1) as f64 / self.quiz.len() as f64,
        }
    }

    /// Select `option` for the current question, replacing any earlier choice.
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        let index = self.in_progress_index("select an answer in")?;
        let option_count = self
            .quiz
            .questions
            .get(index)
            .map(|q| q.options.len())
            .unwrap_or(0);
        if option >= option_count {
            return Err(QuizError::InvalidOption {
                option,
                option_count,
            });
        }
        self.selected_answers.insert(index, option);
        Ok(())
    }

    /// Move to the next question, or complete the attempt from the last one.
    ///
    /// Advancing without an answer is allowed; the question is graded as
    /// incorrect.
    pub fn advance(&mut self) -> Result<Transition, QuizError> {
        let index = self.in_progress_index("advance")?;
        if index + 1 >= self.quiz.len() {
            return Ok(Transition::Completed(self.finish()));
        }
        let to = index + 1;
        self.status = AttemptStatus::InProgress {
            current_question_index: to,
        };
        Ok(Transition::Moved { to })
    }

    /// Go back one question. A no-op on the first question.
    pub fn back(&mut self) -> Result<Transition, QuizError> {
        let index = self.in_progress_index("go back in")?;
        if index == 0 {
            return Ok(Transition::NoOp);
        }
        let to = index - 1;
        self.status = AttemptStatus::InProgress {
            current_question_index: to,
        };
        Ok(Transition::Moved { to })
    }

    /// Finish now, wherever the learner is, and grade.
    pub fn complete(&mut self) -> Result<QuizOutcome, QuizError> {
        self.in_progress_index("complete")?;
        Ok(self.finish())
    }

    fn in_progress_index(&self, operation: &'static str) -> Result<usize, QuizError> {
        match self.status {
            AttemptStatus::InProgress {
                current_question_index,
            } => Ok(current_question_index),
            AttemptStatus::Completed(_) => Err(QuizError::InvalidTransition { operation }),
        }
    }

    fn finish(&mut self) -> QuizOutcome {
        let outcome = score_answers(&self.quiz, &self.selected_answers);
        tracing::debug!(
            quiz = %self.quiz.id,
            score = outcome.score,
            correct = outcome.correct_count,
            total = outcome.total_questions,
            "quiz attempt completed"
        );
        self.status = AttemptStatus::Completed(outcome.clone());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_quiz() -> Quiz {
        Quiz::new(
            "sample",
            vec![
                Question::new("q1", "What is React?", ["A library", "A database"], 0)
                    .with_explanation("React is a UI library."),
                Question::new("q2", "What is JSX?", ["A database", "A syntax extension"], 1),
            ],
        )
    }

    fn answers(pairs: &[(usize, usize)]) -> BTreeMap<usize, usize> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn all_correct_scores_100() {
        let outcome = grade(&two_question_quiz(), &answers(&[(0, 0), (1, 1)])).unwrap();
        assert_eq!(outcome.score, 100.0);
        assert_eq!(outcome.correct_count, 2);
        assert_eq!(outcome.per_question, vec![true, true]);
    }

    #[test]
    fn wrong_and_unanswered_score_zero() {
        let outcome = grade(&two_question_quiz(), &answers(&[(0, 1)])).unwrap();
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.per_question, vec![false, false]);
    }

    #[test]
    fn partial_score() {
        let quiz = Quiz::new(
            "three",
            vec![
                Question::new("a", "?", ["x", "y"], 0),
                Question::new("b", "?", ["x", "y"], 0),
                Question::new("c", "?", ["x", "y"], 0),
            ],
        );
        let outcome = grade(&quiz, &answers(&[(0, 0), (2, 1)])).unwrap();
        assert!((outcome.score - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(outcome.rounded_score(), 33);
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let outcome = grade(&Quiz::new("empty", vec![]), &BTreeMap::new()).unwrap();
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.total_questions, 0);
    }

    #[test]
    fn malformed_quiz_is_rejected() {
        let one_option = Quiz::new("bad", vec![Question::new("q", "?", ["only"], 0)]);
        assert!(matches!(
            grade(&one_option, &BTreeMap::new()),
            Err(QuizError::MalformedQuiz { .. })
        ));

        let bad_index = Quiz::new("bad", vec![Question::new("q", "?", ["a", "b"], 2)]);
        let err = QuizAttempt::start(bad_index).unwrap_err();
        assert!(matches!(err, QuizError::MalformedQuiz { ref question_id, .. } if question_id == "q"));
    }

    #[test]
    fn navigation_through_attempt() {
        let mut attempt = QuizAttempt::start(two_question_quiz()).unwrap();
        assert_eq!(attempt.current_question_index(), Some(0));
        assert!(!attempt.has_selected_answer());
        assert!((attempt.progress() - 0.5).abs() < 1e-9);

        attempt.select_answer(0).unwrap();
        assert!(attempt.has_selected_answer());
        assert_eq!(attempt.advance().unwrap(), Transition::Moved { to: 1 });
        assert!(attempt.is_last_question());

        attempt.select_answer(1).unwrap();
        match attempt.advance().unwrap() {
            Transition::Completed(outcome) => assert_eq!(outcome.score, 100.0),
            other => panic!("expected completion, got {other:?}"),
        }
        assert!(attempt.is_completed());
        assert_eq!(attempt.progress(), 1.0);
        assert_eq!(attempt.outcome().map(|o| o.score), Some(100.0));
    }

    #[test]
    fn unanswered_advance_counts_as_incorrect() {
        let mut attempt = QuizAttempt::start(two_question_quiz()).unwrap();
        attempt.select_answer(1).unwrap();
        attempt.advance().unwrap();
        let outcome = match attempt.advance().unwrap() {
            Transition::Completed(outcome) => outcome,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.per_question, vec![false, false]);
    }

    #[test]
    fn back_at_first_question_is_noop() {
        let mut attempt = QuizAttempt::start(two_question_quiz()).unwrap();
        assert_eq!(attempt.back().unwrap(), Transition::NoOp);
        assert_eq!(attempt.current_question_index(), Some(0));

        attempt.advance().unwrap();
        assert_eq!(attempt.back().unwrap(), Transition::Moved { to: 0 });
    }

    #[test]
    fn reselecting_overwrites_answer() {
        let mut attempt = QuizAttempt::start(two_question_quiz()).unwrap();
        attempt.select_answer(1).unwrap();
        attempt.select_answer(0).unwrap();
        assert_eq!(attempt.selected_answer(0), Some(0));
        assert_eq!(attempt.answered_count(), 1);
    }

    #[test]
    fn invalid_option_leaves_state_unchanged() {
        let mut attempt = QuizAttempt::start(two_question_quiz()).unwrap();
        attempt.select_answer(1).unwrap();
        let err = attempt.select_answer(2).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidOption {
                option: 2,
                option_count: 2
            }
        );
        assert_eq!(attempt.selected_answer(0), Some(1));
        assert!(!attempt.is_completed());
    }

    #[test]
    fn complete_early_grades_what_is_answered() {
        let mut attempt = QuizAttempt::start(two_question_quiz()).unwrap();
        attempt.select_answer(0).unwrap();
        let outcome = attempt.complete().unwrap();
        assert_eq!(outcome.score, 50.0);
        assert_eq!(outcome.per_question, vec![true, false]);
    }

    #[test]
    fn completed_attempt_rejects_everything() {
        let mut attempt = QuizAttempt::start(two_question_quiz()).unwrap();
        attempt.complete().unwrap();

        assert_eq!(
            attempt.select_answer(0),
            Err(QuizError::InvalidTransition {
                operation: "select an answer in"
            })
        );
        assert!(matches!(
            attempt.advance(),
            Err(QuizError::InvalidTransition { .. })
        ));
        assert!(matches!(attempt.back(), Err(QuizError::InvalidTransition { .. })));
        assert!(matches!(
            attempt.complete(),
            Err(QuizError::InvalidTransition { .. })
        ));
        assert_eq!(attempt.current_question_index(), None);
    }

    #[test]
    fn empty_quiz_attempt() {
        let mut attempt = QuizAttempt::start(Quiz::new("empty", vec![])).unwrap();
        assert!(attempt.current_question().is_none());
        assert_eq!(attempt.progress(), 0.0);
        assert!(matches!(
            attempt.select_answer(0),
            Err(QuizError::InvalidOption {
                option_count: 0,
                ..
            })
        ));
        match attempt.advance().unwrap() {
            Transition::Completed(outcome) => assert_eq!(outcome.score, 0.0),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn review_pairs_answers_with_questions() {
        let quiz = two_question_quiz();
        let selected = answers(&[(0, 0)]);
        let outcome = grade(&quiz, &selected).unwrap();
        let review = outcome.review(&quiz, &selected);

        assert_eq!(review.len(), 2);
        assert!(review[0].correct);
        assert_eq!(review[0].selected_text(), Some("A library"));
        assert_eq!(review[0].question.explanation, "React is a UI library.");
        assert!(!review[1].correct);
        assert_eq!(review[1].selected_text(), None);
        assert_eq!(review[1].correct_text(), Some("A syntax extension"));
    }

    #[test]
    fn review_of_malformed_quiz_does_not_panic() {
        let outcome = grade(&two_question_quiz(), &answers(&[(0, 0)])).unwrap();
        let broken = Quiz::new("broken", vec![Question::new("q1", "?", ["a", "b"], 5)]);

        let review = outcome.review(&broken, &answers(&[(0, 0)]));
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].selected_text(), Some("a"));
        assert_eq!(review[0].correct_text(), None);
    }
}
