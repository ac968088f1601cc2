//! Aggregate statistics over saved quiz attempts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::QuizReport;

/// Statistics across a set of quiz attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    /// Number of attempts aggregated.
    pub attempts: usize,
    /// Mean score, 0–100.
    pub average_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
    /// Per quiz, per question id: fraction of attempts that got it right.
    pub per_question_correct_rate: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Compute statistics from graded attempts. No attempts gives all zeros.
pub fn compute_quiz_stats(reports: &[QuizReport]) -> QuizStats {
    if reports.is_empty() {
        return QuizStats::default();
    }

    let scores: Vec<f64> = reports.iter().map(|r| r.outcome.score).collect();
    let average_score = scores.iter().sum::<f64>() / scores.len() as f64;
    let best_score = scores.iter().copied().fold(f64::MIN, f64::max);
    let worst_score = scores.iter().copied().fold(f64::MAX, f64::min);

    // (quiz, question) -> (correct, seen)
    let mut tallies: BTreeMap<String, BTreeMap<String, (u32, u32)>> = BTreeMap::new();
    for report in reports {
        let quiz = tallies.entry(report.quiz_id.clone()).or_default();
        for (question_id, &correct) in report
            .question_ids
            .iter()
            .zip(report.outcome.per_question.iter())
        {
            let entry = quiz.entry(question_id.clone()).or_insert((0, 0));
            if correct {
                entry.0 += 1;
            }
            entry.1 += 1;
        }
    }

    let per_question_correct_rate = tallies
        .into_iter()
        .map(|(quiz_id, questions)| {
            let rates = questions
                .into_iter()
                .map(|(question_id, (correct, seen))| {
                    (question_id, correct as f64 / seen.max(1) as f64)
                })
                .collect();
            (quiz_id, rates)
        })
        .collect();

    QuizStats {
        attempts: reports.len(),
        average_score,
        best_score,
        worst_score,
        per_question_correct_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, Quiz};
    use crate::quiz::grade;

    fn report(answers: &[(usize, usize)]) -> QuizReport {
        let quiz = Quiz::new(
            "react",
            vec![
                Question::new("q1", "?", ["a", "b"], 0),
                Question::new("q2", "?", ["a", "b"], 1),
            ],
        );
        let answers: BTreeMap<usize, usize> = answers.iter().copied().collect();
        let outcome = grade(&quiz, &answers).unwrap();
        QuizReport::new(&quiz, answers, outcome)
    }

    #[test]
    fn no_reports_is_all_zero() {
        let stats = compute_quiz_stats(&[]);
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.average_score, 0.0);
        assert!(stats.per_question_correct_rate.is_empty());
    }

    #[test]
    fn averages_and_per_question_rates() {
        let reports = vec![report(&[(0, 0), (1, 1)]), report(&[(0, 0)]), report(&[])];
        let stats = compute_quiz_stats(&reports);

        assert_eq!(stats.attempts, 3);
        assert!((stats.average_score - 50.0).abs() < 1e-9);
        assert_eq!(stats.best_score, 100.0);
        assert_eq!(stats.worst_score, 0.0);

        let rates = &stats.per_question_correct_rate["react"];
        assert!((rates["q1"] - 2.0 / 3.0).abs() < 1e-9);
        assert!((rates["q2"] - 1.0 / 3.0).abs() < 1e-9);
    }
}
