//! Aggregate statistics over graded attempts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::AttemptRecord;

/// Aggregate statistics across a batch of attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Number of attempts graded.
    pub attempts: usize,
    /// Mean score, 0.0..=100.0.
    pub mean_score: f64,
    /// Attempts scoring 100.
    pub perfect: usize,
    /// Attempts scoring 0.
    pub zero: usize,
    /// Per-exercise statistics, keyed by exercise id.
    pub per_exercise: BTreeMap<String, ExerciseStats>,
}

/// Statistics for a single exercise across its attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStats {
    pub exercise_id: String,
    pub attempts: usize,
    pub mean_score: f64,
    pub best_score: u8,
}

/// Summarize a batch of attempt records.
pub fn summarize(records: &[AttemptRecord]) -> ScoreSummary {
    if records.is_empty() {
        return ScoreSummary::default();
    }

    let mut grouped: BTreeMap<&str, Vec<u8>> = BTreeMap::new();
    for r in records {
        grouped
            .entry(r.exercise_id.as_str())
            .or_default()
            .push(r.result.score);
    }

    let per_exercise = grouped
        .into_iter()
        .map(|(id, scores)| {
            let stats = ExerciseStats {
                exercise_id: id.to_string(),
                attempts: scores.len(),
                mean_score: mean(&scores),
                best_score: scores.iter().copied().max().unwrap_or(0),
            };
            (id.to_string(), stats)
        })
        .collect();

    let scores: Vec<u8> = records.iter().map(|r| r.result.score).collect();

    ScoreSummary {
        attempts: records.len(),
        mean_score: mean(&scores),
        perfect: scores.iter().filter(|s| **s == 100).count(),
        zero: scores.iter().filter(|s| **s == 0).count(),
        per_exercise,
    }
}

fn mean(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvaluationResult, ExerciseKind, Submission};

    fn record(exercise_id: &str, score: u8) -> AttemptRecord {
        AttemptRecord::new(
            exercise_id,
            Submission::new(),
            EvaluationResult {
                kind: ExerciseKind::Standard,
                score,
                correct_count: 0,
                total_blanks: 0,
                details: vec![],
                notices: vec![],
            },
        )
    }

    #[test]
    fn empty_batch() {
        let summary = summarize(&[]);
        assert_eq!(summary.attempts, 0);
        assert_eq!(summary.mean_score, 0.0);
        assert!(summary.per_exercise.is_empty());
    }

    #[test]
    fn mixed_batch() {
        let summary = summarize(&[
            record("a", 100),
            record("a", 50),
            record("b", 0),
            record("b", 100),
        ]);
        assert_eq!(summary.attempts, 4);
        assert!((summary.mean_score - 62.5).abs() < f64::EPSILON);
        assert_eq!(summary.perfect, 2);
        assert_eq!(summary.zero, 1);

        let a = &summary.per_exercise["a"];
        assert_eq!(a.attempts, 2);
        assert!((a.mean_score - 75.0).abs() < f64::EPSILON);
        assert_eq!(a.best_score, 100);
        assert_eq!(summary.per_exercise["b"].best_score, 100);
    }
}
