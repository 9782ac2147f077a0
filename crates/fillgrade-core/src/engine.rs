//! Central evaluation engine.
//!
//! Runs one submission through blank extraction, answer key reconciliation,
//! classification, matching, feedback and scoring. Pure and synchronous: an
//! [`Evaluator`] holds only read-only configuration, so one instance can be
//! shared freely across threads.

use serde_json::Value;

use crate::answers::scoring_total;
use crate::blanks::BlankExtractor;
use crate::classifier::ExerciseClassifier;
use crate::config::EngineConfig;
use crate::error::ContentError;
use crate::feedback::{score, FeedbackBuilder};
use crate::matcher::{MatchStrategy, StandardMatcher};
use crate::model::{
    ContentBody, EvaluationNotice, EvaluationResult, Exercise, ExerciseContent, ExerciseKind,
    Submission,
};
use crate::ordering::OrderingMatcher;

/// The answer-evaluation engine.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    extractor: BlankExtractor,
    classifier: ExerciseClassifier,
    feedback: FeedbackBuilder,
}

impl Evaluator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            extractor: BlankExtractor::new(config.blank_marker.clone(), config.delimiters.clone()),
            classifier: ExerciseClassifier::with_extra_rules(config.classifier.extra_rules.clone()),
            feedback: FeedbackBuilder::new(config.empty_answer_label.clone()),
        }
    }

    pub fn extractor(&self) -> &BlankExtractor {
        &self.extractor
    }

    pub fn classifier(&self) -> &ExerciseClassifier {
        &self.classifier
    }

    /// Evaluate a submission against an exercise.
    pub fn evaluate_exercise(
        &self,
        exercise: &Exercise,
        submission: &Submission,
    ) -> EvaluationResult {
        self.evaluate(&exercise.description, &exercise.content, submission)
    }

    /// Evaluate against a raw content record.
    ///
    /// A record that cannot be normalized is returned as an error and nothing
    /// is scored.
    pub fn evaluate_raw(
        &self,
        description: &str,
        content: &Value,
        submission: &Submission,
    ) -> Result<EvaluationResult, ContentError> {
        let content = ExerciseContent::from_value(content)?;
        Ok(self.evaluate(description, &content, submission))
    }

    /// Evaluate a submission against normalized content.
    pub fn evaluate(
        &self,
        description: &str,
        content: &ExerciseContent,
        submission: &Submission,
    ) -> EvaluationResult {
        let key = &content.answer_key;
        let blanks = self.extractor.extract(&content.body);
        let notices = content_notices(&content.body, blanks.total, key.len());
        for notice in &notices {
            tracing::warn!("{notice}");
        }

        let total_blanks = scoring_total(blanks.total, key.len());
        let kind = self.classifier.classify(description);
        let answers = submission.answers_for(total_blanks);

        let matcher = matcher_for(kind);
        let outcome = matcher.evaluate(&answers, key);
        let details = self
            .feedback
            .build(&answers, key, &blanks.locations, &outcome);
        let correct_count = outcome.correct_count.min(total_blanks);
        let score = score(correct_count, total_blanks);

        tracing::debug!(
            matcher = matcher.name(),
            total_blanks,
            correct_count,
            score,
            "evaluated submission"
        );

        EvaluationResult {
            kind,
            score,
            correct_count,
            total_blanks,
            details,
            notices,
        }
    }
}

/// The matching strategy for an exercise kind.
pub fn matcher_for(kind: ExerciseKind) -> Box<dyn MatchStrategy> {
    match kind.direction() {
        Some(direction) => Box::new(OrderingMatcher::new(direction)),
        None => Box::new(StandardMatcher),
    }
}

fn content_notices(body: &ContentBody, blanks: usize, answers: usize) -> Vec<EvaluationNotice> {
    let mut notices = Vec::new();
    let missing = matches!(body, ContentBody::Missing);
    if missing {
        notices.push(EvaluationNotice::NoBlankSource);
    }
    if answers == 0 {
        notices.push(EvaluationNotice::AnswerKeyMissing);
    }
    // A body without markers still disagrees with a non-empty key.
    if blanks != answers && answers > 0 && !missing {
        notices.push(EvaluationNotice::CountMismatch { blanks, answers });
    }
    notices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;
    use serde_json::json;

    fn scenario_a() -> ExerciseContent {
        ExerciseContent::sentences(
            ["Le ___ mange une ___ rouge."],
            vec!["chat".into(), "pomme".into()],
        )
    }

    #[test]
    fn scenario_a_exact() {
        let result = Evaluator::default().evaluate(
            "Complète la phrase.",
            &scenario_a(),
            &Submission::from_answers(["chat", "pomme"]),
        );
        assert_eq!(result.kind, ExerciseKind::Standard);
        assert_eq!(result.score, 100);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.total_blanks, 2);
        assert!(result.notices.is_empty());
        assert_eq!(result.details[1].sentence_index, Some(0));
    }

    #[test]
    fn scenario_a_swapped() {
        let result = Evaluator::default().evaluate(
            "",
            &scenario_a(),
            &Submission::from_answers(["pomme", "chat"]),
        );
        assert_eq!(result.score, 100);
        // Reference stays positional even though the match came from elsewhere.
        assert_eq!(result.details[0].reference_answer, "chat");
        assert!(result.details[0].is_correct);
    }

    #[test]
    fn scenario_a_one_wrong() {
        let result = Evaluator::default().evaluate(
            "",
            &scenario_a(),
            &Submission::from_answers(["chat", "banane"]),
        );
        assert_eq!(result.score, 50);
        assert_eq!(result.correct_count, 1);
        assert_eq!(
            result.details[1].status_message,
            "Expected: pomme, Got: banane"
        );
    }

    #[test]
    fn scenario_b_ordering() {
        let content = ExerciseContent::text(
            "___ < ___ < ___ < ___ < ___",
            ["0.9", "0.85", "0.08", "0.8", "0.18"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        let evaluator = Evaluator::default();
        let description = "Range ces nombres dans l'ordre croissant.";

        let sorted = evaluator.evaluate(
            description,
            &content,
            &Submission::from_answers(["0.08", "0.18", "0.8", "0.85", "0.9"]),
        );
        assert_eq!(sorted.kind, ExerciseKind::ordering(Direction::Ascending));
        assert_eq!(sorted.score, 100);

        let as_authored = evaluator.evaluate(
            description,
            &content,
            &Submission::from_answers(["0.9", "0.85", "0.08", "0.8", "0.18"]),
        );
        assert_eq!(as_authored.score, 0);
    }

    #[test]
    fn ordering_half_credit_score() {
        let content = ExerciseContent::text(
            "___ ___ ___ ___ ___",
            ["5", "4", "3", "2", "1"].into_iter().map(String::from).collect(),
        );
        let result = Evaluator::default().evaluate(
            "Sort from smallest to largest",
            &content,
            &Submission::from_answers(["1", "2", "3", "4", "6"]),
        );
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.score, 40);
    }

    #[test]
    fn scenario_c_no_blank_source() {
        let result = Evaluator::default()
            .evaluate_raw("", &json!({ "title": "legacy" }), &Submission::new())
            .unwrap();
        assert_eq!(result.total_blanks, 0);
        assert_eq!(result.score, 0);
        assert!(result.details.is_empty());
        assert!(result.notices.contains(&EvaluationNotice::NoBlankSource));
        assert!(result.notices.contains(&EvaluationNotice::AnswerKeyMissing));
    }

    #[test]
    fn missing_answer_key_scores_against_blanks() {
        let content = ExerciseContent::text("___ et ___", Vec::new());
        let result = Evaluator::default().evaluate(
            "",
            &content,
            &Submission::from_answers(["a", "b"]),
        );
        assert_eq!(result.total_blanks, 2);
        assert_eq!(result.score, 0);
        assert_eq!(result.notices, vec![EvaluationNotice::AnswerKeyMissing]);
    }

    #[test]
    fn count_mismatch_uses_max() {
        let content = ExerciseContent::text("___", vec!["a".into(), "b".into()]);
        let result = Evaluator::default().evaluate(
            "",
            &content,
            &Submission::from_answers(["a", "b"]),
        );
        assert_eq!(result.total_blanks, 2);
        assert_eq!(result.score, 100);
        assert_eq!(result.details[1].sentence_index, None);
        assert_eq!(
            result.notices,
            vec![EvaluationNotice::CountMismatch {
                blanks: 1,
                answers: 2
            }]
        );
    }

    #[test]
    fn body_without_markers_reports_mismatch() {
        let content = ExerciseContent::text("pas de trou", vec!["a".into()]);
        let result = Evaluator::default().evaluate("", &content, &Submission::from_answers(["a"]));
        assert_eq!(result.total_blanks, 1);
        assert_eq!(
            result.notices,
            vec![EvaluationNotice::CountMismatch {
                blanks: 0,
                answers: 1
            }]
        );
    }

    #[test]
    fn missing_body_with_key_only_reports_missing_source() {
        let result = Evaluator::default()
            .evaluate_raw("", &json!({ "words": ["a"] }), &Submission::new())
            .unwrap();
        assert_eq!(result.notices, vec![EvaluationNotice::NoBlankSource]);
    }

    #[test]
    fn malformed_raw_content_is_error() {
        let result = Evaluator::default().evaluate_raw("", &json!(17), &Submission::new());
        assert!(matches!(result, Err(ContentError::NotAnObject(_))));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let evaluator = Evaluator::default();
        let submission = Submission::from_answers(["pomme", ""]);
        let first = evaluator.evaluate("", &scenario_a(), &submission);
        let second = evaluator.evaluate("", &scenario_a(), &submission);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn config_changes_marker_and_label() {
        let config = EngineConfig {
            blank_marker: "[?]".into(),
            empty_answer_label: "vide".into(),
            ..EngineConfig::default()
        };
        let content = ExerciseContent::text("[?] et [?]", vec!["a".into(), "b".into()]);
        let result = Evaluator::new(&config).evaluate(
            "",
            &content,
            &Submission::from_answers(["a"]),
        );
        assert_eq!(result.total_blanks, 2);
        assert_eq!(result.details[1].status_message, "Expected: b, Got: vide");
    }

    #[test]
    fn matcher_dispatch() {
        assert_eq!(matcher_for(ExerciseKind::Standard).name(), "standard");
        assert_eq!(
            matcher_for(ExerciseKind::OrderingDescending).name(),
            "ordering-descending"
        );
    }
}
