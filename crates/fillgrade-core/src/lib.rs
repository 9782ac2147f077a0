//! fillgrade-core: Answer-evaluation engine for fill-in-the-blank exercises.
//!
//! This crate normalizes authored exercise content, counts blanks, resolves
//! the canonical answers, detects "arrange in order" exercises, matches a
//! learner's submission and produces per-blank feedback with a score.
//!
//! ```
//! use fillgrade_core::engine::Evaluator;
//! use fillgrade_core::model::{ExerciseContent, Submission};
//!
//! let content = ExerciseContent::sentences(
//!     ["Le ___ mange une ___ rouge."],
//!     vec!["chat".into(), "pomme".into()],
//! );
//! let result = Evaluator::default().evaluate(
//!     "Complète la phrase.",
//!     &content,
//!     &Submission::from_answers(["pomme", "chat"]),
//! );
//! assert_eq!(result.score, 100);
//! ```

pub mod answers;
pub mod blanks;
pub mod classifier;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod matcher;
pub mod model;
pub mod ordering;
pub mod parser;
pub mod report;
pub mod statistics;
