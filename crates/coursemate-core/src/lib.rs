//! coursemate-core: course recommendation engine and quiz grader.
//!
//! Both components are synchronous and hold no shared state. The engine is a
//! pure function of a learner profile and a catalog; a quiz attempt is a small
//! state machine owned by one caller.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod statistics;

pub use engine::{rank, RecommendationConfig, RecommendationEngine};
pub use error::QuizError;
pub use quiz::{grade, QuizAttempt, QuizOutcome};
