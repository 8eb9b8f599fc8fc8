pub mod engine;
pub mod insights;

pub use engine::{compute_results, percentage_for, QuizResults, MAX_SCORE};
pub use insights::{shows_secondary, shows_weakest, Insights, SECONDARY_THRESHOLD, WEAKEST_THRESHOLD};

use crate::quiz::{ArchetypeId, ResponseSet, QUESTIONS};

/// Score against the built-in question table and archetype set
pub fn score_responses(responses: &ResponseSet) -> QuizResults {
    compute_results(responses, &QUESTIONS, &ArchetypeId::ALL)
}
