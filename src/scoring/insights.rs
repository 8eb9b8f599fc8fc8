use super::engine::QuizResults;
use crate::quiz::ArchetypeId;

/// The secondary archetype is only worth mentioning above this percentage
pub const SECONDARY_THRESHOLD: u32 = 50;

/// The weakest archetype is only flagged below this percentage
pub const WEAKEST_THRESHOLD: u32 = 30;

/// Strictly greater than the threshold
pub fn shows_secondary(percentage: u32) -> bool {
    percentage > SECONDARY_THRESHOLD
}

/// Strictly less than the threshold
pub fn shows_weakest(percentage: u32) -> bool {
    percentage < WEAKEST_THRESHOLD
}

/// Which archetypes the results dashboard should talk about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insights {
    pub primary: ArchetypeId,
    pub secondary: Option<ArchetypeId>,
    pub weakest: Option<ArchetypeId>,
}

impl Insights {
    /// Returns None only when the ranking is empty
    pub fn from_results(results: &QuizResults) -> Option<Self> {
        let primary = results.primary()?;
        let secondary = results
            .secondary()
            .filter(|id| shows_secondary(results.percentage(*id)));
        let weakest = results
            .weakest()
            .filter(|id| shows_weakest(results.percentage(*id)));

        Some(Self {
            primary,
            secondary,
            weakest,
        })
    }
}
