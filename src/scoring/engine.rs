use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::quiz::{ArchetypeId, Question, ResponseSet};

/// Highest score one archetype can reach: 6 questions x 5 points.
///
/// Fixed rather than derived from the question table.
pub const MAX_SCORE: u32 = 30;

/// Scores, percentages and ranking for one completed (or partial) response set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResults {
    pub scores: BTreeMap<ArchetypeId, u32>,
    pub percentages: BTreeMap<ArchetypeId, u32>,
    /// Archetypes by descending percentage; ties keep reference table order
    pub ranking: Vec<ArchetypeId>,
}

impl QuizResults {
    pub fn score(&self, id: ArchetypeId) -> u32 {
        self.scores.get(&id).copied().unwrap_or(0)
    }

    pub fn percentage(&self, id: ArchetypeId) -> u32 {
        self.percentages.get(&id).copied().unwrap_or(0)
    }

    pub fn primary(&self) -> Option<ArchetypeId> {
        self.ranking.first().copied()
    }

    pub fn secondary(&self) -> Option<ArchetypeId> {
        self.ranking.get(1).copied()
    }

    pub fn weakest(&self) -> Option<ArchetypeId> {
        self.ranking.last().copied()
    }
}

/// `round(score / MAX_SCORE * 100)`, rounding halves up
pub fn percentage_for(score: u32) -> u32 {
    ((score as f64 / MAX_SCORE as f64) * 100.0).round() as u32
}

/// Sum responses per archetype, convert to percentages and rank.
///
/// Total over its input: answers to ids missing from `questions` are skipped,
/// as are questions whose archetype is not in `archetypes`. Every archetype in
/// `archetypes` appears in the output even with no answers.
pub fn compute_results(
    responses: &ResponseSet,
    questions: &[Question],
    archetypes: &[ArchetypeId],
) -> QuizResults {
    let mut scores: BTreeMap<ArchetypeId, u32> = archetypes.iter().map(|id| (*id, 0)).collect();

    for (question_id, value) in responses.iter() {
        let Some(question) = questions.iter().find(|q| q.id == question_id) else {
            continue;
        };
        if let Some(score) = scores.get_mut(&question.archetype) {
            *score += value.value() as u32;
        }
    }

    let percentages: BTreeMap<ArchetypeId, u32> = scores
        .iter()
        .map(|(id, score)| (*id, percentage_for(*score)))
        .collect();

    // sort_by is stable, so equal percentages keep the order of `archetypes`
    let mut ranking: Vec<ArchetypeId> = archetypes.to_vec();
    ranking.sort_by(|a, b| percentages[b].cmp(&percentages[a]));

    QuizResults {
        scores,
        percentages,
        ranking,
    }
}
