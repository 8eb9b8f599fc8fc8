use super::questions::{Question, QUESTIONS, QUESTION_COUNT};
use super::types::{Likert, ResponseSet};

/// Outcome of answering the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved on to the next question
    Advanced,
    /// The last question was answered
    Completed,
}

/// Walks the user through the fixed question table, one question at a time.
///
/// Holds no I/O; the caller persists `current_index()` and `responses()`
/// after every change.
#[derive(Debug, Clone, Default)]
pub struct QuizFlow {
    current: usize,
    responses: ResponseSet,
}

impl QuizFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from saved progress. Out-of-range indices are clamped.
    pub fn resume(current: usize, responses: ResponseSet) -> Self {
        Self {
            current: current.min(QUESTION_COUNT - 1),
            responses,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &'static Question {
        &QUESTIONS[self.current]
    }

    /// The answer already given to the current question, if any
    pub fn selected(&self) -> Option<Likert> {
        self.responses.get(self.current_question().id)
    }

    pub fn answer(&mut self, value: Likert) -> Step {
        let id = self.current_question().id;
        self.responses.insert(id, value);

        if self.current + 1 < QUESTION_COUNT {
            self.current += 1;
            Step::Advanced
        } else {
            Step::Completed
        }
    }

    /// Step back one question. Returns false when already on the first.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    /// Number of questions from the table that have an answer
    pub fn answered_count(&self) -> usize {
        QUESTIONS
            .iter()
            .filter(|q| self.responses.get(q.id).is_some())
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == QUESTION_COUNT
    }

    /// Position through the quiz, counting the current question as reached
    pub fn progress_percent(&self) -> u32 {
        (((self.current + 1) as f64 / QUESTION_COUNT as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn likert(v: u8) -> Likert {
        Likert::new(v).unwrap()
    }

    #[test]
    fn test_new_flow_starts_at_first_question() {
        let flow = QuizFlow::new();
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.current_question().id, 1);
        assert!(flow.selected().is_none());
        assert_eq!(flow.answered_count(), 0);
    }

    #[test]
    fn test_answer_advances_and_records() {
        let mut flow = QuizFlow::new();
        assert_eq!(flow.answer(likert(4)), Step::Advanced);
        assert_eq!(flow.current_index(), 1);
        assert_eq!(flow.responses().get(1), Some(likert(4)));
    }

    #[test]
    fn test_previous_shows_existing_answer() {
        let mut flow = QuizFlow::new();
        flow.answer(likert(2));
        assert!(flow.previous());
        assert_eq!(flow.selected(), Some(likert(2)));
        assert!(!flow.previous());
    }

    #[test]
    fn test_changing_answer_replaces_it() {
        let mut flow = QuizFlow::new();
        flow.answer(likert(2));
        flow.previous();
        flow.answer(likert(5));
        assert_eq!(flow.responses().get(1), Some(likert(5)));
        assert_eq!(flow.answered_count(), 1);
    }

    #[test]
    fn test_full_run_completes_on_last_question() {
        let mut flow = QuizFlow::new();
        for _ in 0..QUESTION_COUNT - 1 {
            assert_eq!(flow.answer(likert(3)), Step::Advanced);
        }
        assert!(!flow.is_complete());
        assert_eq!(flow.answer(likert(3)), Step::Completed);
        assert!(flow.is_complete());
        assert_eq!(flow.current_index(), QUESTION_COUNT - 1);
        assert_eq!(flow.progress_percent(), 100);
    }

    #[test]
    fn test_resume_clamps_index() {
        let flow = QuizFlow::resume(500, ResponseSet::new());
        assert_eq!(flow.current_index(), QUESTION_COUNT - 1);
    }

    #[test]
    fn test_unknown_ids_do_not_count_as_answered() {
        let responses: ResponseSet = [(1, likert(3)), (99, likert(5))].into_iter().collect();
        let flow = QuizFlow::resume(1, responses);
        assert_eq!(flow.answered_count(), 1);
    }
}
