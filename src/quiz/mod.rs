pub mod archetypes;
pub mod flow;
pub mod questions;
pub mod types;

pub use archetypes::{archetype, Archetype, ArchetypeId, ARCHETYPES};
pub use flow::{QuizFlow, Step};
pub use questions::{find_question, Question, QUESTIONS, QUESTION_COUNT};
pub use types::{Language, Likert, ResponseSet};
