pub mod model;

pub use model::{Quiz, QuizItem, QuizItemAttribute, QuizRow, SlotRef, LANGUAGE_CONFIG_NONE};
