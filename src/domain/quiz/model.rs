use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

/// Config name marking a slot that has no language and never gets audio
pub const LANGUAGE_CONFIG_NONE: &str = "FLASHCARD_LANGUAGE_CONFIG_NONE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItemAttribute {
    #[serde(default)]
    pub audio_link: String,
    #[serde(default)]
    pub img_link: String,
    #[serde(default)]
    pub configs: Vec<String>,
}

/// A single unit of quiz text: the question or one of its options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub text: String,
    #[serde(default)]
    pub attribute: QuizItemAttribute,
}

impl QuizItem {
    pub fn new(text: impl Into<String>, configs: &[&str]) -> Self {
        Self {
            text: text.into(),
            attribute: QuizItemAttribute {
                configs: configs.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    pub fn with_audio_link(mut self, link: impl Into<String>) -> Self {
        self.attribute.audio_link = link.into();
        self
    }
}

/// Position of a slot inside a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRef {
    Question,
    Option(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub question: QuizItem,
    #[serde(default)]
    pub options: Vec<QuizItem>,
}

impl Quiz {
    pub fn new(id: impl Into<String>, question: QuizItem, options: Vec<QuizItem>) -> Self {
        Self {
            id: id.into(),
            question,
            options,
        }
    }

    /// Question first, then options in their original order
    pub fn slot_refs(&self) -> impl Iterator<Item = SlotRef> {
        std::iter::once(SlotRef::Question).chain((0..self.options.len()).map(SlotRef::Option))
    }

    pub fn slot(&self, slot: SlotRef) -> Option<&QuizItem> {
        match slot {
            SlotRef::Question => Some(&self.question),
            SlotRef::Option(index) => self.options.get(index),
        }
    }

    pub fn slot_mut(&mut self, slot: SlotRef) -> Option<&mut QuizItem> {
        match slot {
            SlotRef::Question => Some(&mut self.question),
            SlotRef::Option(index) => self.options.get_mut(index),
        }
    }
}

/// Row shape of the `quizzes` table
#[derive(Debug, FromRow)]
pub struct QuizRow {
    pub quiz_id: String,
    pub question: Json<QuizItem>,
    pub options: Json<Vec<QuizItem>>,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Self {
            id: row.quiz_id,
            question: row.question.0,
            options: row.options.0,
        }
    }
}
