use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Which part of a quiz a speech clip was generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum AudioRole {
    /// The quiz question
    Term,
    /// One of the quiz options
    Definition,
}

impl AudioRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioRole::Term => "TERM",
            AudioRole::Definition => "DEFINITION",
        }
    }
}

impl std::fmt::Display for AudioRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lookup key for previously generated speech
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpeechKey {
    pub sentence: String,
    pub language: String,
}

impl SpeechKey {
    pub fn new(sentence: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Speech {
    pub speech_id: Uuid,
    pub sentence: String,
    pub language: String,
    pub link: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub role: AudioRole,
    pub quiz_id: String,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Speech {
    pub fn key(&self) -> SpeechKey {
        SpeechKey::new(self.sentence.clone(), self.language.clone())
    }
}
