use serde::{Deserialize, Serialize};

use crate::domain::speech::{AudioRole, LanguageCode};

/// One slot that needs a freshly generated clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequestItem {
    pub text: String,
    pub language: LanguageCode,
    pub quiz_id: String,
    #[serde(rename = "type")]
    pub role: AudioRole,
}

/// One clip returned by the audio generation service.
///
/// Results are not keyed by request position; they are matched back by
/// quiz id, role and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResultItem {
    pub text: String,
    pub link: String,
    #[serde(default)]
    pub language: String,
    #[serde(rename = "type")]
    pub role: AudioRole,
    pub quiz_id: String,
}

/// Counters describing one pipeline invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioGenerationSummary {
    pub quizzes: usize,
    /// Slots that reused an existing speech link
    pub reused: usize,
    /// Slots sent to the audio generation service
    pub requested: usize,
    /// Requested slots that received a generated link
    pub generated: usize,
    /// Slots left without audio because of a missing or unsupported language
    pub cleared: usize,
}

/// Request for POST /api/quizzes/audio
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateQuizAudioRequest {
    pub quiz_ids: Vec<String>,
}
