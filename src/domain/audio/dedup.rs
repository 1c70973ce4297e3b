use std::collections::HashMap;

use crate::domain::speech::{LanguageCode, Speech, SpeechKey};

/// Previously generated speech, keyed by (sentence, language).
///
/// Built from a single transactional read so every slot in one invocation
/// sees the same snapshot.
#[derive(Debug, Default)]
pub struct DeduplicationIndex {
    links: HashMap<SpeechKey, String>,
}

impl DeduplicationIndex {
    pub fn from_speeches(speeches: Vec<Speech>) -> Self {
        let mut links = HashMap::with_capacity(speeches.len());
        for speech in speeches {
            if speech.link.is_empty() {
                continue;
            }
            // Oldest row wins when the store holds more than one per key
            links.entry(speech.key()).or_insert(speech.link);
        }
        Self { links }
    }

    /// Existing link for this text and language, if one was generated before
    pub fn lookup(&self, text: &str, language: LanguageCode) -> Option<&str> {
        self.links
            .get(&SpeechKey::new(text, language.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
