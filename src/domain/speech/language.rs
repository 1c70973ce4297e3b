use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::quiz::{QuizItem, LANGUAGE_CONFIG_NONE};

static LANGUAGE_CONFIG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^FLASHCARD_LANGUAGE_CONFIG_([A-Z]+)$").unwrap());

/// ISO 639-1 language codes the audio service can synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ja")]
    Japanese,
}

impl LanguageCode {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Japanese => "ja",
        }
    }

    /// Whitelist lookup. Returns None for any language we do not generate audio for.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(LanguageCode::English),
            "ja" => Some(LanguageCode::Japanese),
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extract the language code from a slot's attribute configs.
///
/// The first `FLASHCARD_LANGUAGE_CONFIG_*` entry wins. `ENG` and `JP` map to
/// `en` and `ja`, `NONE` means no language, anything else is lowercased.
pub fn language_from_configs(configs: &[String]) -> Option<String> {
    configs.iter().find_map(|config| {
        if config == LANGUAGE_CONFIG_NONE {
            return Some(String::new());
        }
        let code = LANGUAGE_CONFIG_PATTERN.captures(config)?.get(1)?.as_str();
        Some(match code {
            "ENG" => "en".to_string(),
            "JP" => "ja".to_string(),
            other => other.to_lowercase(),
        })
    })
    .filter(|lang| !lang.is_empty())
}

/// Outcome of deciding whether a slot needs audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageResolution {
    /// No language config, the `NONE` sentinel, or no text
    Missing,
    /// A language is configured but we cannot synthesize it
    Unsupported(String),
    Eligible(LanguageCode),
}

/// Resolve the audio language of a quiz slot.
pub fn resolve(item: &QuizItem) -> LanguageResolution {
    let Some(language) = language_from_configs(&item.attribute.configs) else {
        return LanguageResolution::Missing;
    };

    if item.text.is_empty() {
        return LanguageResolution::Missing;
    }

    match LanguageCode::from_code(&language) {
        Some(code) => LanguageResolution::Eligible(code),
        None => LanguageResolution::Unsupported(language),
    }
}
