pub mod language;
pub mod model;

pub use language::{language_from_configs, resolve, LanguageCode, LanguageResolution};
pub use model::{AudioRole, Speech, SpeechKey};
