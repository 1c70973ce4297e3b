pub mod health;
pub mod quiz_audio;
