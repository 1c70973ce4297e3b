pub mod audio_generation_gateway;
pub mod audio_store;
pub mod http_audio_generation_gateway;
pub mod pg_audio_store;
pub mod quiz_repository;
pub mod speech_repository;

pub use audio_generation_gateway::AudioGenerationGateway;
pub use audio_store::{AudioStore, AudioUnitOfWork};
pub use http_audio_generation_gateway::HttpAudioGenerationGateway;
pub use pg_audio_store::PgAudioStore;
pub use quiz_repository::QuizRepository;
pub use speech_repository::SpeechRepository;
