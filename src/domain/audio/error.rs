use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum QuizAudioError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("audio generation failed: {0}")]
    Gateway(String),
    #[error("audio generation timed out: {0}")]
    Timeout(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("quiz not found: {0}")]
    NotFound(String),
}

impl From<QuizAudioError> for AppError {
    fn from(err: QuizAudioError) -> Self {
        match err {
            QuizAudioError::Invalid(msg) => AppError::BadRequest(msg),
            QuizAudioError::NotFound(id) => AppError::NotFound(format!("Quiz {} not found", id)),
            QuizAudioError::Gateway(msg) => AppError::ExternalService(msg),
            QuizAudioError::Timeout(msg) => AppError::GatewayTimeout(msg),
            QuizAudioError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
