use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    domain::audio::{AudioGenerationSummary, GenerateQuizAudioRequest, QuizAudioService, QuizAudioServiceApi},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

pub struct QuizAudioController {
    quiz_audio_service: Arc<QuizAudioService>,
}

impl QuizAudioController {
    pub fn new(quiz_audio_service: Arc<QuizAudioService>) -> Self {
        Self { quiz_audio_service }
    }

    /// POST /api/quizzes/audio - Generate or reuse audio for stored quizzes
    pub async fn generate_audio(
        State(controller): State<Arc<QuizAudioController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<GenerateQuizAudioRequest>,
    ) -> AppResult<Json<AudioGenerationSummary>> {
        tracing::info!(
            actor = %auth_user.user_id,
            quiz_count = request.quiz_ids.len(),
            "Quiz audio generation requested"
        );

        let summary = controller
            .quiz_audio_service
            .generate_for_quiz_ids(auth_user.user_id, request.quiz_ids)
            .await?;
        Ok(Json(summary))
    }
}
