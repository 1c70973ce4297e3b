use anyhow::Result;
use chrono::Utc;
use quiz_audio_service::domain::quiz::{Quiz, QuizItem, QuizRow};
use quiz_audio_service::domain::speech::Speech;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

pub const ENG: &str = "FLASHCARD_LANGUAGE_CONFIG_ENG";
pub const JP: &str = "FLASHCARD_LANGUAGE_CONFIG_JP";
pub const FR: &str = "FLASHCARD_LANGUAGE_CONFIG_FR";

pub struct TestFixtures {
    pool: PgPool,
}

impl TestFixtures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_quiz(
        &self,
        quiz_id: &str,
        question: QuizItem,
        options: Vec<QuizItem>,
    ) -> Result<Quiz> {
        let quiz = Quiz::new(quiz_id, question, options);

        sqlx::query(
            r#"
            INSERT INTO quizzes (quiz_id, question, options, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            "#,
        )
        .bind(&quiz.id)
        .bind(Json(&quiz.question))
        .bind(Json(&quiz.options))
        .execute(&self.pool)
        .await?;

        Ok(quiz)
    }

    pub async fn get_quiz(&self, quiz_id: &str) -> Result<Quiz> {
        let row = sqlx::query_as::<_, QuizRow>(
            "SELECT quiz_id, question, options FROM quizzes WHERE quiz_id = $1",
        )
        .bind(quiz_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Quiz::from(row))
    }

    pub async fn create_speech(&self, sentence: &str, language: &str, link: &str) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO speeches (
                speech_id, sentence, language, link, type, quiz_id,
                created_by, updated_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, 'TERM', 'seed', $5, $5, $6, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sentence)
        .bind(language)
        .bind(link)
        .bind(Uuid::nil())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_speeches(&self) -> Result<Vec<Speech>> {
        let speeches = sqlx::query_as::<_, Speech>(
            r#"
            SELECT speech_id, sentence, language, link, type, quiz_id,
                   created_by, updated_by, created_at, updated_at
            FROM speeches
            ORDER BY created_at ASC, sentence ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(speeches)
    }
}
