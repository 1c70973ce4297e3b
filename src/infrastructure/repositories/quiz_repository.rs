use crate::{
    domain::quiz::{Quiz, QuizRow},
    error::AppResult,
};
use sqlx::{types::Json, PgConnection};

/// Quiz rows. Every query runs on the caller's connection so it can take
/// part in an open transaction.
pub struct QuizRepository;

impl QuizRepository {
    /// Get quizzes by id, locking the rows until the transaction ends
    pub async fn find_by_ids_for_update(
        conn: &mut PgConnection,
        quiz_ids: &[String],
    ) -> AppResult<Vec<Quiz>> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT quiz_id, question, options
            FROM quizzes
            WHERE quiz_id = ANY($1)
            FOR UPDATE
            "#,
        )
        .bind(quiz_ids)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(Quiz::from).collect())
    }

    /// Insert or update a quiz with its resolved attributes
    pub async fn upsert(conn: &mut PgConnection, quiz: &Quiz) -> AppResult<()> {
        let now = chrono::Utc::now();

        sqlx::query(
            r#"
            INSERT INTO quizzes (quiz_id, question, options, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (quiz_id)
            DO UPDATE SET
                question = EXCLUDED.question,
                options = EXCLUDED.options,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&quiz.id)
        .bind(Json(&quiz.question))
        .bind(Json(&quiz.options))
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
