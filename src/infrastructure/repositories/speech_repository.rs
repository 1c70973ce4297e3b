use crate::{
    domain::speech::{Speech, SpeechKey},
    error::AppResult,
};
use sqlx::PgConnection;

pub struct SpeechRepository;

impl SpeechRepository {
    /// Get speeches whose (sentence, language) matches one of the keys
    pub async fn find_by_keys(conn: &mut PgConnection, keys: &[SpeechKey]) -> AppResult<Vec<Speech>> {
        let sentences: Vec<String> = keys.iter().map(|k| k.sentence.clone()).collect();
        let languages: Vec<String> = keys.iter().map(|k| k.language.clone()).collect();

        let speeches = sqlx::query_as::<_, Speech>(
            r#"
            SELECT s.speech_id, s.sentence, s.language, s.link, s.type, s.quiz_id,
                   s.created_by, s.updated_by, s.created_at, s.updated_at
            FROM speeches s
            JOIN UNNEST($1::text[], $2::text[]) AS k(sentence, language)
              ON md5(s.sentence) = md5(k.sentence)
             AND s.language = k.language
             AND s.sentence = k.sentence
            ORDER BY s.created_at ASC
            "#,
        )
        .bind(&sentences)
        .bind(&languages)
        .fetch_all(&mut *conn)
        .await?;

        Ok(speeches)
    }

    /// Insert a speech unless one already exists for its (sentence, language).
    /// Uniqueness is enforced on the sentence digest so long text can be
    /// indexed. Returns true when the row was inserted.
    pub async fn insert_if_absent(conn: &mut PgConnection, speech: &Speech) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO speeches (
                speech_id, sentence, language, link, type, quiz_id,
                created_by, updated_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (md5(sentence), language) DO NOTHING
            "#,
        )
        .bind(speech.speech_id)
        .bind(&speech.sentence)
        .bind(&speech.language)
        .bind(&speech.link)
        .bind(speech.role)
        .bind(&speech.quiz_id)
        .bind(speech.created_by)
        .bind(speech.updated_by)
        .bind(speech.created_at)
        .bind(speech.updated_at)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
