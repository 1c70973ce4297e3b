use super::audio_store::{AudioStore, AudioUnitOfWork};
use super::{QuizRepository, SpeechRepository};
use crate::domain::quiz::Quiz;
use crate::domain::speech::{Speech, SpeechKey};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use std::sync::Arc;

/// Postgres implementation of the audio store
pub struct PgAudioStore {
    pool: Arc<DbPool>,
}

impl PgAudioStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AudioStore for PgAudioStore {
    async fn begin(&self) -> AppResult<Box<dyn AudioUnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgAudioUnitOfWork { tx }))
    }
}

pub struct PgAudioUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AudioUnitOfWork for PgAudioUnitOfWork {
    async fn find_quizzes(&mut self, quiz_ids: &[String]) -> AppResult<Vec<Quiz>> {
        QuizRepository::find_by_ids_for_update(&mut self.tx, quiz_ids).await
    }

    async fn find_speeches(&mut self, keys: &[SpeechKey]) -> AppResult<Vec<Speech>> {
        SpeechRepository::find_by_keys(&mut self.tx, keys).await
    }

    async fn insert_speeches(&mut self, speeches: &[Speech]) -> AppResult<u64> {
        let mut inserted = 0;
        for speech in speeches {
            if SpeechRepository::insert_if_absent(&mut self.tx, speech).await? {
                inserted += 1;
            } else {
                tracing::debug!(
                    sentence = %speech.sentence,
                    language = %speech.language,
                    "Speech already stored, keeping existing row"
                );
            }
        }
        Ok(inserted)
    }

    async fn upsert_quizzes(&mut self, quizzes: &[Quiz]) -> AppResult<()> {
        for quiz in quizzes {
            QuizRepository::upsert(&mut self.tx, quiz).await?;
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
