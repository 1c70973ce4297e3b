use crate::domain::quiz::Quiz;
use crate::domain::speech::{Speech, SpeechKey};
use crate::error::AppResult;
use async_trait::async_trait;

/// Entry point for transactional access to quizzes and speeches.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Open a transaction. Dropping the returned unit of work without
    /// committing rolls every write back.
    async fn begin(&self) -> AppResult<Box<dyn AudioUnitOfWork>>;
}

/// Reads and writes scoped to one transaction
#[async_trait]
pub trait AudioUnitOfWork: Send {
    /// Load and lock quizzes. Ids that do not exist are simply absent.
    async fn find_quizzes(&mut self, quiz_ids: &[String]) -> AppResult<Vec<Quiz>>;

    /// Previously generated speech matching any of the given keys
    async fn find_speeches(&mut self, keys: &[SpeechKey]) -> AppResult<Vec<Speech>>;

    /// Insert speech rows, skipping keys that already exist.
    /// Returns the number of rows actually inserted.
    async fn insert_speeches(&mut self, speeches: &[Speech]) -> AppResult<u64>;

    async fn upsert_quizzes(&mut self, quizzes: &[Quiz]) -> AppResult<()>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}
