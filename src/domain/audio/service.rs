use super::batch::{eligible_keys, plan_batch};
use super::dedup::DeduplicationIndex;
use super::dto::{AudioGenerationSummary, GenerationRequestItem, GenerationResultItem};
use super::error::QuizAudioError;
use super::reconcile::ResultReconciler;
use crate::domain::quiz::Quiz;
use crate::domain::speech::Speech;
use crate::infrastructure::repositories::{AudioGenerationGateway, AudioStore, AudioUnitOfWork};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const MAX_QUIZ_IDS_PER_REQUEST: usize = 100;

/// Quizzes after a successful invocation, with what happened to them
#[derive(Debug, Clone)]
pub struct AudioGenerationOutcome {
    pub quizzes: Vec<Quiz>,
    pub summary: AudioGenerationSummary,
}

pub struct QuizAudioService {
    store: Arc<dyn AudioStore>,
    gateway: Arc<dyn AudioGenerationGateway>,
    generation_timeout: Duration,
}

impl QuizAudioService {
    pub fn new(
        store: Arc<dyn AudioStore>,
        gateway: Arc<dyn AudioGenerationGateway>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            store,
            gateway,
            generation_timeout,
        }
    }
}

#[async_trait]
pub trait QuizAudioServiceApi: Send + Sync {
    /// Attach audio to quizzes produced by an upstream create/update flow
    ///
    /// This operation:
    /// - Resolves each slot's language and clears links it cannot support
    /// - Reuses previously generated speech for the same text and language
    /// - Sends one batch for everything else to the audio generation service
    /// - Persists new speech rows and the updated quizzes in one transaction
    ///
    /// On error nothing is persisted.
    async fn generate_for_quizzes(
        &self,
        actor: Uuid,
        quizzes: Vec<Quiz>,
    ) -> Result<AudioGenerationOutcome, QuizAudioError>;

    /// Load stored quizzes and run the same pipeline on them
    async fn generate_for_quiz_ids(
        &self,
        actor: Uuid,
        quiz_ids: Vec<String>,
    ) -> Result<AudioGenerationSummary, QuizAudioError>;
}

#[async_trait]
impl QuizAudioServiceApi for QuizAudioService {
    async fn generate_for_quizzes(
        &self,
        actor: Uuid,
        mut quizzes: Vec<Quiz>,
    ) -> Result<AudioGenerationOutcome, QuizAudioError> {
        let mut uow = self.begin().await?;
        let summary = self.generate_in(uow.as_mut(), actor, &mut quizzes).await?;
        self.commit(uow).await?;

        Ok(AudioGenerationOutcome { quizzes, summary })
    }

    async fn generate_for_quiz_ids(
        &self,
        actor: Uuid,
        quiz_ids: Vec<String>,
    ) -> Result<AudioGenerationSummary, QuizAudioError> {
        let quiz_ids = Self::validate_quiz_ids(quiz_ids)?;

        let mut uow = self.begin().await?;
        let mut quizzes = Self::load_quizzes(uow.as_mut(), &quiz_ids).await?;
        let summary = self.generate_in(uow.as_mut(), actor, &mut quizzes).await?;
        self.commit(uow).await?;

        Ok(summary)
    }
}

impl QuizAudioService {
    /// Run the pipeline inside a transaction owned by the caller.
    ///
    /// `quizzes` is only updated once everything, including the writes, has
    /// succeeded. The caller still has to commit. A quiz id listed more than
    /// once is processed and stored once; every entry receives the result.
    pub async fn generate_in(
        &self,
        uow: &mut dyn AudioUnitOfWork,
        actor: Uuid,
        quizzes: &mut [Quiz],
    ) -> Result<AudioGenerationSummary, QuizAudioError> {
        let mut working = Self::unique_by_id(quizzes);

        tracing::info!(
            actor = %actor,
            quiz_count = working.len(),
            "Generating quiz audio"
        );

        let index = self.load_dedup_index(uow, &working).await?;
        let (batch, stats) = plan_batch(&mut working, &index);

        let mut summary = AudioGenerationSummary {
            quizzes: working.len(),
            reused: stats.reused,
            requested: stats.requested,
            generated: 0,
            cleared: stats.cleared,
        };

        let speeches: Vec<Speech> = if batch.is_empty() {
            tracing::info!("No audio to generate, skipping media service");
            Vec::new()
        } else {
            let results = self.call_gateway(&batch.items).await?;
            let applied = ResultReconciler::new(&results).reconcile(&mut working, &batch.pending);
            summary.generated = applied.len();

            let now = Utc::now();
            applied
                .into_iter()
                .map(|result| result.into_speech(actor, now))
                .collect()
        };

        self.persist(uow, &speeches, &working).await?;
        for quiz in quizzes.iter_mut() {
            if let Some(updated) = working.iter().find(|w| w.id == quiz.id) {
                quiz.clone_from(updated);
            }
        }

        tracing::info!(
            quizzes = summary.quizzes,
            reused = summary.reused,
            requested = summary.requested,
            generated = summary.generated,
            cleared = summary.cleared,
            "Quiz audio generated"
        );

        Ok(summary)
    }

    async fn begin(&self) -> Result<Box<dyn AudioUnitOfWork>, QuizAudioError> {
        self.store
            .begin()
            .await
            .map_err(|e| QuizAudioError::Dependency(format!("AudioStore.begin: {}", e)))
    }

    async fn commit(&self, uow: Box<dyn AudioUnitOfWork>) -> Result<(), QuizAudioError> {
        uow.commit()
            .await
            .map_err(|e| QuizAudioError::Dependency(format!("AudioStore.commit: {}", e)))
    }

    /// First occurrence of each quiz id, in input order
    fn unique_by_id(quizzes: &[Quiz]) -> Vec<Quiz> {
        let mut unique: Vec<Quiz> = Vec::with_capacity(quizzes.len());
        for quiz in quizzes {
            if unique.iter().any(|q| q.id == quiz.id) {
                tracing::warn!(quiz_id = %quiz.id, "Quiz listed twice, using first occurrence");
                continue;
            }
            unique.push(quiz.clone());
        }
        unique
    }

    fn validate_quiz_ids(quiz_ids: Vec<String>) -> Result<Vec<String>, QuizAudioError> {
        if quiz_ids.is_empty() {
            return Err(QuizAudioError::Invalid("quiz_ids cannot be empty".to_string()));
        }
        if quiz_ids.len() > MAX_QUIZ_IDS_PER_REQUEST {
            return Err(QuizAudioError::Invalid(format!(
                "At most {} quizzes can be processed per request",
                MAX_QUIZ_IDS_PER_REQUEST
            )));
        }
        if quiz_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(QuizAudioError::Invalid("quiz id cannot be blank".to_string()));
        }

        let mut unique = Vec::with_capacity(quiz_ids.len());
        for id in quiz_ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Ok(unique)
    }

    /// Load quizzes in the requested order, failing on the first unknown id
    async fn load_quizzes(
        uow: &mut dyn AudioUnitOfWork,
        quiz_ids: &[String],
    ) -> Result<Vec<Quiz>, QuizAudioError> {
        let mut found = uow
            .find_quizzes(quiz_ids)
            .await
            .map_err(|e| QuizAudioError::Dependency(format!("QuizRepository.find: {}", e)))?;

        let mut ordered = Vec::with_capacity(quiz_ids.len());
        for id in quiz_ids {
            let position = found
                .iter()
                .position(|quiz| &quiz.id == id)
                .ok_or_else(|| QuizAudioError::NotFound(id.clone()))?;
            ordered.push(found.swap_remove(position));
        }
        Ok(ordered)
    }

    async fn load_dedup_index(
        &self,
        uow: &mut dyn AudioUnitOfWork,
        quizzes: &[Quiz],
    ) -> Result<DeduplicationIndex, QuizAudioError> {
        let keys = eligible_keys(quizzes);
        if keys.is_empty() {
            return Ok(DeduplicationIndex::default());
        }

        let existing = uow
            .find_speeches(&keys)
            .await
            .map_err(|e| QuizAudioError::Dependency(format!("SpeechRepository.find: {}", e)))?;

        let index = DeduplicationIndex::from_speeches(existing);
        tracing::debug!(
            keys = keys.len(),
            hits = index.len(),
            "Loaded existing speeches"
        );

        Ok(index)
    }

    async fn call_gateway(
        &self,
        items: &[GenerationRequestItem],
    ) -> Result<Vec<GenerationResultItem>, QuizAudioError> {
        match tokio::time::timeout(self.generation_timeout, self.gateway.generate(items)).await {
            Ok(Ok(results)) => Ok(results),
            Ok(Err(e)) => Err(QuizAudioError::Gateway(format!(
                "AudioGenerationGateway.generate: {}",
                e
            ))),
            Err(_) => Err(QuizAudioError::Timeout(format!(
                "AudioGenerationGateway.generate: no response within {}s",
                self.generation_timeout.as_secs_f32()
            ))),
        }
    }

    async fn persist(
        &self,
        uow: &mut dyn AudioUnitOfWork,
        speeches: &[Speech],
        quizzes: &[Quiz],
    ) -> Result<(), QuizAudioError> {
        if !speeches.is_empty() {
            let inserted = uow
                .insert_speeches(speeches)
                .await
                .map_err(|e| QuizAudioError::Dependency(format!("SpeechRepository.insert: {}", e)))?;
            tracing::debug!(generated = speeches.len(), inserted, "Speeches stored");
        }

        uow.upsert_quizzes(quizzes)
            .await
            .map_err(|e| QuizAudioError::Dependency(format!("QuizRepository.upsert: {}", e)))
    }
}
