pub mod batch;
pub mod dedup;
pub mod dto;
pub mod error;
pub mod reconcile;
pub mod service;


pub use batch::{eligible_keys, plan_batch, BatchRequestBuilder, GenerationBatch, PendingQuiz, PlanStats};
pub use dedup::DeduplicationIndex;
pub use dto::{
    AudioGenerationSummary, GenerateQuizAudioRequest, GenerationRequestItem, GenerationResultItem,
};
pub use error::QuizAudioError;
pub use reconcile::{AppliedResult, ResultReconciler};
pub use service::{AudioGenerationOutcome, QuizAudioService, QuizAudioServiceApi};
