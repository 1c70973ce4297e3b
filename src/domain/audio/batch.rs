use super::dedup::DeduplicationIndex;
use super::dto::GenerationRequestItem;
use crate::domain::quiz::{Quiz, SlotRef};
use crate::domain::speech::{resolve, AudioRole, LanguageCode, LanguageResolution, SpeechKey};

impl SlotRef {
    pub fn role(&self) -> AudioRole {
        match self {
            SlotRef::Question => AudioRole::Term,
            SlotRef::Option(_) => AudioRole::Definition,
        }
    }
}

/// An option slot of one quiz still waiting for its generated clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOption {
    pub option_index: usize,
    pub language: LanguageCode,
}

/// Requested slots of one quiz, in original order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuiz {
    /// Position of the quiz in the invocation's batch
    pub quiz_index: usize,
    pub term: Option<LanguageCode>,
    pub definitions: Vec<PendingOption>,
}

impl PendingQuiz {
    fn new(quiz_index: usize) -> Self {
        Self {
            quiz_index,
            term: None,
            definitions: Vec::new(),
        }
    }
}

/// Everything the gateway has to produce for one invocation
#[derive(Debug, Default)]
pub struct GenerationBatch {
    pub items: Vec<GenerationRequestItem>,
    pub pending: Vec<PendingQuiz>,
}

impl GenerationBatch {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Counters gathered while planning the batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlanStats {
    pub reused: usize,
    pub requested: usize,
    pub cleared: usize,
}

/// Accumulates request items across every quiz of one invocation into a
/// single outbound batch.
#[derive(Debug, Default)]
pub struct BatchRequestBuilder {
    batch: GenerationBatch,
}

impl BatchRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quizzes must be pushed in batch order.
    pub fn push(
        &mut self,
        quiz_index: usize,
        quiz_id: &str,
        slot: SlotRef,
        text: &str,
        language: LanguageCode,
    ) {
        if self.batch.pending.last().map(|p| p.quiz_index) != Some(quiz_index) {
            self.batch.pending.push(PendingQuiz::new(quiz_index));
        }
        let Some(pending) = self.batch.pending.last_mut() else {
            return;
        };

        match slot {
            SlotRef::Question => pending.term = Some(language),
            SlotRef::Option(option_index) => pending.definitions.push(PendingOption {
                option_index,
                language,
            }),
        }

        self.batch.items.push(GenerationRequestItem {
            text: text.to_string(),
            language,
            quiz_id: quiz_id.to_string(),
            role: slot.role(),
        });
    }

    pub fn build(self) -> GenerationBatch {
        self.batch
    }
}

/// Keys of every slot that is eligible for audio, for the dedup lookup.
pub fn eligible_keys(quizzes: &[Quiz]) -> Vec<SpeechKey> {
    let mut keys: Vec<SpeechKey> = Vec::new();
    for quiz in quizzes {
        for slot in quiz.slot_refs() {
            let Some(item) = quiz.slot(slot) else { continue };
            if let LanguageResolution::Eligible(language) = resolve(item) {
                let key = SpeechKey::new(item.text.clone(), language.as_str());
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
    }
    keys
}

/// Decide every slot's audio: reuse a dedup hit, request generation, or
/// clear the link. Requested slots are cleared until a result is applied.
pub fn plan_batch(quizzes: &mut [Quiz], index: &DeduplicationIndex) -> (GenerationBatch, PlanStats) {
    let mut builder = BatchRequestBuilder::new();
    let mut stats = PlanStats::default();

    for (quiz_index, quiz) in quizzes.iter_mut().enumerate() {
        let slots: Vec<SlotRef> = quiz.slot_refs().collect();
        for slot in slots {
            let quiz_id = quiz.id.clone();
            let Some(item) = quiz.slot_mut(slot) else { continue };

            match resolve(item) {
                LanguageResolution::Eligible(language) => {
                    if let Some(link) = index.lookup(&item.text, language) {
                        tracing::debug!(
                            quiz_id = %quiz_id,
                            role = %slot.role(),
                            language = %language,
                            "Reusing existing speech"
                        );
                        item.attribute.audio_link = link.to_string();
                        stats.reused += 1;
                    } else {
                        item.attribute.audio_link.clear();
                        builder.push(quiz_index, &quiz_id, slot, &item.text, language);
                        stats.requested += 1;
                    }
                }
                LanguageResolution::Unsupported(language) => {
                    tracing::debug!(
                        quiz_id = %quiz_id,
                        role = %slot.role(),
                        language = %language,
                        "Language not supported for audio, clearing link"
                    );
                    item.attribute.audio_link.clear();
                    stats.cleared += 1;
                }
                LanguageResolution::Missing => {
                    item.attribute.audio_link.clear();
                    stats.cleared += 1;
                }
            }
        }
    }

    (builder.build(), stats)
}
