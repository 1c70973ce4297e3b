use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::batch::{PendingOption, PendingQuiz};
use super::dto::GenerationResultItem;
use crate::domain::quiz::Quiz;
use crate::domain::speech::{AudioRole, LanguageCode, Speech};

/// A generated clip that landed on a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedResult {
    pub quiz_id: String,
    pub role: AudioRole,
    pub sentence: String,
    pub language: LanguageCode,
    pub link: String,
}

impl AppliedResult {
    pub fn into_speech(self, actor: Uuid, now: DateTime<Utc>) -> Speech {
        Speech {
            speech_id: Uuid::new_v4(),
            sentence: self.sentence,
            language: self.language.as_str().to_string(),
            link: self.link,
            role: self.role,
            quiz_id: self.quiz_id,
            created_by: actor,
            updated_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Matches gateway results back onto the slots they were requested for.
///
/// Every result is consumed at most once. Option candidates are consumed in
/// original order, so options sharing the same text each get their own
/// result.
pub struct ResultReconciler<'a> {
    results: &'a [GenerationResultItem],
    consumed: Vec<bool>,
}

impl<'a> ResultReconciler<'a> {
    pub fn new(results: &'a [GenerationResultItem]) -> Self {
        let consumed = results
            .iter()
            .map(|result| {
                if result.link.is_empty() {
                    tracing::warn!(
                        quiz_id = %result.quiz_id,
                        role = %result.role,
                        "Ignoring generated audio without link"
                    );
                    true
                } else {
                    false
                }
            })
            .collect();

        Self { results, consumed }
    }

    pub fn reconcile(mut self, quizzes: &mut [Quiz], pending: &[PendingQuiz]) -> Vec<AppliedResult> {
        let mut applied = Vec::new();

        for pending_quiz in pending {
            let Some(quiz) = quizzes.get_mut(pending_quiz.quiz_index) else {
                continue;
            };

            if let Some(language) = pending_quiz.term {
                if let Some(position) = self.take_term(&quiz.id, language) {
                    let result = &self.results[position];
                    quiz.question.attribute.audio_link = result.link.clone();
                    applied.push(AppliedResult {
                        quiz_id: quiz.id.clone(),
                        role: AudioRole::Term,
                        sentence: quiz.question.text.clone(),
                        language,
                        link: result.link.clone(),
                    });
                }
            }

            if !pending_quiz.definitions.is_empty() {
                applied.extend(self.apply_definitions(quiz, pending_quiz.definitions.clone()));
            }
        }

        let dropped = self.consumed.iter().filter(|c| !**c).count();
        if dropped > 0 {
            tracing::warn!(
                dropped,
                "Generated audio results did not match any requested slot"
            );
        }

        applied
    }

    fn take_term(&mut self, quiz_id: &str, language: LanguageCode) -> Option<usize> {
        let position = (0..self.results.len()).find(|&i| {
            let result = &self.results[i];
            !self.consumed[i]
                && result.role == AudioRole::Term
                && result.quiz_id == quiz_id
                && language_matches(result, language)
        })?;
        self.consumed[position] = true;
        Some(position)
    }

    fn apply_definitions(
        &mut self,
        quiz: &mut Quiz,
        mut candidates: Vec<PendingOption>,
    ) -> Vec<AppliedResult> {
        let results = self.results;
        let mut applied = Vec::new();

        for (position, result) in results.iter().enumerate() {
            if candidates.is_empty() {
                break;
            }
            if self.consumed[position]
                || result.role != AudioRole::Definition
                || result.quiz_id != quiz.id
            {
                continue;
            }

            let hit = candidates.iter().position(|candidate| {
                quiz.options
                    .get(candidate.option_index)
                    .is_some_and(|option| option.text == result.text)
                    && language_matches(result, candidate.language)
            });
            let Some(hit) = hit else {
                continue;
            };

            let candidate = candidates.remove(hit);
            self.consumed[position] = true;

            let option = &mut quiz.options[candidate.option_index];
            option.attribute.audio_link = result.link.clone();
            applied.push(AppliedResult {
                quiz_id: quiz.id.clone(),
                role: AudioRole::Definition,
                sentence: option.text.clone(),
                language: candidate.language,
                link: result.link.clone(),
            });
        }

        applied
    }
}

fn language_matches(result: &GenerationResultItem, language: LanguageCode) -> bool {
    result.language.is_empty() || result.language == language.as_str()
}
