//! How close a CV is to a job description, in [0.0, 1.0].
//!
//! Algorithm:
//! 1. Reject blank inputs and unsupported language codes (no embedding calls).
//! 2. Strip the language's stopwords from both texts.
//! 3. Embed each cleaned text.
//! 4. Cosine similarity of the two vectors, clamped to [0.0, 1.0].
//!
//! The scorer holds no mutable state and does no logging; callers decide how to
//! report failures. Nothing is retried.

use std::sync::Arc;

use thiserror::Error;

use crate::language::{Language, UnsupportedLanguage};
use crate::similarity::embedding::{EmbeddingError, EmbeddingProvider};
use crate::similarity::preprocess::remove_stopwords;
use crate::similarity::stopwords::StopwordProvider;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Job description and CV text cannot be empty.")]
    InvalidInput,

    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),

    #[error("Similarity is undefined: {0}")]
    DegenerateInput(&'static str),

    #[error("Embedding provider failed: {0}")]
    EmbeddingProvider(#[from] EmbeddingError),
}

#[derive(Clone)]
pub struct SimilarityScorer {
    embedder: Arc<dyn EmbeddingProvider>,
    stopwords: Arc<dyn StopwordProvider>,
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, stopwords: Arc<dyn StopwordProvider>) -> Self {
        Self {
            embedder,
            stopwords,
        }
    }

    pub fn model_id(&self) -> &str {
        self.embedder.model_id()
    }

    /// Scores a CV against a job description for a raw two-letter language code.
    #[allow(dead_code)]
    pub fn compute_similarity(
        &self,
        job_description: &str,
        cv_text: &str,
        language_code: &str,
    ) -> Result<f64, ScoringError> {
        ensure_non_blank(job_description, cv_text)?;
        let language: Language = language_code.parse()?;
        self.score(job_description, cv_text, language)
    }

    /// Same as `compute_similarity`, for callers that already validated the language.
    pub fn score(
        &self,
        job_description: &str,
        cv_text: &str,
        language: Language,
    ) -> Result<f64, ScoringError> {
        ensure_non_blank(job_description, cv_text)?;

        let stopwords = self.stopwords.stopwords_for(language);
        let job_clean = remove_stopwords(job_description, stopwords);
        let cv_clean = remove_stopwords(cv_text, stopwords);

        if job_clean.is_empty() || cv_clean.is_empty() {
            return Err(ScoringError::DegenerateInput(
                "text contains nothing but stopwords",
            ));
        }

        let job_vector = self.embedder.embed(&job_clean)?;
        let cv_vector = self.embedder.embed(&cv_clean)?;

        cosine_similarity(&job_vector, &cv_vector)
    }
}

fn ensure_non_blank(job_description: &str, cv_text: &str) -> Result<(), ScoringError> {
    if job_description.trim().is_empty() || cv_text.trim().is_empty() {
        return Err(ScoringError::InvalidInput);
    }
    Ok(())
}

/// dot(a, b) / (‖a‖·‖b‖), accumulated in f64 and clamped to [0.0, 1.0].
///
/// A zero vector makes the ratio undefined and is reported as `DegenerateInput`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ScoringError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        }
        .into());
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return Err(ScoringError::DegenerateInput("embedding vector has zero norm"));
    }

    let similarity = dot / denominator;
    if !similarity.is_finite() {
        return Err(ScoringError::DegenerateInput("embedding vector is not finite"));
    }

    Ok(similarity.clamp(0.0, 1.0))
}
