//! Embedding provider: turns one cleaned text into a fixed-length vector.
//!
//! The production backend is a local multilingual ONNX model loaded through
//! fastembed. Inference needs `&mut TextEmbedding`, so calls are serialized
//! behind a mutex; the model is loaded once at startup and shared via `Arc`.

use std::path::Path;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Unknown embedding model '{0}'")]
    UnknownModel(String),

    #[error("Embedding model failed to load: {0}")]
    Init(String),

    #[error("Embedding inference failed: {0}")]
    Inference(String),

    #[error("Embedding model returned no vector")]
    Empty,

    #[error("Embedding dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },
}

/// Black-box `embed(text) -> vector`. Must be deterministic for a given model.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Identifier reported in logs and the health endpoint.
    fn model_id(&self) -> &str;
}

/// Multilingual models the service can be configured with (`EMBEDDING_MODEL`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelChoice {
    #[default]
    ParaphraseMultilingualMiniLm,
    MultilingualE5Small,
    MultilingualE5Base,
    MultilingualE5Large,
}

impl ModelChoice {
    pub fn from_id(id: &str) -> Result<Self, EmbeddingError> {
        match id.trim().to_lowercase().as_str() {
            "paraphrase-multilingual-minilm-l12-v2" => Ok(ModelChoice::ParaphraseMultilingualMiniLm),
            "multilingual-e5-small" => Ok(ModelChoice::MultilingualE5Small),
            "multilingual-e5-base" => Ok(ModelChoice::MultilingualE5Base),
            "multilingual-e5-large" => Ok(ModelChoice::MultilingualE5Large),
            other => Err(EmbeddingError::UnknownModel(other.to_string())),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ModelChoice::ParaphraseMultilingualMiniLm => "paraphrase-multilingual-minilm-l12-v2",
            ModelChoice::MultilingualE5Small => "multilingual-e5-small",
            ModelChoice::MultilingualE5Base => "multilingual-e5-base",
            ModelChoice::MultilingualE5Large => "multilingual-e5-large",
        }
    }

    fn fastembed_model(self) -> EmbeddingModel {
        match self {
            ModelChoice::ParaphraseMultilingualMiniLm => EmbeddingModel::ParaphraseMLMiniLML12V2,
            ModelChoice::MultilingualE5Small => EmbeddingModel::MultilingualE5Small,
            ModelChoice::MultilingualE5Base => EmbeddingModel::MultilingualE5Base,
            ModelChoice::MultilingualE5Large => EmbeddingModel::MultilingualE5Large,
        }
    }

    /// E5 models are trained with role prefixes. Both sides of a symmetric
    /// comparison get the same `query: ` prefix.
    fn input_prefix(self) -> Option<&'static str> {
        match self {
            ModelChoice::ParaphraseMultilingualMiniLm => None,
            _ => Some("query: "),
        }
    }

    fn prepare(self, text: &str) -> String {
        match self.input_prefix() {
            Some(prefix) => format!("{prefix}{text}"),
            None => text.to_string(),
        }
    }
}

pub struct FastembedProvider {
    model: Mutex<TextEmbedding>,
    choice: ModelChoice,
}

impl FastembedProvider {
    /// Loads (downloading on first use) the configured model.
    pub fn try_new(choice: ModelChoice, cache_dir: Option<&Path>) -> Result<Self, EmbeddingError> {
        let mut options =
            InitOptions::new(choice.fastembed_model()).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir.to_path_buf());
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| EmbeddingError::Init(format!("{}: {e:?}", choice.id())))?;

        Ok(Self {
            model: Mutex::new(model),
            choice,
        })
    }
}

impl EmbeddingProvider for FastembedProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let input = self.choice.prepare(text);
        let mut model = self
            .model
            .lock()
            .map_err(|_| EmbeddingError::Inference("embedding model lock poisoned".to_string()))?;

        model
            .embed(vec![input], None)
            .map_err(|e| EmbeddingError::Inference(format!("{e:?}")))?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::Empty)
    }

    fn model_id(&self) -> &str {
        self.choice.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids_parse_case_insensitively() {
        assert_eq!(
            ModelChoice::from_id("Multilingual-E5-Small").unwrap(),
            ModelChoice::MultilingualE5Small
        );
        for choice in [
            ModelChoice::ParaphraseMultilingualMiniLm,
            ModelChoice::MultilingualE5Small,
            ModelChoice::MultilingualE5Base,
            ModelChoice::MultilingualE5Large,
        ] {
            assert_eq!(ModelChoice::from_id(choice.id()).unwrap(), choice);
        }
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let err = ModelChoice::from_id("universal-sentence-encoder").unwrap_err();
        assert!(matches!(err, EmbeddingError::UnknownModel(_)));
    }

    #[test]
    fn test_e5_inputs_get_query_prefix() {
        assert_eq!(ModelChoice::MultilingualE5Base.prepare("rust"), "query: rust");
        assert_eq!(ModelChoice::ParaphraseMultilingualMiniLm.prepare("rust"), "rust");
    }

    #[test]
    fn test_default_model_is_paraphrase_minilm() {
        assert_eq!(ModelChoice::default().id(), "paraphrase-multilingual-minilm-l12-v2");
    }
}
