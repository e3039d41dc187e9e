//! Test doubles for the model-backed seams, plus a ready-made `AppState`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::documents::DocumentRenderer;
use crate::llm_client::{ChatModel, ChatRequest, CompletionParams, LlmError};
use crate::rate_limit::{RateLimitRule, RateLimiter};
use crate::similarity::{
    BundledStopwords, EmbeddingError, EmbeddingProvider, SimilarityScorer,
};
use crate::state::AppState;

pub const TEST_API_KEY: &str = "test-key";

const BAG_DIMENSIONS: usize = 1024;

/// Hashed bag-of-words vectors: texts sharing words point the same way.
#[derive(Default)]
pub struct BagOfWordsEmbedder;

impl EmbeddingProvider for BagOfWordsEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vector = vec![0.0_f32; BAG_DIMENSIONS];
        for word in text.split_whitespace() {
            let word: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();
            if word.is_empty() {
                continue;
            }
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            vector[(hasher.finish() % BAG_DIMENSIONS as u64) as usize] += 1.0;
        }
        Ok(vector)
    }

    fn model_id(&self) -> &str {
        "bag-of-words"
    }
}

/// Records every input; returns a constant non-zero vector.
#[derive(Default)]
pub struct CountingEmbedder {
    inputs: Mutex<Vec<String>>,
}

impl CountingEmbedder {
    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

impl EmbeddingProvider for CountingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.inputs.lock().unwrap().push(text.to_string());
        Ok(vec![1.0, 0.5, 0.25])
    }

    fn model_id(&self) -> &str {
        "counting"
    }
}

pub struct FailingEmbedder;

impl EmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::Inference("model offline".to_string()))
    }

    fn model_id(&self) -> &str {
        "failing"
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub prompt: String,
    pub params: CompletionParams,
}

/// Canned chat model. Answers every call with the same reply, or fails.
pub struct StubChat {
    reply: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no chat request was made")
    }
}

#[async_trait]
impl ChatModel for StubChat {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
            params: request.params,
        });
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        })
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "OPENAI_API_KEY" => Some("sk-test".to_string()),
        "API_KEY" => Some(TEST_API_KEY.to_string()),
        _ => None,
    })
    .expect("test config")
}

/// State wired with the given doubles, bundled stopwords and a generous rate limit.
pub fn test_state(llm: Arc<dyn ChatModel>, embedder: Arc<dyn EmbeddingProvider>) -> AppState {
    let config = test_config();
    AppState {
        llm,
        scorer: SimilarityScorer::new(embedder, Arc::new(BundledStopwords::load())),
        renderer: DocumentRenderer::default(),
        rate_limiter: Arc::new(RateLimiter::new(RateLimitRule {
            max_requests: 1000,
            window: std::time::Duration::from_secs(60),
        })),
        api_key: Arc::from(config.api_key.as_str()),
        config,
    }
}
