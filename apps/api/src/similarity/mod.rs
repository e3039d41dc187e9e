// CV ↔ job description similarity.
// Stopword removal, sentence embeddings, cosine similarity. Providers are injected
// so the scorer never knows which model or word lists sit behind it.

pub mod embedding;
pub mod preprocess;
pub mod scorer;
pub mod stopwords;

pub use embedding::{EmbeddingError, EmbeddingProvider, FastembedProvider, ModelChoice};
pub use scorer::{ScoringError, SimilarityScorer};
pub use stopwords::{BundledStopwords, StopwordProvider};
