//! Narrative CV evaluation: strengths, gaps and a final recommendation.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{fill, EVALUATION_PROMPT_TEMPLATE, EVALUATION_SYSTEM_TEMPLATE};
use crate::language::Language;
use crate::llm_client::prompts::with_language;
use crate::llm_client::{ChatModel, ChatRequest, CompletionParams};

pub const EVALUATION_PARAMS: CompletionParams = CompletionParams {
    temperature: 0.7,
    max_tokens: 2000,
};

pub async fn evaluate_cv(
    llm: &dyn ChatModel,
    job_description: &str,
    cv_text: &str,
    language: Language,
) -> Result<String, AppError> {
    let prompt = fill(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("language", language.name()),
            ("job_description", job_description),
            ("cv_text", cv_text),
        ],
    );
    let system = with_language(EVALUATION_SYSTEM_TEMPLATE, language.name());

    info!("Evaluating CV against job description in {}", language.name());

    Ok(llm
        .complete(ChatRequest {
            system: &system,
            prompt: &prompt,
            params: EVALUATION_PARAMS,
        })
        .await?)
}
