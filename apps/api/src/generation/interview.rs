//! Interview preparation: ten likely questions with CV-specific answers.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{fill, INTERVIEW_PROMPT_TEMPLATE, INTERVIEW_SYSTEM_TEMPLATE};
use crate::language::Language;
use crate::llm_client::prompts::with_language;
use crate::llm_client::{ChatModel, ChatRequest, CompletionParams};

pub const INTERVIEW_PARAMS: CompletionParams = CompletionParams {
    temperature: 0.7,
    max_tokens: 2500,
};

pub async fn generate_interview_questions(
    llm: &dyn ChatModel,
    job_description: &str,
    cv_text: &str,
    language: Language,
) -> Result<String, AppError> {
    let prompt = fill(
        INTERVIEW_PROMPT_TEMPLATE,
        &[
            ("language", language.name()),
            ("job_description", job_description),
            ("cv_text", cv_text),
        ],
    );
    let system = with_language(INTERVIEW_SYSTEM_TEMPLATE, language.name());

    info!("Generating interview questions in {}", language.name());

    Ok(llm
        .complete(ChatRequest {
            system: &system,
            prompt: &prompt,
            params: INTERVIEW_PARAMS,
        })
        .await?)
}
