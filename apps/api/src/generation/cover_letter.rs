//! Cover letters, from the job description alone or together with the CV.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{
    fill, COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_WITH_CV_PROMPT_TEMPLATE,
};
use crate::language::Language;
use crate::llm_client::prompts::{with_language, CONTACT_DETAILS_INSTRUCTION, COVER_LETTER_SYSTEM_TEMPLATE};
use crate::llm_client::{ChatModel, ChatRequest, CompletionParams};

pub const COVER_LETTER_PARAMS: CompletionParams = CompletionParams {
    temperature: 0.6,
    max_tokens: 1000,
};

/// Generates the letter text. With `cv_text` the letter reflects the candidate's
/// CV; without it, only the job description.
pub async fn generate_cover_letter(
    llm: &dyn ChatModel,
    job_description: &str,
    cv_text: Option<&str>,
    language: Language,
) -> Result<String, AppError> {
    let template = match cv_text {
        Some(_) => COVER_LETTER_WITH_CV_PROMPT_TEMPLATE,
        None => COVER_LETTER_PROMPT_TEMPLATE,
    };
    let prompt = fill(
        template,
        &[
            ("language", language.name()),
            ("contact_details", CONTACT_DETAILS_INSTRUCTION),
            ("job_description", job_description),
            ("cv_text", cv_text.unwrap_or_default()),
        ],
    );
    let system = with_language(COVER_LETTER_SYSTEM_TEMPLATE, language.name());

    info!(
        "Generating cover letter in {} (with CV: {})",
        language.name(),
        cv_text.is_some()
    );

    let letter = llm
        .complete(ChatRequest {
            system: &system,
            prompt: &prompt,
            params: COVER_LETTER_PARAMS,
        })
        .await?;

    Ok(letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubChat;

    #[tokio::test]
    async fn test_letter_from_job_description_only() {
        let llm = StubChat::replying("Dear Hiring Manager,");
        let letter = generate_cover_letter(&llm, "Senior Rust Engineer", None, Language::De)
            .await
            .unwrap();

        assert_eq!(letter, "Dear Hiring Manager,");
        let request = llm.last_request();
        assert!(request.system.contains("cover letter in German"));
        assert!(request.prompt.contains("Use German for the letter"));
        assert!(request.prompt.contains("Senior Rust Engineer"));
        assert!(request.prompt.contains("phone number appear at the end"));
        assert!(!request.prompt.contains("CV Text:"));
        assert_eq!(request.params, COVER_LETTER_PARAMS);
    }

    #[tokio::test]
    async fn test_letter_with_cv_includes_cv_text() {
        let llm = StubChat::replying("Bonjour,");
        generate_cover_letter(&llm, "Backend role", Some("Jane Doe, 6 years Go"), Language::Fr)
            .await
            .unwrap();

        let request = llm.last_request();
        assert!(request.prompt.contains("cover letter in French"));
        assert!(request.prompt.contains("CV Text:\nJane Doe, 6 years Go"));
        assert!(!request.prompt.contains('{'), "unfilled placeholder: {}", request.prompt);
    }

    #[tokio::test]
    async fn test_placeholder_text_in_user_input_is_sent_verbatim() {
        let llm = StubChat::replying("Dear team,");
        let jd = "Template engine work: {cv_text} {language} {contact_details}";
        generate_cover_letter(&llm, jd, Some("Jane Doe"), Language::De)
            .await
            .unwrap();

        let request = llm.last_request();
        assert!(request.prompt.contains(jd), "rewritten: {}", request.prompt);
        assert_eq!(request.prompt.matches("Jane Doe").count(), 1);
    }

    #[tokio::test]
    async fn test_llm_failure_is_an_llm_error() {
        let llm = StubChat::failing();
        let result = generate_cover_letter(&llm, "Backend role", None, Language::En).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
