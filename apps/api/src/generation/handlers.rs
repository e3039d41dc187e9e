//! Axum route handlers for the assistant API.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::documents::{
    extract_text, ApplicationForm, OutputFormat, RenderedDocument, UploadedFile,
};
use crate::errors::AppError;
use crate::generation::cover_letter::generate_cover_letter;
use crate::generation::evaluation::evaluate_cv;
use crate::generation::interview::generate_interview_questions;
use crate::language::Language;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub file_format: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    /// Cosine similarity rounded to two decimals.
    pub similarity_score: f64,
    pub evaluation: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub interview_qa: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate_cover_letter
///
/// JSON body. Returns the letter as a downloadable pdf, docx or txt file.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    info!("Processing cover letter generation request");

    let Json(request) = payload.map_err(json_rejection)?;

    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| {
            warn!("Missing or empty job description");
            AppError::Validation("Job description is required.".to_string())
        })?;
    let format = parse_output_format(request.file_format.as_deref())?;
    let language = parse_language(request.language.as_deref())?;

    let letter =
        generate_cover_letter(state.llm.as_ref(), &job_description, None, language).await?;

    deliver(&state, letter, format).await
}

/// POST /generate_cover_letter_with_cv
///
/// Multipart: `cv_file`, `job_description`, `file_format`, `language`.
pub async fn handle_generate_cover_letter_with_cv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    info!("Processing cover letter generation with CV");

    let mut form = read_form(multipart).await?;
    let (job_description, cv_file) = form.require_job_and_cv()?;
    let language = parse_language(form.language.as_deref())?;
    let format = parse_output_format(form.file_format.as_deref())?;
    let cv_text = extract_cv(cv_file).await?;

    let letter = generate_cover_letter(
        state.llm.as_ref(),
        &job_description,
        Some(&cv_text),
        language,
    )
    .await?;

    deliver(&state, letter, format).await
}

/// POST /evaluate_cv_match
///
/// Similarity score between CV and job description plus a written evaluation.
/// The language is parsed once and shared by the scorer and the evaluator.
pub async fn handle_evaluate_cv_match(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<EvaluationResponse>, AppError> {
    info!("Processing CV and job description similarity evaluation");

    let mut form = read_form(multipart).await?;
    let (job_description, cv_file) = form.require_job_and_cv()?;
    let language = parse_language(form.language.as_deref())?;
    let cv_text = extract_cv(cv_file).await?;

    let scorer = state.scorer.clone();
    let (jd, cv) = (job_description.clone(), cv_text.clone());
    let similarity = tokio::task::spawn_blocking(move || scorer.score(&jd, &cv, language))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    info!(
        "Similarity score {similarity:.4} ({})",
        state.scorer.model_id()
    );

    let evaluation = evaluate_cv(state.llm.as_ref(), &job_description, &cv_text, language).await?;

    Ok(Json(EvaluationResponse {
        similarity_score: round_score(similarity),
        evaluation,
    }))
}

/// POST /generate_interview_questions
///
/// Ten likely interview questions with sample answers tailored to the CV.
pub async fn handle_generate_interview_questions(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<InterviewResponse>, AppError> {
    info!("Processing interview question generation request");

    let mut form = read_form(multipart).await?;
    let (job_description, cv_file) = form.require_job_and_cv()?;
    let language = parse_language(form.language.as_deref())?;
    let cv_text = extract_cv(cv_file).await?;

    let interview_qa =
        generate_interview_questions(state.llm.as_ref(), &job_description, &cv_text, language)
            .await?;

    Ok(Json(InterviewResponse { interview_qa }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            warn!("Request must be in JSON format");
            AppError::UnsupportedMediaType("Request must be in JSON format.")
        }
        other => AppError::Validation(other.body_text()),
    }
}

async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApplicationForm, AppError> {
    let multipart = multipart.map_err(|_| {
        warn!("Request must be in multipart/form-data format");
        AppError::UnsupportedMediaType("Request must be in multipart/form-data format.")
    })?;
    ApplicationForm::from_multipart(multipart).await
}

/// A missing language means English; an empty one is rejected. Codes are
/// matched lower-cased.
fn parse_language(raw: Option<&str>) -> Result<Language, AppError> {
    let code = raw.map_or_else(|| "en".to_string(), |l| l.trim().to_lowercase());

    code.parse::<Language>().map_err(|e| {
        warn!("Unsupported language requested: {code}");
        AppError::Validation(e.to_string())
    })
}

fn parse_output_format(raw: Option<&str>) -> Result<OutputFormat, AppError> {
    let name = raw.unwrap_or_default().trim().to_lowercase();
    OutputFormat::from_name(&name).ok_or_else(|| {
        warn!("Unsupported file format requested: {name}");
        AppError::Validation("Invalid file format. Choose from 'pdf', 'docx', 'txt'.".to_string())
    })
}

async fn extract_cv(cv_file: UploadedFile) -> Result<String, AppError> {
    let format = cv_file.format()?;
    let text = tokio::task::spawn_blocking(move || extract_text(&cv_file.bytes, format))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    info!("CV text extracted ({} chars)", text.chars().count());
    Ok(text)
}

/// Renders, optionally archives, and returns the document as an attachment.
async fn deliver(state: &AppState, text: String, format: OutputFormat) -> Result<Response, AppError> {
    let renderer = state.renderer.clone();
    let document = tokio::task::spawn_blocking(move || renderer.render(&text, format))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    state.renderer.archive(&document).await?;
    info!("Cover letter generated as {}", document.file_name);

    Ok(attachment(document))
}

fn attachment(document: RenderedDocument) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", document.file_name);
    (
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response()
}

fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_defaults_to_english() {
        assert_eq!(parse_language(None).unwrap(), Language::En);
    }

    #[test]
    fn test_empty_language_is_rejected() {
        for raw in ["", "  "] {
            assert!(matches!(parse_language(Some(raw)), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_language_is_lowercased() {
        assert_eq!(parse_language(Some("DE")).unwrap(), Language::De);
        assert_eq!(parse_language(Some(" Nl ")).unwrap(), Language::Nl);
    }

    #[test]
    fn test_unsupported_language_lists_choices() {
        match parse_language(Some("pt")) {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("['en', 'tr', 'de', 'fr', 'es', 'it', 'nl']"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format(Some("PDF")).unwrap(), OutputFormat::Pdf);
        assert_eq!(parse_output_format(Some("docx")).unwrap(), OutputFormat::Docx);
        assert!(matches!(parse_output_format(None), Err(AppError::Validation(_))));
        assert!(matches!(parse_output_format(Some("rtf")), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.8567), 0.86);
        assert_eq!(round_score(0.0), 0.0);
        assert_eq!(round_score(1.0), 1.0);
    }

    #[test]
    fn test_attachment_headers() {
        let response = attachment(RenderedDocument {
            bytes: b"hello".to_vec(),
            content_type: "text/plain; charset=utf-8",
            file_name: "abc.txt".to_string(),
        });
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"abc.txt\""
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
