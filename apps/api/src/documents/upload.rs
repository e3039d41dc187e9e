//! Multipart form shared by the CV endpoints.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::documents::extract::DocumentFormat;
use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn format(&self) -> Result<DocumentFormat, AppError> {
        DocumentFormat::from_file_name(&self.file_name).ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported CV file '{}'. Upload a pdf, docx or txt file.",
                self.file_name
            ))
        })
    }
}

/// Raw form fields. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub job_description: Option<String>,
    pub language: Option<String>,
    pub file_format: Option<String>,
    pub cv_file: Option<UploadedFile>,
}

impl ApplicationForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ApplicationForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "cv_file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read uploaded file: {e}"))
                    })?;
                    // Browsers send an empty part when no file was chosen.
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.cv_file = Some(UploadedFile { file_name, bytes });
                    }
                }
                "job_description" | "language" | "file_format" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read field '{name}': {e}"))
                    })?;
                    match name.as_str() {
                        "job_description" => form.job_description = Some(value),
                        "language" => form.language = Some(value),
                        _ => form.file_format = Some(value),
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Job description and CV are mandatory on every CV endpoint.
    pub fn require_job_and_cv(&mut self) -> Result<(String, UploadedFile), AppError> {
        let job_description = self
            .job_description
            .take()
            .filter(|jd| !jd.trim().is_empty());
        match (job_description, self.cv_file.take()) {
            (Some(jd), Some(cv)) => Ok((jd, cv)),
            _ => Err(AppError::Validation(
                "CV file and job description are required.".to_string(),
            )),
        }
    }
}
