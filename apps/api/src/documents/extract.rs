//! Plain-text extraction from uploaded CVs (PDF, DOCX, TXT), fully in memory.

use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::Txt),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format '{0}'. Upload a pdf, docx or txt file.")]
    UnsupportedFormat(String),

    #[error("PDF could not be read: {0}")]
    Pdf(String),

    #[error("DOCX could not be read: {0}")]
    Docx(String),

    #[error("Text file is not valid UTF-8")]
    Encoding,

    #[error("Document contains no extractable text")]
    Empty,
}

/// Extracts text, rejecting documents that yield nothing but whitespace.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Docx => extract_docx(bytes)?,
        DocumentFormat::Txt => extract_txt(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf(format!("{e:?}"))),
        Err(_) => Err(ExtractionError::Pdf("malformed document".to_string())),
    }
}

fn extract_txt(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ExtractionError::Encoding)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    Ok(document_xml_to_text(&xml))
}

fn paragraph_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)<w:p(?:\s[^>]*?)?(?:/>|>(.*?)</w:p>)").expect("valid paragraph regex")
    })
}

fn run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab\s*/>|<w:br\s*/>")
            .expect("valid run regex")
    })
}

/// One line per `<w:p>`; text runs concatenated, tabs and breaks preserved.
fn document_xml_to_text(xml: &str) -> String {
    paragraph_pattern()
        .captures_iter(xml)
        .map(|paragraph| {
            let body = paragraph.get(1).map_or("", |m| m.as_str());
            let mut line = String::new();
            for run in run_pattern().captures_iter(body) {
                match run.get(1) {
                    Some(text) => line.push_str(&html_escape::decode_html_entities(text.as_str())),
                    None if run[0].starts_with("<w:tab") => line.push('\t'),
                    None => line.push('\n'),
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with(document_xml: &str) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(DocumentFormat::from_file_name("cv.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_file_name("my.cv.docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_file_name("notes.txt"), Some(DocumentFormat::Txt));
        assert_eq!(DocumentFormat::from_file_name("cv.doc"), None);
        assert_eq!(DocumentFormat::from_file_name("README"), None);
    }

    #[test]
    fn test_txt_strips_bom() {
        let text = extract_text("\u{feff}Rust engineer".as_bytes(), DocumentFormat::Txt).unwrap();
        assert_eq!(text, "Rust engineer");
    }

    #[test]
    fn test_txt_invalid_utf8() {
        let result = extract_text(&[0xff, 0xfe, 0x00], DocumentFormat::Txt);
        assert!(matches!(result, Err(ExtractionError::Encoding)));
    }

    #[test]
    fn test_blank_document_is_empty() {
        let result = extract_text(b"  \n\t ", DocumentFormat::Txt);
        assert!(matches!(result, Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p w:rsidR="00A1"><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>Skills:</w:t><w:tab/><w:t>Rust &amp; Go</w:t></w:r></w:p>
</w:body></w:document>"#;
        let text = extract_text(&docx_with(xml), DocumentFormat::Docx).unwrap();
        assert_eq!(text, "Jane Doe\n\nSkills:\tRust & Go");
    }

    #[test]
    fn test_docx_without_document_part_fails() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let result = extract_text(&bytes, DocumentFormat::Docx);
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }

    #[test]
    fn test_garbage_pdf_is_an_error_not_a_panic() {
        let result = extract_text(b"definitely not a pdf", DocumentFormat::Pdf);
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }
}
