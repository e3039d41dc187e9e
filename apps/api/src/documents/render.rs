//! Renders generated text into a downloadable PDF, DOCX or TXT document.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::documents::font_metrics::HELVETICA;

// A4, 10mm margins on every side (190mm text width), 12pt body text.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 6.5;
const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Docx,
    Txt,
}

impl OutputFormat {
    /// Exact lookup of a lower-cased format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pdf" => Some(OutputFormat::Pdf),
            "docx" => Some(OutputFormat::Docx),
            "txt" => Some(OutputFormat::Txt),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
            OutputFormat::Txt => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Txt => "text/plain; charset=utf-8",
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("DOCX rendering failed: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("Font could not be loaded: {0}")]
    Font(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
}

/// Holds the optional embedded font and archive directory, both fixed at startup.
#[derive(Clone, Default)]
pub struct DocumentRenderer {
    font: Option<Arc<Vec<u8>>>,
    output_dir: Option<PathBuf>,
}

impl DocumentRenderer {
    pub fn new(font: Option<Vec<u8>>, output_dir: Option<PathBuf>) -> Self {
        Self {
            font: font.map(Arc::new),
            output_dir,
        }
    }

    /// Reads the TTF at `font_path`, if one is configured.
    pub fn from_paths(font_path: Option<&Path>, output_dir: Option<PathBuf>) -> Result<Self, RenderError> {
        let font = font_path.map(std::fs::read).transpose()?;
        Ok(Self::new(font, output_dir))
    }

    pub fn render(&self, text: &str, format: OutputFormat) -> Result<RenderedDocument, RenderError> {
        let bytes = match format {
            OutputFormat::Txt => text.as_bytes().to_vec(),
            OutputFormat::Docx => render_docx(text)?,
            OutputFormat::Pdf => render_pdf(text, self.font.as_deref().map(Vec::as_slice))?,
        };

        Ok(RenderedDocument {
            bytes,
            content_type: format.content_type(),
            file_name: format!("{}.{}", Uuid::new_v4(), format.extension()),
        })
    }

    /// Writes a copy into the output directory when one is configured.
    pub async fn archive(&self, document: &RenderedDocument) -> Result<Option<PathBuf>, RenderError> {
        let Some(dir) = &self.output_dir else {
            return Ok(None);
        };
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&document.file_name);
        tokio::fs::write(&path, &document.bytes).await?;
        info!("Archived generated document at {}", path.display());
        Ok(Some(path))
    }
}

fn render_pdf(text: &str, font_bytes: Option<&[u8]>) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        "Cover Letter",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = load_font(&doc, font_bytes)?;

    let text_width_pt = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) * PT_PER_MM;
    let lines = HELVETICA.wrap_text(text, text_width_pt / FONT_SIZE_PT);

    let top = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = top;

    for line in lines {
        if y < MARGIN_MM {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            current = doc.get_page(next_page).get_layer(next_layer);
            y = top;
        }
        if !line.is_empty() {
            current.use_text(line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
        y -= LINE_HEIGHT_MM;
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(format!("{e:?}")))
}

fn load_font(
    doc: &PdfDocumentReference,
    font_bytes: Option<&[u8]>,
) -> Result<IndirectFontRef, RenderError> {
    match font_bytes {
        Some(bytes) => doc
            .add_external_font(Cursor::new(bytes))
            .map_err(|e| RenderError::Font(format!("{e:?}"))),
        None => doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Font(format!("{e:?}"))),
    }
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

fn document_xml(text: &str) -> String {
    let paragraphs: String = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                "<w:p/>".to_string()
            } else {
                format!(
                    r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                    html_escape::encode_text(line)
                )
            }
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{paragraphs}</w:body></w:document>"#
    )
}

fn render_docx(text: &str) -> Result<Vec<u8>, RenderError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let document = document_xml(text);

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("word/document.xml", document.as_str()),
    ] {
        zip.start_file(
            name,
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        )?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}
