// Document I/O: text extraction from uploaded CVs and rendering of generated
// letters into downloadable files. Parsing and rendering are CPU-bound; handlers
// run them inside tokio::task::spawn_blocking.

pub mod extract;
pub mod font_metrics;
pub mod render;
pub mod upload;

pub use extract::{extract_text, DocumentFormat, ExtractionError};
pub use render::{DocumentRenderer, OutputFormat, RenderError, RenderedDocument};
pub use upload::{ApplicationForm, UploadedFile};
