//! Quotation PDF renderer
//!
//! Renders a client quotation ("orçamento") into a paginated A4 PDF using
//! pdf-writer. Layout and serialization are separate passes: the layout
//! produces drawing instructions per page, the renderer turns them into PDF
//! objects.
//!
//! ```no_run
//! use quotation_pdf::{render_quotation_json, PDF_MIME_TYPE};
//!
//! let json = r#"{"quotation_number":"2024-001","issue_date":"2024-03-01",
//!     "valid_until":"2024-03-31","total_amount":100,"items":[]}"#;
//! let bytes = render_quotation_json(json, None).unwrap();
//! assert!(bytes.starts_with(b"%PDF"));
//! assert_eq!(PDF_MIME_TYPE, "application/pdf");
//! ```

mod canvas;
pub mod config;
mod error;
mod image_utils;
pub mod layout;
pub mod page;
pub mod quotation;
pub mod renderer;
pub mod text_formatting;
mod text_layout;
pub mod types;
mod unicode_utils;

#[cfg(feature = "python")]
mod python;

pub use config::{Labels, RenderOptions};
pub use error::{RendererError, RendererResult};
pub use image_utils::{decode_logo, DecodedLogo};
pub use layout::{layout_quotation, LaidOutDocument};
pub use quotation::{Client, LineItem, LogoImage, QuotationRecord, QuotationStatus};
pub use renderer::PdfRenderer;
pub use text_layout::StandardFont;

/// Content type of the rendered document
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Download name for a rendered quotation, e.g. `Orcamento-2024-001.pdf`
pub fn suggested_file_name(quotation: &QuotationRecord) -> String {
    quotation.suggested_file_name()
}

/// Render a quotation with the default options
pub fn render_quotation_pdf(
    quotation: &QuotationRecord,
    logo: Option<&LogoImage>,
) -> RendererResult<Vec<u8>> {
    render_quotation_pdf_with_options(quotation, logo, &RenderOptions::default())
}

pub fn render_quotation_pdf_with_options(
    quotation: &QuotationRecord,
    logo: Option<&LogoImage>,
    options: &RenderOptions,
) -> RendererResult<Vec<u8>> {
    let document = layout_quotation(quotation, logo, options)?;
    PdfRenderer::new().render(&document)
}

/// Render a quotation stored as JSON
pub fn render_quotation_json(record_json: &str, logo: Option<&LogoImage>) -> RendererResult<Vec<u8>> {
    let quotation = QuotationRecord::from_json(record_json)?;
    render_quotation_pdf(&quotation, logo)
}
