//! PDF serialization
//!
//! ## Data Flow
//!
//! ```text
//! QuotationRecord → layout (DrawOps per page) → PdfRenderer → PDF bytes
//! ```
//!
//! The renderer does no layout of its own. It registers the two standard
//! fonts and the optional logo XObject once, replays each page's ops into a
//! content stream, and writes the page tree, catalog and document info.

use log::{debug, info};
use pdf_writer::{Finish, Name, Pdf, Rect as PdfRect, Ref, TextStr};

use crate::canvas::{PdfCanvas, LOGO_RESOURCE};
use crate::error::{RendererError, RendererResult};
use crate::image_utils::{add_logo_to_pdf, DecodedLogo};
use crate::layout::LaidOutDocument;
use crate::page::PageBuffer;
use crate::text_layout::StandardFont;

const PRODUCER: &str = concat!("quotation_pdf ", env!("CARGO_PKG_VERSION"));

/// Writer for one document; consumed by [`PdfRenderer::render`]
pub struct PdfRenderer {
    pdf: Pdf,
    catalog_id: Ref,
    page_tree_id: Ref,
    next_ref_id: i32,
    fonts: Vec<(StandardFont, Ref)>,
    logo_id: Option<Ref>,
    pages: Vec<Ref>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        let mut renderer = Self {
            pdf: Pdf::new(),
            catalog_id: Ref::new(1),
            page_tree_id: Ref::new(2),
            // 1=catalog, 2=page tree
            next_ref_id: 3,
            fonts: Vec::new(),
            logo_id: None,
            pages: Vec::new(),
        };
        renderer.register_fonts();
        renderer
    }

    fn next_ref(&mut self) -> Ref {
        let r = Ref::new(self.next_ref_id);
        self.next_ref_id += 1;
        r
    }

    /// Standard Type1 fonts with WinAnsiEncoding
    fn register_fonts(&mut self) {
        for font in StandardFont::ALL {
            let font_id = self.next_ref();
            self.pdf
                .type1_font(font_id)
                .base_font(Name(font.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            self.fonts.push((font, font_id));
        }
    }

    fn register_logo(&mut self, logo: &DecodedLogo) {
        let image_id = self.next_ref();
        let smask_id = self.next_ref();
        add_logo_to_pdf(&mut self.pdf, logo, image_id, smask_id);
        debug!(
            "Logo XObject {} written ({}x{}, mask={})",
            image_id.get(),
            logo.width,
            logo.height,
            logo.alpha.is_some()
        );
        self.logo_id = Some(image_id);
    }

    fn write_page(&mut self, page: &PageBuffer) -> RendererResult<()> {
        let page_id = self.next_ref();
        let content_id = self.next_ref();

        let mut canvas = PdfCanvas::new();
        for op in &page.ops {
            canvas.draw(op);
        }
        let content_bytes = canvas.finish();
        self.pdf.stream(content_id, &content_bytes);

        let logo_id = if page.has_logo() {
            Some(self.logo_id.ok_or_else(|| {
                RendererError::PdfError("page draws a logo that was never embedded".to_string())
            })?)
        } else {
            None
        };

        let mut page_writer = self.pdf.page(page_id);
        page_writer.media_box(PdfRect::new(
            0.0,
            0.0,
            page.size.width as f32,
            page.size.height as f32,
        ));
        page_writer.parent(self.page_tree_id);
        page_writer.contents(content_id);
        {
            let mut resources = page_writer.resources();
            {
                let mut fonts = resources.fonts();
                for (font, font_id) in &self.fonts {
                    fonts.pair(Name(font.resource_name()), *font_id);
                }
            }
            if let Some(logo_id) = logo_id {
                resources.x_objects().pair(LOGO_RESOURCE, logo_id);
            }
        }
        page_writer.finish();

        self.pages.push(page_id);
        Ok(())
    }

    /// Serialize every page of `document` into a finished PDF
    pub fn render(mut self, document: &LaidOutDocument) -> RendererResult<Vec<u8>> {
        if document.pages.is_empty() {
            return Err(RendererError::PdfError("document has no pages".to_string()));
        }

        if let Some(logo) = &document.logo {
            self.register_logo(logo);
        }
        for page in &document.pages {
            self.write_page(page)?;
        }

        let page_count = self.pages.len() as i32;
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.pages.iter().copied())
            .count(page_count);
        self.pdf.catalog(self.catalog_id).pages(self.page_tree_id);

        let info_id = self.next_ref();
        self.pdf
            .document_info(info_id)
            .title(TextStr(&document.title))
            .producer(TextStr(PRODUCER));

        let pdf_bytes = self.pdf.finish();
        if !pdf_bytes.starts_with(b"%PDF-") {
            return Err(RendererError::PdfError("serialized output lacks a PDF header".to_string()));
        }

        info!(
            "PDF generated: {} page(s), {} bytes ({:.2} MB)",
            page_count,
            pdf_bytes.len(),
            pdf_bytes.len() as f64 / 1_048_576.0
        );
        Ok(pdf_bytes)
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}
