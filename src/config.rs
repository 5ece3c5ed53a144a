//! Render options
//!
//! Everything the layout does not hard-wire: page geometry, margin, logo
//! width, notes wrapping width, the generation timestamp and all display
//! strings. Defaults reproduce the application's Portuguese A4 output.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{RendererError, RendererResult};
use crate::types::{PageSize, Size};

/// Fixed display strings used by the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub title: String,
    pub number_prefix: String,
    pub client_section: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_address: String,
    pub client_location: String,
    pub details_section: String,
    pub issue_date: String,
    pub valid_until: String,
    pub status: String,
    pub status_pending: String,
    pub status_approved: String,
    pub status_rejected: String,
    pub items_section: String,
    pub column_description: String,
    pub column_quantity: String,
    pub column_unit_price: String,
    pub column_total: String,
    pub no_items: String,
    pub continuation: String,
    pub total: String,
    pub notes_section: String,
    pub footer_disclaimer: String,
    /// `{date}` and `{time}` are substituted
    pub footer_generated: String,
    /// `{page}` and `{pages}` are substituted
    pub page_stamp: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "ORÇAMENTO".to_string(),
            number_prefix: "Nº".to_string(),
            client_section: "DADOS DO CLIENTE".to_string(),
            client_name: "Cliente:".to_string(),
            client_email: "Email:".to_string(),
            client_phone: "Telefone:".to_string(),
            client_address: "Endereço:".to_string(),
            client_location: "Cidade/Estado:".to_string(),
            details_section: "DETALHES DO ORÇAMENTO".to_string(),
            issue_date: "Data de Emissão:".to_string(),
            valid_until: "Válido Até:".to_string(),
            status: "Status:".to_string(),
            status_pending: "Pendente".to_string(),
            status_approved: "Aprovado".to_string(),
            status_rejected: "Rejeitado".to_string(),
            items_section: "ITENS DO ORÇAMENTO".to_string(),
            column_description: "Descrição".to_string(),
            column_quantity: "Quantidade".to_string(),
            column_unit_price: "Preço Unit.".to_string(),
            column_total: "Total".to_string(),
            no_items: "Nenhum item no orçamento".to_string(),
            continuation: "CONTINUAÇÃO DO ORÇAMENTO".to_string(),
            total: "Total:".to_string(),
            notes_section: "OBSERVAÇÕES".to_string(),
            footer_disclaimer: "Orçamento gerado automaticamente pelo sistema.".to_string(),
            footer_generated: "Documento gerado em {date} às {time}".to_string(),
            page_stamp: "Página {page} de {pages}".to_string(),
        }
    }
}

impl Labels {
    pub fn page_stamp(&self, page: usize, pages: usize) -> String {
        self.page_stamp
            .replace("{page}", &page.to_string())
            .replace("{pages}", &pages.to_string())
    }

    pub fn footer_generated(&self, date: &str, time: &str) -> String {
        self.footer_generated
            .replace("{date}", date)
            .replace("{time}", time)
    }
}

/// Options for a single render call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Size shared by every page of the document
    pub page_size: Size,
    pub margin: f64,
    pub logo_width: f64,
    pub notes_max_chars_per_line: usize,
    /// Timestamp printed in the footer; the local clock is read when unset
    pub generated_at: Option<NaiveDateTime>,
    pub labels: Labels,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 50.0,
            logo_width: 150.0,
            notes_max_chars_per_line: 90,
            generated_at: None,
            labels: Labels::default(),
        }
    }
}

impl RenderOptions {
    /// Parse options from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> RendererResult<Self> {
        let options: RenderOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn content_width(&self) -> f64 {
        self.page_size.width - 2.0 * self.margin
    }

    /// Reject geometry that leaves no room for content
    pub fn validate(&self) -> RendererResult<()> {
        let Size { width, height } = self.page_size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RendererError::InvalidGeometry(format!(
                "page size must be positive, got {}x{}",
                width, height
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(RendererError::InvalidGeometry(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        if self.content_width() <= 0.0 || height - 2.0 * self.margin <= 0.0 {
            return Err(RendererError::InvalidGeometry(format!(
                "margin {} leaves no content area on a {}x{} page",
                self.margin, width, height
            )));
        }
        if !self.logo_width.is_finite() || self.logo_width <= 0.0 {
            return Err(RendererError::InvalidGeometry(format!(
                "logo width must be positive, got {}",
                self.logo_width
            )));
        }
        if self.notes_max_chars_per_line == 0 {
            return Err(RendererError::InvalidValue(
                "notes_max_chars_per_line".to_string(),
                "0".to_string(),
            ));
        }
        Ok(())
    }
}
