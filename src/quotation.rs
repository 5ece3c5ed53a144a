//! Quotation data model
//!
//! Mirrors the row shape the web application reads from its store: the
//! quotation header joined with its client (`clients`) and its line items
//! (`quotation_items`). Numeric columns arrive either as JSON numbers or as
//! decimal strings, both are accepted.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{RendererError, RendererResult};

/// Quotation lifecycle status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuotationStatus {
    Pending,
    Approved,
    Rejected,
    /// Any value the application does not know about, kept verbatim
    Other(String),
}

impl QuotationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            QuotationStatus::Pending => "pending",
            QuotationStatus::Approved => "approved",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for QuotationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => QuotationStatus::Pending,
            "approved" => QuotationStatus::Approved,
            "rejected" => QuotationStatus::Rejected,
            _ => QuotationStatus::Other(value),
        }
    }
}

impl From<&str> for QuotationStatus {
    fn from(value: &str) -> Self {
        QuotationStatus::from(value.to_string())
    }
}

impl From<QuotationStatus> for String {
    fn from(status: QuotationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Default for QuotationStatus {
    fn default() -> Self {
        QuotationStatus::Pending
    }
}

/// Client the quotation is addressed to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// One priced entry of a quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub quantity: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub unit_price: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_price: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64, total_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total_price,
        }
    }
}

/// Input record for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationRecord {
    pub quotation_number: String,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    #[serde(default)]
    pub status: QuotationStatus,
    #[serde(default, alias = "clients")]
    pub client: Option<Client>,
    #[serde(default, alias = "quotation_items")]
    pub items: Vec<LineItem>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuotationRecord {
    /// Parse a stored quotation row
    pub fn from_json(json: &str) -> RendererResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Download name used by the application, e.g. `Orcamento-2024-001.pdf`
    pub fn suggested_file_name(&self) -> String {
        format!("Orcamento-{}.pdf", self.quotation_number)
    }

    /// Notes with surrounding whitespace removed; `None` when nothing is left
    pub fn trimmed_notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }

    /// Every amount must be finite to be printed as currency
    pub fn validate_amounts(&self) -> RendererResult<()> {
        check_finite("total_amount", self.total_amount)?;
        for (index, item) in self.items.iter().enumerate() {
            check_finite(&format!("items[{}].quantity", index), item.quantity)?;
            check_finite(&format!("items[{}].unit_price", index), item.unit_price)?;
            check_finite(&format!("items[{}].total_price", index), item.total_price)?;
        }
        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> RendererResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RendererError::InvalidValue(field.to_string(), value.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(f64),
    Text(String),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Number(value) => Ok(value),
        AmountRepr::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid amount '{}': {}", text, e))),
    }
}

/// Company logo payload supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoImage {
    /// Raw PNG bytes
    Bytes(Vec<u8>),
    /// `data:image/png;base64,...` string, as produced by a browser FileReader
    DataUrl(String),
}

impl From<Vec<u8>> for LogoImage {
    fn from(bytes: Vec<u8>) -> Self {
        LogoImage::Bytes(bytes)
    }
}

impl From<String> for LogoImage {
    fn from(data_url: String) -> Self {
        LogoImage::DataUrl(data_url)
    }
}

impl From<&str> for LogoImage {
    fn from(data_url: &str) -> Self {
        LogoImage::DataUrl(data_url.to_string())
    }
}
