//! Error types for the quotation renderer
//!
//! Only unrecoverable conditions are represented here. Missing or malformed
//! optional inputs (client, logo, notes) are absorbed by the layout pass and
//! never reach the caller as errors.

use thiserror::Error;

/// Custom error type for quotation rendering
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid value for field '{0}': {1}")]
    InvalidValue(String, String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("PDF generation error: {0}")]
    PdfError(String),
}

/// Result type alias for renderer operations
pub type RendererResult<T> = Result<T, RendererError>;

/// Helper to convert serde_json errors
impl From<serde_json::Error> for RendererError {
    fn from(err: serde_json::Error) -> Self {
        RendererError::JsonError(err.to_string())
    }
}

/// Conversion from RendererError to PyErr
#[cfg(feature = "python")]
impl From<RendererError> for pyo3::PyErr {
    fn from(err: RendererError) -> Self {
        pyo3::PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
    }
}
