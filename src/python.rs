//! Python bindings

use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::config::RenderOptions;
use crate::quotation::{LogoImage, QuotationRecord};

/// Render a quotation JSON record to PDF bytes.
///
/// `logo` may be raw PNG bytes or a data URL string.
#[pyfunction]
#[pyo3(signature = (record_json, logo=None, options_json=None))]
fn render_quotation<'py>(
    py: Python<'py>,
    record_json: &str,
    logo: Option<&PyAny>,
    options_json: Option<&str>,
) -> PyResult<&'py PyBytes> {
    let quotation = QuotationRecord::from_json(record_json)?;
    let options = match options_json {
        Some(json) => RenderOptions::from_json(json)?,
        None => RenderOptions::default(),
    };
    let logo = match logo {
        Some(obj) => match obj.downcast::<PyBytes>() {
            Ok(bytes) => Some(LogoImage::Bytes(bytes.as_bytes().to_vec())),
            Err(_) => Some(LogoImage::DataUrl(obj.extract::<String>()?)),
        },
        None => None,
    };

    let bytes = crate::render_quotation_pdf_with_options(&quotation, logo.as_ref(), &options)?;
    Ok(PyBytes::new(py, &bytes))
}

#[pymodule]
fn quotation_pdf(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(render_quotation, m)?)?;
    m.add("PDF_MIME_TYPE", crate::PDF_MIME_TYPE)?;
    Ok(())
}
