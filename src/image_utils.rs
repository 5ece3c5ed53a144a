//! Image utilities for PDF rendering
//!
//! Logo decoding never fails: anything that is not a readable PNG, or a data
//! URL wrapping one, is reported as `None` and the document is rendered
//! without a logo.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, GenericImageView, ImageFormat};
use log::{debug, warn};
use pdf_writer::{Pdf, Ref};

use crate::quotation::LogoImage;

/// Logo pixels ready to be embedded as an image XObject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLogo {
    pub width: u32,
    pub height: u32,
    /// 8-bit RGB samples, row major
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples when the image is not fully opaque
    pub alpha: Option<Vec<u8>>,
}

impl DecodedLogo {
    /// Height that keeps the aspect ratio when drawn `width` units wide
    pub fn scaled_height(&self, width: f64) -> f64 {
        width * self.height as f64 / self.width as f64
    }
}

/// Decode a logo payload, `None` on any failure
pub fn decode_logo(logo: &LogoImage) -> Option<DecodedLogo> {
    match logo {
        LogoImage::Bytes(bytes) => decode_png(bytes),
        LogoImage::DataUrl(url) => {
            let bytes = decode_data_url(url)?;
            decode_png(&bytes)
        }
    }
}

/// Extract the payload of a `data:image/...;base64,` URL
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let url = url.trim();
    if !url.starts_with("data:image") {
        warn!("Unsupported logo format, expected a data URL");
        return None;
    }

    let (_, payload) = match url.split_once(',') {
        Some(parts) => parts,
        None => {
            warn!("Logo data URL has no payload");
            return None;
        }
    };
    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if payload.is_empty() {
        warn!("Logo data URL payload is empty");
        return None;
    }

    match STANDARD.decode(payload.as_bytes()) {
        Ok(bytes) if !bytes.is_empty() => Some(bytes),
        Ok(_) => {
            warn!("Logo data URL decoded to no bytes");
            None
        }
        Err(e) => {
            warn!("Failed to decode logo base64 payload: {}", e);
            None
        }
    }
}

fn decode_png(bytes: &[u8]) -> Option<DecodedLogo> {
    if bytes.is_empty() {
        return None;
    }

    let image = match image::load_from_memory_with_format(bytes, ImageFormat::Png) {
        Ok(image) => image,
        Err(e) => {
            warn!("Failed to decode logo as PNG ({} bytes): {}", bytes.len(), e);
            return None;
        }
    };

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        warn!("Logo has empty dimensions {}x{}", width, height);
        return None;
    }

    debug!("Decoded logo: {}x{} pixels, color={:?}", width, height, image.color());
    Some(split_channels(&image))
}

fn split_channels(image: &DynamicImage) -> DecodedLogo {
    let (width, height) = image.dimensions();
    if !image.color().has_alpha() {
        return DecodedLogo {
            width,
            height,
            rgb: image.to_rgb8().into_raw(),
            alpha: None,
        };
    }

    let rgba = image.to_rgba8().into_raw();
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    for chunk in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
        alpha.push(chunk[3]);
    }

    let opaque = alpha.iter().all(|&a| a == u8::MAX);
    DecodedLogo {
        width,
        height,
        rgb,
        alpha: if opaque { None } else { Some(alpha) },
    }
}

/// Write the logo as an image XObject, with its alpha channel as a soft mask.
///
/// `smask_id` is only used when the logo carries transparency.
pub fn add_logo_to_pdf(pdf: &mut Pdf, logo: &DecodedLogo, image_id: Ref, smask_id: Ref) {
    let has_mask = if let Some(alpha) = &logo.alpha {
        let mut smask = pdf.image_xobject(smask_id, alpha);
        smask.width(logo.width as i32);
        smask.height(logo.height as i32);
        smask.color_space().device_gray();
        smask.bits_per_component(8);
        true
    } else {
        false
    };

    let mut xobject = pdf.image_xobject(image_id, &logo.rgb);
    xobject.width(logo.width as i32);
    xobject.height(logo.height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if has_mask {
        xobject.s_mask(smask_id);
    }
}
