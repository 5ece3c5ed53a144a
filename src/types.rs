//! Geometry and color types for PDF rendering

use serde::{Deserialize, Serialize};

/// Rectangle with its origin at the bottom-left corner (PDF user space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle hanging down from `top`, the way the layout places boxes
    pub fn from_top(x: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(x, top - height, width, height)
    }
}

/// Size with width and height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Standard page sizes in points
pub struct PageSize;

impl PageSize {
    /// ISO A4, 595.28 x 841.89 pt
    pub const A4: Size = Size::new(595.28, 841.89);
}

/// Margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self { top, bottom, left, right }
    }

    pub fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Color representation, components in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

/// Palette used by the quotation layout
pub mod palette {
    use super::Color;

    /// Corporate blue for titles, rules and the grand total
    pub const PRIMARY: Color = Color::rgb(0.0, 0.47, 0.8);
    pub const TEXT: Color = Color::rgb(0.1, 0.1, 0.1);
    pub const LIGHT_GRAY: Color = Color::rgb(0.9, 0.9, 0.9);
    pub const SUBTLE_TEXT: Color = Color::rgb(0.4, 0.4, 0.4);
    pub const FOOTER_TEXT: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const ROW_TINT: Color = Color::rgb(0.97, 0.97, 0.97);
    pub const ROW_RULE: Color = Color::rgb(0.8, 0.8, 0.8);
    pub const NOTES_BACKGROUND: Color = Color::rgb(0.95, 0.95, 0.95);

    pub const STATUS_PENDING: Color = Color::rgb(0.9, 0.7, 0.1);
    pub const STATUS_APPROVED: Color = Color::rgb(0.2, 0.7, 0.2);
    pub const STATUS_REJECTED: Color = Color::rgb(0.8, 0.2, 0.2);
}
