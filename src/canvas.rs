//! Canvas wrapper for pdf-writer content streams
//!
//! Replays the layout's `DrawOp`s as content-stream operators. Fill and
//! stroke colors are tracked so repeated operations in the same color do
//! not re-emit color operators.

use pdf_writer::{Content, Name, Str};

use crate::page::DrawOp;
use crate::text_layout::StandardFont;
use crate::types::{Color, Rect};
use crate::unicode_utils::unicode_to_winansi;

/// Resource name of the logo XObject
pub const LOGO_RESOURCE: Name<'static> = Name(b"Im1");

/// Graphics state mirrored on the Rust side
#[derive(Clone)]
struct CanvasState {
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f64>,
}

/// High-level canvas over a single page's content stream
pub struct PdfCanvas {
    content: Content,
    state: CanvasState,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            state: CanvasState {
                fill_color: None,
                stroke_color: None,
                line_width: None,
            },
        }
    }

    /// Finish the content stream
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    pub fn draw(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
                color,
            } => {
                self.set_fill_color(*color);
                self.draw_string(*x, *y, text, *font, *size);
            }
            DrawOp::Rect { rect, fill } => {
                self.set_fill_color(*fill);
                self.fill_rect(*rect);
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                thickness,
            } => {
                self.set_stroke_color(*color);
                self.set_line_width(*thickness);
                self.line(*x1, *y1, *x2, *y2);
            }
            DrawOp::Logo { x, y, width, height } => {
                self.draw_image(LOGO_RESOURCE, *x, *y, *width, *height);
            }
        }
    }

    // ===== Colors =====

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color == Some(color) {
            return;
        }
        self.state.fill_color = Some(color);
        self.content.set_fill_rgb(color.r as f32, color.g as f32, color.b as f32);
    }

    fn set_stroke_color(&mut self, color: Color) {
        if self.state.stroke_color == Some(color) {
            return;
        }
        self.state.stroke_color = Some(color);
        self.content.set_stroke_rgb(color.r as f32, color.g as f32, color.b as f32);
    }

    fn set_line_width(&mut self, width: f64) {
        if self.state.line_width == Some(width) {
            return;
        }
        self.state.line_width = Some(width);
        self.content.set_line_width(width as f32);
    }

    // ===== Drawing =====

    fn fill_rect(&mut self, rect: Rect) {
        self.content.rect(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        );
        self.content.fill_nonzero();
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.content.move_to(x1 as f32, y1 as f32);
        self.content.line_to(x2 as f32, y2 as f32);
        self.content.stroke();
    }

    // ===== Text =====

    fn draw_string(&mut self, x: f64, y: f64, text: &str, font: StandardFont, size: f64) {
        let encoded = unicode_to_winansi(text);
        if encoded.is_empty() {
            return;
        }
        self.content.begin_text();
        self.content.set_font(Name(font.resource_name()), size as f32);
        self.content.next_line(x as f32, y as f32);
        self.content.show(Str(&encoded));
        self.content.end_text();
    }

    // ===== Images =====

    fn draw_image(&mut self, image_name: Name<'static>, x: f64, y: f64, width: f64, height: f64) {
        // Image space is the unit square; scale it to the target box
        self.content.save_state();
        self.content.transform([width as f32, 0.0, 0.0, height as f32, x as f32, y as f32]);
        self.content.x_object(image_name);
        self.content.restore_state();
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}
