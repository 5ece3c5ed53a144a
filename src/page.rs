//! Pages as ordered drawing instructions, and the layout cursor
//!
//! The layout pass only records `DrawOp`s; turning them into content
//! streams happens later in the renderer, once every page is known.

use crate::text_layout::StandardFont;
use crate::types::{Color, Margins, Rect, Size};

/// One primitive drawing operation, coordinates in PDF user space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline starting at (x, y)
    Text {
        x: f64,
        y: f64,
        text: String,
        font: StandardFont,
        size: f64,
        color: Color,
    },
    /// Filled rectangle without border
    Rect { rect: Rect, fill: Color },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        thickness: f64,
    },
    /// The document logo, bottom-left corner at (x, y)
    Logo { x: f64, y: f64, width: f64, height: f64 },
}

/// Drawing surface for one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageBuffer {
    pub size: Size,
    pub ops: Vec<DrawOp>,
}

impl PageBuffer {
    pub fn new(size: Size) -> Self {
        Self { size, ops: Vec::new() }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Text runs in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }

    pub fn has_logo(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Logo { .. }))
    }
}

/// Explicit layout state threaded through every layout step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    page_size: Size,
    margins: Margins,
    page_index: usize,
    y: f64,
}

impl LayoutCursor {
    pub fn new(page_size: Size, margins: Margins) -> Self {
        Self {
            page_size,
            margins,
            page_index: 0,
            y: page_size.height - margins.top,
        }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn top(&self) -> f64 {
        self.page_size.height - self.margins.top
    }

    pub fn left(&self) -> f64 {
        self.margins.left
    }

    pub fn right(&self) -> f64 {
        self.page_size.width - self.margins.right
    }

    pub fn content_width(&self) -> f64 {
        self.right() - self.left()
    }

    /// Vertical space left above the bottom margin
    pub fn remaining(&self) -> f64 {
        self.y - self.margins.bottom
    }

    /// True when less than `threshold` remains above the bottom margin
    pub fn needs_break(&self, threshold: f64) -> bool {
        self.remaining() < threshold
    }

    /// Move down by `dy`
    pub fn advance(&mut self, dy: f64) {
        debug_assert!(dy >= 0.0, "cursor moved up by {}", -dy);
        self.y -= dy;
    }

    /// Jump down to an absolute position on the current page
    pub fn move_down_to(&mut self, y: f64) {
        debug_assert!(y <= self.y, "cursor moved up from {} to {}", self.y, y);
        self.y = self.y.min(y);
    }

    /// Cursor at the top margin of the next page
    pub fn next_page(self) -> Self {
        Self {
            page_index: self.page_index + 1,
            y: self.top(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageSize;

    #[test]
    fn test_cursor_starts_at_top_margin() {
        let cursor = LayoutCursor::new(PageSize::A4, Margins::all(50.0));
        assert!((cursor.y() - 791.89).abs() < 1e-9);
        assert_eq!(cursor.left(), 50.0);
        assert!((cursor.content_width() - 495.28).abs() < 1e-9);
        assert_eq!(cursor.page_index(), 0);
    }

    #[test]
    fn test_break_threshold() {
        let mut cursor = LayoutCursor::new(PageSize::A4, Margins::all(50.0));
        cursor.move_down_to(100.0);
        assert!(!cursor.needs_break(50.0));
        cursor.advance(0.5);
        assert!(cursor.needs_break(50.0));

        let next = cursor.next_page();
        assert_eq!(next.page_index(), 1);
        assert_eq!(next.y(), cursor.top());
    }

    #[test]
    fn test_page_buffer_queries() {
        let mut page = PageBuffer::new(PageSize::A4);
        page.push(DrawOp::Text {
            x: 0.0,
            y: 0.0,
            text: "hello".to_string(),
            font: StandardFont::Helvetica,
            size: 10.0,
            color: Color::black(),
        });
        page.push(DrawOp::Rect {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            fill: Color::white(),
        });
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["hello"]);
        assert!(page.contains_text("hello"));
        assert!(!page.has_logo());
    }
}
