//! Quotation page layout
//!
//! Turns a [`QuotationRecord`] into pages of [`DrawOp`]s. Each step takes the
//! current [`LayoutCursor`] and returns the cursor after the content it
//! placed; the only state kept between steps is the list of pages drawn so far.
//!
//! Block order on the page:
//!
//! ```text
//! logo (top right) · title · number
//! client column | details column
//! item table (breaks onto continuation pages)
//! total · notes box
//! footer on the last page · "page i of N" on every page
//! ```

use chrono::{Local, NaiveDateTime};
use log::debug;

use crate::config::{Labels, RenderOptions};
use crate::error::RendererResult;
use crate::image_utils::{decode_logo, DecodedLogo};
use crate::page::{DrawOp, LayoutCursor, PageBuffer};
use crate::quotation::{Client, LogoImage, QuotationRecord};
use crate::text_formatting::{
    format_currency, format_date, format_location, format_quantity, format_time, status_display,
};
use crate::text_layout::{truncate_to_width, wrap_fixed_chars, StandardFont};
use crate::types::{palette, Color, Margins, Rect};

/// Extra vertical space consumed after every line of text
const TEXT_PADDING: f64 = 5.0;
const ROW_HEIGHT: f64 = 25.0;
const HEADER_ROW_HEIGHT: f64 = 25.0;
const FRAME_HEIGHT: f64 = 20.0;
const CELL_PADDING: f64 = 5.0;
/// Fractions of the content width: description, quantity, unit price, total
const COLUMN_FRACTIONS: [f64; 4] = [0.5, 0.15, 0.15, 0.2];

/// Minimum space above the bottom margin before an item row
const ITEM_BREAK_THRESHOLD: f64 = 50.0;
const NOTES_BREAK_THRESHOLD: f64 = 100.0;
const FOOTER_BREAK_THRESHOLD: f64 = 60.0;
const TOTAL_LINE_GAP: f64 = 20.0;

const NOTES_BOX_HEIGHT: f64 = 100.0;
const NOTES_LINE_HEIGHT: f64 = 15.0;
const NOTES_MAX_LINES: usize = 6;

/// Footer rule sits this far above the bottom margin
const FOOTER_RULE_OFFSET: f64 = 50.0;
const STAMP_RIGHT_OFFSET: f64 = 100.0;
const STAMP_BASELINE: f64 = 30.0;

/// Offset of the status value from the right column's left edge
const STATUS_VALUE_OFFSET: f64 = 40.0;

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: StandardFont,
    size: f64,
    color: Color,
}

impl TextStyle {
    const fn new(font: StandardFont, size: f64, color: Color) -> Self {
        Self { font, size, color }
    }

    const fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

const TITLE: TextStyle = TextStyle::new(StandardFont::HelveticaBold, 24.0, palette::PRIMARY);
const CONTINUATION: TextStyle = TextStyle::new(StandardFont::HelveticaBold, 14.0, palette::PRIMARY);
const SUBTITLE: TextStyle = TextStyle::new(StandardFont::Helvetica, 12.0, palette::SUBTLE_TEXT);
const SECTION: TextStyle = TextStyle::new(StandardFont::HelveticaBold, 12.0, palette::TEXT);
const COLUMN_TITLE: TextStyle = TextStyle::new(StandardFont::HelveticaBold, 10.0, palette::TEXT);
const BODY: TextStyle = TextStyle::new(StandardFont::Helvetica, 10.0, palette::TEXT);
const BODY_BOLD: TextStyle = TextStyle::new(StandardFont::HelveticaBold, 10.0, palette::TEXT);
const CELL: TextStyle = TextStyle::new(StandardFont::Helvetica, 9.0, palette::TEXT);
const TOTAL: TextStyle = TextStyle::new(StandardFont::HelveticaBold, 12.0, palette::TEXT);
const FOOTER: TextStyle = TextStyle::new(StandardFont::Helvetica, 8.0, palette::FOOTER_TEXT);

/// Horizontal geometry of the item table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableColumns {
    pub starts: [f64; 4],
    pub widths: [f64; 4],
}

impl TableColumns {
    fn for_cursor(cursor: &LayoutCursor) -> Self {
        let width = cursor.content_width();
        let widths = COLUMN_FRACTIONS.map(|fraction| width * fraction);
        let mut starts = [cursor.left(); 4];
        for i in 1..4 {
            starts[i] = starts[i - 1] + widths[i - 1];
        }
        Self { starts, widths }
    }
}

/// Laid out pages plus the resources they refer to
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub pages: Vec<PageBuffer>,
    /// Decoded logo, present only when a `DrawOp::Logo` was emitted
    pub logo: Option<DecodedLogo>,
    /// Item rows placed on each page, parallel to `pages`
    pub item_rows: Vec<usize>,
    pub title: String,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lay out a quotation without serializing it
pub fn layout_quotation(
    quotation: &QuotationRecord,
    logo: Option<&LogoImage>,
    options: &RenderOptions,
) -> RendererResult<LaidOutDocument> {
    options.validate()?;
    quotation.validate_amounts()?;

    let logo = logo.and_then(decode_logo);
    let generated_at = options
        .generated_at
        .unwrap_or_else(|| Local::now().naive_local());

    let mut layout = QuotationLayout::new(options);
    let cursor = layout.first_cursor();
    let cursor = layout.draw_logo(cursor, logo.as_ref());
    let cursor = layout.draw_header(cursor, quotation);
    let cursor = layout.draw_info_block(cursor, quotation);
    let (cursor, columns) = layout.draw_item_table(cursor, quotation);
    let cursor = layout.draw_total(cursor, quotation, &columns);
    let cursor = layout.draw_notes(cursor, quotation);
    layout.draw_footer(cursor, generated_at);
    layout.stamp_page_numbers();

    debug!(
        "Laid out quotation {}: {} page(s), {} item row(s)",
        quotation.quotation_number,
        layout.pages.len(),
        quotation.items.len()
    );

    Ok(LaidOutDocument {
        pages: layout.pages,
        logo,
        item_rows: layout.item_rows,
        title: format!("{} {}", options.labels.title, quotation.quotation_number),
    })
}

struct QuotationLayout<'a> {
    options: &'a RenderOptions,
    labels: &'a Labels,
    pages: Vec<PageBuffer>,
    item_rows: Vec<usize>,
}

impl<'a> QuotationLayout<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            labels: &options.labels,
            pages: vec![PageBuffer::new(options.page_size)],
            item_rows: vec![0],
        }
    }

    fn first_cursor(&self) -> LayoutCursor {
        LayoutCursor::new(self.options.page_size, Margins::all(self.options.margin))
    }

    fn page(&mut self, cursor: &LayoutCursor) -> &mut PageBuffer {
        &mut self.pages[cursor.page_index()]
    }

    /// Commit the current page and continue at the top of a fresh one
    fn start_new_page(&mut self, cursor: LayoutCursor) -> LayoutCursor {
        self.pages.push(PageBuffer::new(cursor.page_size()));
        self.item_rows.push(0);
        debug!("Page {} full at y={:.2}, starting page {}", cursor.page_index() + 1, cursor.y(), self.pages.len());
        cursor.next_page()
    }

    /// Draw one line of text; returns the vertical space it consumes
    fn text(&mut self, cursor: &LayoutCursor, x: f64, y: f64, text: impl Into<String>, style: TextStyle) -> f64 {
        self.page(cursor).push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            font: style.font,
            size: style.size,
            color: style.color,
        });
        style.size + TEXT_PADDING
    }

    fn rect(&mut self, cursor: &LayoutCursor, rect: Rect, fill: Color) {
        self.page(cursor).push(DrawOp::Rect { rect, fill });
    }

    fn rule(&mut self, cursor: &LayoutCursor, y: f64, color: Color) {
        let (x1, x2) = (cursor.left(), cursor.right());
        self.page(cursor).push(DrawOp::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            color,
            thickness: 1.0,
        });
    }

    /// Logo hangs from the top-right corner, centered on the top margin line
    fn draw_logo(&mut self, cursor: LayoutCursor, logo: Option<&DecodedLogo>) -> LayoutCursor {
        let Some(logo) = logo else {
            return cursor;
        };

        let width = self.options.logo_width;
        let height = logo.scaled_height(width);
        let x = cursor.right() - width;
        let y = cursor.top() - height / 2.0;
        debug!("Placing logo at ({:.2}, {:.2}) size {:.2}x{:.2}", x, y, width, height);
        self.page(&cursor).push(DrawOp::Logo { x, y, width, height });
        cursor
    }

    fn draw_header(&mut self, mut cursor: LayoutCursor, quotation: &QuotationRecord) -> LayoutCursor {
        let x = cursor.left();
        let used = self.text(&cursor, x, cursor.y(), self.labels.title.clone(), TITLE);
        cursor.advance(used);

        let number = format!("{} {}", self.labels.number_prefix, quotation.quotation_number);
        let used = self.text(&cursor, x, cursor.y(), number, SUBTITLE);
        cursor.advance(used + 20.0);
        cursor
    }

    /// Client data on the left, quotation details on the right
    fn draw_info_block(&mut self, mut cursor: LayoutCursor, quotation: &QuotationRecord) -> LayoutCursor {
        let column_width = cursor.content_width() / 2.0 - 10.0;
        let left_x = cursor.left();
        let right_x = left_x + column_width + 20.0;
        let labels = self.labels;

        let no_client = Client::default();
        let client = quotation.client.as_ref().unwrap_or(&no_client);
        let field = |value: &Option<String>| value.as_deref().unwrap_or("").to_string();

        let mut left_y = cursor.y();
        left_y -= self.text(&cursor, left_x, left_y, labels.client_section.clone(), BODY_BOLD);
        left_y -= 15.0;
        self.rect(&cursor, Rect::from_top(left_x, left_y, column_width, FRAME_HEIGHT), palette::LIGHT_GRAY);
        let name = format!("{} {}", labels.client_name, field(&client.name));
        left_y -= self.text(&cursor, left_x, left_y - 15.0, name, BODY);
        left_y -= 25.0;
        let lines = [
            format!("{} {}", labels.client_email, field(&client.email)),
            format!("{} {}", labels.client_phone, field(&client.phone)),
            format!("{} {}", labels.client_address, field(&client.address)),
            format!(
                "{} {}",
                labels.client_location,
                format_location(client.city.as_deref(), client.state.as_deref())
            ),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                left_y -= 20.0;
            }
            self.text(&cursor, left_x, left_y, line, BODY);
        }

        let mut right_y = cursor.y();
        right_y -= self.text(&cursor, right_x, right_y, labels.details_section.clone(), BODY_BOLD);
        right_y -= 15.0;
        self.rect(&cursor, Rect::from_top(right_x, right_y, column_width, FRAME_HEIGHT), palette::LIGHT_GRAY);
        let issued = format!("{} {}", labels.issue_date, format_date(quotation.issue_date));
        right_y -= self.text(&cursor, right_x, right_y - 15.0, issued, BODY);
        right_y -= 25.0;
        let valid = format!("{} {}", labels.valid_until, format_date(quotation.valid_until));
        self.text(&cursor, right_x, right_y, valid, BODY);
        right_y -= 20.0;
        self.text(&cursor, right_x, right_y, format!("{} ", labels.status), BODY);
        let (status_text, status_color) = status_display(&quotation.status, labels);
        let status_style = match status_color {
            Some(color) => BODY_BOLD.with_color(color),
            None => BODY,
        };
        self.text(&cursor, right_x + STATUS_VALUE_OFFSET, right_y, status_text.to_string(), status_style);

        cursor.move_down_to(left_y.min(right_y) - 40.0);
        cursor
    }

    fn draw_table_header(&mut self, mut cursor: LayoutCursor, columns: &TableColumns) -> LayoutCursor {
        let rect = Rect::from_top(cursor.left(), cursor.y(), cursor.content_width(), HEADER_ROW_HEIGHT);
        self.rect(&cursor, rect, palette::LIGHT_GRAY);
        cursor.advance(17.0);

        let titles = [
            self.labels.column_description.clone(),
            self.labels.column_quantity.clone(),
            self.labels.column_unit_price.clone(),
            self.labels.column_total.clone(),
        ];
        for (start, title) in columns.starts.iter().zip(titles) {
            self.text(&cursor, start + CELL_PADDING, cursor.y(), title, COLUMN_TITLE);
        }

        cursor.advance(20.0);
        self.rule(&cursor, cursor.y() + 10.0, palette::TEXT);
        cursor
    }

    fn draw_continuation_page(&mut self, cursor: LayoutCursor, columns: &TableColumns) -> LayoutCursor {
        let mut cursor = self.start_new_page(cursor);
        let used = self.text(&cursor, cursor.left(), cursor.y(), self.labels.continuation.clone(), CONTINUATION);
        cursor.advance(used + 20.0);
        self.draw_table_header(cursor, columns)
    }

    fn draw_item_table(&mut self, mut cursor: LayoutCursor, quotation: &QuotationRecord) -> (LayoutCursor, TableColumns) {
        let columns = TableColumns::for_cursor(&cursor);
        let used = self.text(&cursor, cursor.left(), cursor.y(), self.labels.items_section.clone(), SECTION);
        cursor.advance(used + 10.0);
        cursor = self.draw_table_header(cursor, &columns);

        if quotation.items.is_empty() {
            cursor.advance(30.0);
            let placeholder = self.labels.no_items.clone();
            let width = BODY.font.text_width(&placeholder, BODY.size);
            let x = cursor.left() + (cursor.content_width() - width) / 2.0;
            self.text(&cursor, x, cursor.y(), placeholder, BODY);
            cursor.advance(20.0);
            return (cursor, columns);
        }

        for (index, item) in quotation.items.iter().enumerate() {
            if cursor.needs_break(ITEM_BREAK_THRESHOLD) {
                cursor = self.draw_continuation_page(cursor, &columns);
            }

            let y = cursor.y();
            if index % 2 == 0 {
                let band = Rect::from_top(cursor.left(), y + 10.0, cursor.content_width(), ROW_HEIGHT);
                self.rect(&cursor, band, palette::ROW_TINT);
            }

            let description = truncate_to_width(
                &item.description,
                CELL.font,
                CELL.size,
                columns.widths[0] - 2.0 * CELL_PADDING,
            )
            .into_owned();
            let cells = [
                description,
                format_quantity(item.quantity),
                format_currency(item.unit_price),
                format_currency(item.total_price),
            ];
            for (start, cell) in columns.starts.iter().zip(cells) {
                self.text(&cursor, start + CELL_PADDING, y, cell, CELL);
            }

            cursor.advance(ROW_HEIGHT);
            self.rule(&cursor, cursor.y() + 10.0, palette::ROW_RULE);
            self.item_rows[cursor.page_index()] += 1;
        }

        (cursor, columns)
    }

    fn draw_total(&mut self, mut cursor: LayoutCursor, quotation: &QuotationRecord, columns: &TableColumns) -> LayoutCursor {
        if cursor.needs_break(ITEM_BREAK_THRESHOLD + TOTAL_LINE_GAP) {
            cursor = self.start_new_page(cursor);
        }
        cursor.advance(TOTAL_LINE_GAP);

        let label = self.labels.total.clone();
        let label_width = TOTAL.font.text_width(&label, TOTAL.size);
        let total_x = columns.starts[3];
        self.text(&cursor, total_x - CELL_PADDING - label_width, cursor.y(), label, TOTAL);
        let amount = format_currency(quotation.total_amount);
        self.text(&cursor, total_x + CELL_PADDING, cursor.y(), amount, TOTAL.with_color(palette::PRIMARY));
        cursor
    }

    fn draw_notes(&mut self, mut cursor: LayoutCursor, quotation: &QuotationRecord) -> LayoutCursor {
        let Some(notes) = quotation.trimmed_notes() else {
            return cursor;
        };

        cursor.advance(40.0);
        if cursor.needs_break(NOTES_BREAK_THRESHOLD) {
            cursor = self.start_new_page(cursor);
        }

        let used = self.text(&cursor, cursor.left(), cursor.y(), self.labels.notes_section.clone(), SECTION);
        cursor.advance(used + 10.0);

        let top = cursor.y();
        let rect = Rect::from_top(cursor.left(), top, cursor.content_width(), NOTES_BOX_HEIGHT);
        self.rect(&cursor, rect, palette::NOTES_BACKGROUND);

        let wrapped = wrap_fixed_chars(notes, self.options.notes_max_chars_per_line, NOTES_MAX_LINES);
        if wrapped.truncated {
            debug!("Notes truncated to {} lines", NOTES_MAX_LINES);
        }
        let x = cursor.left() + 10.0;
        let mut line_y = top - 15.0;
        for line in wrapped.lines {
            if !line.is_empty() {
                self.text(&cursor, x, line_y, line, CELL);
            }
            line_y -= NOTES_LINE_HEIGHT;
        }

        cursor.advance(NOTES_BOX_HEIGHT + 10.0);
        cursor
    }

    /// Footer block on the last page
    fn draw_footer(&mut self, mut cursor: LayoutCursor, generated_at: NaiveDateTime) -> LayoutCursor {
        if cursor.needs_break(FOOTER_BREAK_THRESHOLD) {
            cursor = self.start_new_page(cursor);
        }

        cursor.move_down_to(cursor.margins().bottom + FOOTER_RULE_OFFSET);
        self.rule(&cursor, cursor.y(), palette::PRIMARY);

        cursor.advance(20.0);
        let disclaimer = self.labels.footer_disclaimer.clone();
        self.text(&cursor, cursor.left(), cursor.y(), disclaimer, FOOTER);

        cursor.advance(10.0);
        let generated = self
            .labels
            .footer_generated(&format_date(generated_at.date()), &format_time(generated_at));
        self.text(&cursor, cursor.left(), cursor.y(), generated, FOOTER);
        cursor
    }

    /// Final pass over every committed page
    fn stamp_page_numbers(&mut self) {
        let total = self.pages.len();
        for (index, page) in self.pages.iter_mut().enumerate() {
            page.push(DrawOp::Text {
                x: page.size.width - STAMP_RIGHT_OFFSET,
                y: STAMP_BASELINE,
                text: self.labels.page_stamp(index + 1, total),
                font: FOOTER.font,
                size: FOOTER.size,
                color: FOOTER.color,
            });
        }
    }
}
