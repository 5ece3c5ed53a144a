//! Text measurement and line breaking
//!
//! Widths come from the Adobe AFM metrics of the two standard fonts the
//! renderer uses, expressed in 1/1000 em. Accented Latin letters measure as
//! their base letter, which matches the AFM tables for Helvetica.

use std::borrow::Cow;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Standard Type1 fonts available to the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    /// PostScript name written as `/BaseFont`
    pub fn base_font(self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    /// Name under which the font is registered in page resources
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"F1",
            StandardFont::HelveticaBold => b"F2",
        }
    }

    fn ascii_widths(self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of one character in 1/1000 em
    pub fn char_width(self, ch: char) -> u16 {
        let ch = fold_accent(ch);
        match ch as u32 {
            code @ 0x20..=0x7E => self.ascii_widths()[(code - 0x20) as usize],
            _ => match ch {
                'ª' | 'º' => match self {
                    StandardFont::Helvetica => 370,
                    StandardFont::HelveticaBold => 365,
                },
                '…' => 1000,
                _ => DEFAULT_WIDTH,
            },
        }
    }

    /// Width of `text` in points at `font_size`
    pub fn text_width(self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        units as f64 * font_size / 1000.0
    }
}

const DEFAULT_WIDTH: u16 = 556;

// ' ' through '~'
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn fold_accent(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`
pub fn truncate_to_width(text: &str, font: StandardFont, font_size: f64, max_width: f64) -> Cow<'_, str> {
    if font.text_width(text, font_size) <= max_width {
        return Cow::Borrowed(text);
    }

    let budget = max_width - font.text_width(ELLIPSIS, font_size);
    let mut used = 0.0;
    let mut kept = String::new();
    for ch in text.chars() {
        let advance = font.char_width(ch) as f64 * font_size / 1000.0;
        if used + advance > budget {
            break;
        }
        used += advance;
        kept.push(ch);
    }

    let mut truncated = kept.trim_end().to_string();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

/// Result of wrapping a block of text into a fixed-capacity box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    /// Text was cut to fit and the last line ends with [`ELLIPSIS`]
    pub truncated: bool,
}

/// Greedy fixed-width wrapping by character count.
///
/// A line is closed when it reaches `max_chars` characters or at an explicit
/// line break; word boundaries are not considered. When more than `max_lines`
/// lines result, the first `max_lines` are kept and the last one is shortened
/// so that it ends with `...` without exceeding `max_chars`.
pub fn wrap_fixed_chars(text: &str, max_chars: usize, max_lines: usize) -> WrappedText {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut just_wrapped = false;

    for ch in text.chars() {
        match ch {
            '\r' => continue,
            '\n' => {
                // A break right after a width wrap would only add a blank line
                if !just_wrapped {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                just_wrapped = false;
            }
            ch => {
                current.push(ch);
                current_len += 1;
                just_wrapped = false;
                if current_len >= max_chars {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                    just_wrapped = true;
                }
            }
        }
    }
    if current_len > 0 {
        lines.push(current);
    }

    if lines.len() <= max_lines {
        return WrappedText { lines, truncated: false };
    }

    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let keep = max_chars.saturating_sub(ELLIPSIS.len());
        let mut shortened: String = last.chars().take(keep).collect();
        shortened.truncate(shortened.trim_end().len());
        shortened.push_str(ELLIPSIS);
        *last = shortened;
    }
    WrappedText { lines, truncated: true }
}
