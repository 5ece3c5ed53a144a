//! Unicode utilities for PDF text rendering
//!
//! The standard Type1 fonts are written with `/Encoding /WinAnsiEncoding`
//! (Windows code page 1252), which covers every Portuguese letter. Text is
//! converted to that single-byte encoding before it goes into a content stream.

/// Character emitted for anything WinAnsiEncoding cannot represent
pub const REPLACEMENT: u8 = b'?';

/// Encode a single character, `None` if it has no WinAnsi code
pub fn winansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        // ASCII and the Latin-1 upper half share their code points
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Convert a Unicode string to WinAnsiEncoding bytes.
///
/// Tabs become spaces, other control characters are dropped and anything
/// outside the code page is replaced with `?`.
pub fn unicode_to_winansi(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '\t' => result.push(b' '),
            ch if ch.is_control() => {}
            ch => result.push(winansi_byte(ch).unwrap_or(REPLACEMENT)),
        }
    }

    result
}
