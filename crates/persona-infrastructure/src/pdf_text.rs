//! Text encoding and measurement for the standard Helvetica fonts.
//!
//! Strings are written with `WinAnsiEncoding`, so everything is mapped to
//! single bytes first; characters outside that set become `?`.

use encoding_rs::{EncoderResult, WINDOWS_1252};

/// Helvetica advance widths for 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica advance widths for WinAnsi 0x80..=0xFF. Unassigned slots use the default.
const HELVETICA_UPPER_WIDTHS: [u16; 128] = [
    556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556, // 0x80
    556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

const DEFAULT_WIDTH: u16 = 556;
/// Bold glyphs run wider; this keeps wrapped bold lines inside the margin.
const BOLD_FACTOR: f32 = 1.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
}

impl Face {
    /// Resource name inside the page's font dictionary.
    pub fn resource(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Oblique => "F3",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
            Face::Oblique => "Helvetica-Oblique",
        }
    }
}

/// Encodes `text` as WinAnsi bytes.
///
/// Control characters become spaces; characters with no WinAnsi code
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let printable: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let mut encoder = WINDOWS_1252.new_encoder();
    let mut bytes = Vec::with_capacity(printable.len());
    let mut buffer = [0u8; 256];
    let mut remaining = printable.as_str();
    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(remaining, &mut buffer, true);
        bytes.extend_from_slice(&buffer[..written]);
        remaining = &remaining[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => bytes.push(b'?'),
        }
    }
    bytes
}

fn byte_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => HELVETICA_WIDTHS[usize::from(byte - 0x20)],
        0x80..=0xFF => HELVETICA_UPPER_WIDTHS[usize::from(byte - 0x80)],
        _ => DEFAULT_WIDTH,
    }
}

/// Width of `text` in points at `size`.
pub fn text_width(text: &str, face: Face, size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| u32::from(byte_width(b)))
        .sum();
    let width = units as f32 * size / 1000.0;
    match face {
        Face::Bold => width * BOLD_FACTOR,
        Face::Regular | Face::Oblique => width,
    }
}

/// Greedy word wrap. Words longer than a whole line are split by char.
pub fn wrap(text: &str, face: Face, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if text_width(&candidate, face, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, face, size) <= max_width {
                current = word.to_string();
            } else {
                for c in word.chars() {
                    current.push(c);
                    if text_width(&current, face, size) > max_width {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
