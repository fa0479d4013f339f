//! PDF standard Type 1 fonts used on the receipt, with their advance widths.
//!
//! Text is written in WinAnsiEncoding. Widths are in 1/1000 em per WinAnsi
//! code, taken from the Adobe core font metrics.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Courier,
    HelveticaBold,
    TimesBold,
}

/// Byte written for characters WinAnsi cannot encode.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Unicode characters at WinAnsi codes 0x80..=0x9F. `None` marks the five
/// unassigned codes.
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// WinAnsi code of `c`, if the encoding has one. Control characters have
/// none.
pub fn win_ansi_code(c: char) -> Option<u8> {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&mapped| mapped == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encodes `text` as WinAnsi bytes, substituting [`REPLACEMENT_BYTE`].
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(REPLACEMENT_BYTE))
        .collect()
}

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Codes 0x80..=0xFF; zero at the unassigned codes.
#[rustfmt::skip]
const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_BOLD_HIGH_WIDTHS: [u16; 128] = [
    500, 0, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 1000, 0, 667, 0,
    0, 333, 333, 500, 500, 350, 500, 1000, 333, 1000, 389, 333, 722, 0, 444, 722,
    250, 333, 500, 500, 500, 500, 220, 500, 333, 747, 300, 500, 570, 333, 747, 333,
    400, 570, 300, 300, 333, 556, 540, 250, 333, 300, 330, 500, 750, 750, 750, 500,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 389, 389, 389, 389,
    722, 722, 778, 778, 778, 778, 778, 570, 778, 722, 722, 722, 722, 722, 611, 556,
    500, 500, 500, 500, 500, 500, 722, 444, 444, 444, 444, 444, 278, 278, 278, 278,
    500, 556, 500, 500, 500, 500, 500, 570, 500, 556, 556, 556, 556, 500, 556, 500,
];

impl StandardFont {
    pub const ALL: [StandardFont; 3] = [
        StandardFont::Courier,
        StandardFont::HelveticaBold,
        StandardFont::TimesBold,
    ];

    /// The `BaseFont` name written into the font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Courier => "Courier",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesBold => "Times-Bold",
        }
    }

    /// Key of this font in the page's `/Font` resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Courier => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::TimesBold => "F3",
        }
    }

    /// Advance width of one WinAnsi code.
    fn advance(self, code: u8) -> u16 {
        let (low, high) = match self {
            StandardFont::Courier => return 600,
            StandardFont::HelveticaBold => (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_HIGH_WIDTHS),
            StandardFont::TimesBold => (&TIMES_BOLD_WIDTHS, &TIMES_BOLD_HIGH_WIDTHS),
        };
        match code {
            32..=126 => low[(code - 32) as usize],
            0x80..=0xFF => high[(code - 0x80) as usize],
            _ => low[(REPLACEMENT_BYTE - 32) as usize],
        }
    }

    /// Rendered width of `text` at `size` points, as it will be encoded.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| self.advance(code) as u32)
            .sum();
        units as f32 * size / 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub face: StandardFont,
    pub size: f32,
}

impl FontSpec {
    pub const fn new(face: StandardFont, size: f32) -> Self {
        Self { face, size }
    }

    pub fn width_of(&self, text: &str) -> f32 {
        self.face.text_width(text, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courier_is_monospaced() {
        assert_eq!(StandardFont::Courier.text_width("ABC", 10.0), 18.0);
        assert_eq!(StandardFont::Courier.text_width("iii", 10.0), 18.0);
    }

    #[test]
    fn proportional_widths_follow_metrics() {
        assert_eq!(StandardFont::HelveticaBold.text_width("1", 1000.0), 556.0);
        assert_eq!(StandardFont::TimesBold.text_width("W", 1000.0), 1000.0);
        assert!(
            StandardFont::TimesBold.text_width("i", 20.0)
                < StandardFont::TimesBold.text_width("m", 20.0)
        );
    }

    #[test]
    fn tables_cover_printable_ascii() {
        assert_eq!(HELVETICA_BOLD_WIDTHS.len(), ('~' as usize) - (' ' as usize) + 1);
        assert_eq!(StandardFont::HelveticaBold.text_width("~", 1000.0), 584.0);
        assert_eq!(StandardFont::TimesBold.text_width("~", 1000.0), 520.0);
    }

    #[test]
    fn accented_letters_measure_like_their_base_letter() {
        for face in StandardFont::ALL {
            assert_eq!(face.text_width("é", 10.0), face.text_width("e", 10.0), "{face:?}");
            assert_eq!(face.text_width("Ö", 10.0), face.text_width("O", 10.0), "{face:?}");
        }
        assert_eq!(StandardFont::HelveticaBold.text_width("\u{A9}", 1000.0), 737.0);
        assert_eq!(StandardFont::TimesBold.text_width("\u{DF}", 1000.0), 556.0);
    }

    #[test]
    fn high_range_glyphs_have_metrics() {
        assert_eq!(StandardFont::HelveticaBold.text_width("\u{20AC}", 1000.0), 556.0);
        assert_eq!(StandardFont::HelveticaBold.text_width("\u{2014}", 1000.0), 1000.0);
        assert_eq!(StandardFont::TimesBold.text_width("\u{201C}", 1000.0), 500.0);
        for face in StandardFont::ALL {
            for c in WIN_ANSI_HIGH.iter().flatten() {
                assert!(face.text_width(&c.to_string(), 1000.0) > 0.0, "{face:?} {c:?}");
            }
        }
    }

    #[test]
    fn unencodable_text_measures_as_replacement() {
        let face = StandardFont::HelveticaBold;
        assert_eq!(face.text_width("\u{4E2D}", 10.0), face.text_width("?", 10.0));
        assert_eq!(face.text_width("\u{85}", 10.0), face.text_width("?", 10.0));
    }

    #[test]
    fn win_ansi_maps_typographic_characters() {
        assert_eq!(win_ansi_code('\u{20AC}'), Some(0x80));
        assert_eq!(win_ansi_code('\u{2019}'), Some(0x92));
        assert_eq!(win_ansi_code('\u{2014}'), Some(0x97));
        assert_eq!(win_ansi_code('\u{178}'), Some(0x9F));
        assert_eq!(win_ansi_code('\u{E9}'), Some(0xE9));
        // C1 controls share the byte values but not the glyphs.
        assert_eq!(win_ansi_code('\u{80}'), None);
        assert_eq!(win_ansi_code('\u{9F}'), None);
        assert_eq!(win_ansi_code('\n'), None);
        assert_eq!(win_ansi_code('\u{4E2D}'), None);
    }

    #[test]
    fn encoding_substitutes_unmappable_characters() {
        assert_eq!(encode_win_ansi("a\u{20AC}b"), vec![b'a', 0x80, b'b']);
        assert_eq!(encode_win_ansi("caf\u{E9}"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("x\u{4E2D}\u{81}"), b"x??".to_vec());
    }

    #[test]
    fn resource_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            StandardFont::ALL.iter().map(|f| f.resource_name()).collect();
        assert_eq!(names.len(), StandardFont::ALL.len());
    }
}
