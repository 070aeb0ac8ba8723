//! Character predicates used throughout the scanners: whitespace, line terminators, identifier
//! categories, and digit classes.

use unicode_general_category::{get_general_category, GeneralCategory};

/// `true` for a line terminator: LF, CR, LS (U+2028), or PS (U+2029).
///
/// CRLF is two line terminators back to back as far as this predicate is concerned; the caller
/// (see [`crate::lexer::Lexer`]) treats the pair as a single skip when walking whitespace.
#[inline]
#[must_use]
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\u{000A}' | '\u{000D}' | '\u{2028}' | '\u{2029}')
}

/// `true` for any code point the lexer treats as whitespace, including line terminators.
///
/// Covers ASCII space/tab/VT/FF, the line terminators, and the Unicode `Space_Separator`
/// category plus NBSP, BOM/ZWNBSP, and Ogham space mark (see the table in ECMA-262 `WhiteSpace`).
#[must_use]
pub fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\u{0009}' | '\u{000B}' | '\u{000C}' | '\u{0020}' | '\u{00A0}' | '\u{FEFF}' |
        '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    ) || is_line_terminator(ch)
}

/// `true` for `$`, `_`, ZWNJ (U+200C), and ZWJ (U+200D): the JavaScript-specific additions to
/// `IdentifierPart` beyond Unicode `ID_Continue`.
#[inline]
#[must_use]
fn is_extra_identifier_part(ch: char) -> bool {
    matches!(ch, '$' | '_' | '\u{200C}' | '\u{200D}')
}

/// `true` if `ch` may start a JavaScript identifier: Unicode `ID_Start`, `$`, or `_`.
#[must_use]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || is_unicode_id_start(ch)
}

/// `true` if `ch` may continue a JavaScript identifier: Unicode `ID_Continue`, `$`, `_`, ZWNJ, or
/// ZWJ.
#[must_use]
pub fn is_identifier_part(ch: char) -> bool {
    is_extra_identifier_part(ch) || is_unicode_id_continue(ch)
}

/// The handful of code points Unicode adds to `ID_Start` beyond the letter-ish general
/// categories (`Other_ID_Start`, Unicode 13.0). This table is short and has been stable across
/// Unicode versions for a long time.
const OTHER_ID_START: [char; 4] = ['\u{1885}', '\u{1886}', '\u{2118}', '\u{212E}'];

/// The code points Unicode adds to `ID_Continue` beyond `ID_Start` plus the mark/digit/connector
/// categories (`Other_ID_Continue`, Unicode 13.0).
const OTHER_ID_CONTINUE: [char; 10] = [
    '\u{00B7}', '\u{0387}', '\u{1369}', '\u{136A}', '\u{136B}', '\u{136C}', '\u{136D}', '\u{136E}',
    '\u{136F}', '\u{19DA}',
];

fn is_unicode_id_start(ch: char) -> bool {
    OTHER_ID_START.contains(&ch)
        || matches!(
            get_general_category(ch),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::LetterNumber
        )
}

fn is_unicode_id_continue(ch: char) -> bool {
    is_unicode_id_start(ch)
        || OTHER_ID_CONTINUE.contains(&ch)
        || matches!(
            get_general_category(ch),
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::DecimalNumber
                | GeneralCategory::ConnectorPunctuation
        )
}

#[inline]
#[must_use]
pub fn is_decimal_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

#[inline]
#[must_use]
pub fn is_hex_digit(ch: u8) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
#[must_use]
pub fn is_binary_digit(ch: u8) -> bool {
    matches!(ch, b'0' | b'1')
}

#[inline]
#[must_use]
pub fn is_octal_digit(ch: u8) -> bool {
    matches!(ch, b'0'..=b'7')
}

/// `true` for an ASCII control byte other than the whitespace/line-terminator bytes handled
/// elsewhere: these are reported as [`crate::error::ErrorKind::UnexpectedControlCharacter`] and
/// then skipped like whitespace.
#[inline]
#[must_use]
pub fn is_stray_ascii_control(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0E..=0x1F | 0x7F)
}
