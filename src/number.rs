//! Numeric literal scanning: decimal, binary, modern and legacy octal, hex, and BigInt suffixes.
//!
//! No value is computed here; the token only ever carries its span. See the crate-level docs for
//! the rationale (value construction belongs to a downstream evaluator, not the lexer).

use crate::char_class::{is_binary_digit, is_decimal_digit, is_hex_digit, is_identifier_part, is_octal_digit};
use crate::error::ErrorKind;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

impl<'b, S: crate::error::DiagnosticSink> Lexer<'b, S> {
    /// Scans a numeric literal starting at `self.pos`, which must be a decimal digit or a `.`
    /// immediately followed by a decimal digit.
    pub(crate) fn scan_number(&mut self, has_leading_newline: bool) -> Token {
        let begin = self.pos;

        if self.buffer.byte_at(self.pos) == b'0' {
            match self.buffer.byte_at(self.pos + 1) {
                b'b' | b'B' => return self.scan_radix_number(begin, has_leading_newline, 2, is_binary_digit, "binary"),
                b'o' | b'O' => return self.scan_radix_number(begin, has_leading_newline, 8, is_octal_digit, "octal"),
                b'x' | b'X' => return self.scan_radix_number(begin, has_leading_newline, 16, is_hex_digit, "hex"),
                b'0'..=b'9' => return self.scan_legacy_octal(begin, has_leading_newline),
                _ => {}
            }
        }

        self.scan_decimal(begin, has_leading_newline)
    }

    fn scan_radix_number(
        &mut self,
        begin: usize,
        has_leading_newline: bool,
        radix_label_mode: u32,
        is_digit: fn(u8) -> bool,
        mode: &'static str,
    ) -> Token {
        let prefix_end = self.pos + 2;
        self.pos = prefix_end;
        let digits_begin = self.pos;
        self.scan_digit_run(is_digit, mode);

        if self.pos == digits_begin {
            let kind = match radix_label_mode {
                2 => ErrorKind::NoDigitsInBinaryNumber,
                8 => ErrorKind::NoDigitsInOctalNumber,
                _ => ErrorKind::NoDigitsInHexNumber,
            };
            self.report(kind, "number", Span::new(begin as u32, prefix_end as u32));
        }

        if self.buffer.byte_at(self.pos) == b'n' {
            self.pos += 1;
        }

        self.scan_trailing_garbage(begin, mode);
        Token::new(TokenKind::Number, begin as u32, self.pos as u32, has_leading_newline)
    }

    /// Leading `0` followed by another decimal digit. Reclassifies to decimal if any digit in the
    /// run is `8` or `9`; otherwise treats the run as octal and flags fraction/exponent/BigInt.
    fn scan_legacy_octal(&mut self, begin: usize, has_leading_newline: bool) -> Token {
        let digits_begin = self.pos;
        let mut saw_non_octal_digit = false;

        while is_decimal_digit(self.buffer.byte_at(self.pos)) {
            if !is_octal_digit(self.buffer.byte_at(self.pos)) {
                saw_non_octal_digit = true;
            }
            self.pos += 1;
        }
        let digits_end = self.pos;

        if saw_non_octal_digit {
            // Not actually octal: fall back to ordinary decimal scanning of the fraction/exponent,
            // starting over from `begin` so `.`/`e` after the digit run are handled uniformly.
            self.pos = begin;
            return self.scan_decimal(begin, has_leading_newline);
        }

        let mut had_decimal = false;
        let mut had_exponent = false;
        if self.buffer.byte_at(self.pos) == b'.' {
            had_decimal = true;
            self.pos += 1;
            self.scan_digit_run(is_decimal_digit, "number");
        }
        if matches!(self.buffer.byte_at(self.pos), b'e' | b'E') {
            had_exponent = true;
            self.pos += 1;
            self.scan_exponent_sign_and_digits(begin);
        }

        if had_decimal {
            self.report(
                ErrorKind::OctalLiteralMayNotHaveDecimal,
                "number",
                Span::new(digits_begin as u32, digits_end as u32),
            );
        }
        if had_exponent {
            self.report(
                ErrorKind::OctalLiteralMayNotHaveExponent,
                "number",
                Span::new(digits_begin as u32, digits_end as u32),
            );
        }
        if self.buffer.byte_at(self.pos) == b'n' {
            self.report(
                ErrorKind::OctalLiteralMayNotBeBigInt,
                "number",
                Span::new(self.pos as u32, (self.pos + 1) as u32),
            );
            self.pos += 1;
        }

        self.scan_trailing_garbage(begin, "number");
        Token::new(TokenKind::Number, begin as u32, self.pos as u32, has_leading_newline)
    }

    fn scan_decimal(&mut self, begin: usize, has_leading_newline: bool) -> Token {
        self.scan_digit_run(is_decimal_digit, "number");

        let mut had_decimal = false;
        let mut had_exponent = false;

        if self.buffer.byte_at(self.pos) == b'.' {
            had_decimal = true;
            self.pos += 1;
            self.scan_digit_run(is_decimal_digit, "number");
        }
        if matches!(self.buffer.byte_at(self.pos), b'e' | b'E') {
            had_exponent = true;
            self.pos += 1;
            self.scan_exponent_sign_and_digits(begin);
        }

        if self.buffer.byte_at(self.pos) == b'n' {
            if had_decimal {
                self.report(
                    ErrorKind::BigIntLiteralContainsDecimalPoint,
                    "number",
                    Span::new(begin as u32, self.pos as u32),
                );
            }
            if had_exponent {
                self.report(
                    ErrorKind::BigIntLiteralContainsExponent,
                    "number",
                    Span::new(begin as u32, self.pos as u32),
                );
            }
            self.pos += 1;
        }

        self.scan_trailing_garbage(begin, "number");
        Token::new(TokenKind::Number, begin as u32, self.pos as u32, has_leading_newline)
    }

    /// Scans `[+-]?` then a digit run; an exponent marker with no following digits (after an
    /// optional sign) reports *unexpected characters in number* over the stray byte(s), which
    /// [`scan_trailing_garbage`](Self::scan_trailing_garbage) then also picks up as garbage.
    fn scan_exponent_sign_and_digits(&mut self, begin: usize) {
        if matches!(self.buffer.byte_at(self.pos), b'+' | b'-') {
            self.pos += 1;
        }
        let digits_begin = self.pos;
        self.scan_digit_run(is_decimal_digit, "number");
        if self.pos == digits_begin {
            self.report(
                ErrorKind::UnexpectedCharactersInNumber,
                "number",
                Span::new(begin as u32, self.pos as u32),
            );
        }
    }

    /// Scans a run of `is_digit` bytes, allowing `_` as a non-consecutive, non-leading,
    /// non-trailing separator. Each violation is its own diagnostic; the run is still consumed.
    fn scan_digit_run(&mut self, is_digit: fn(u8) -> bool, _mode: &'static str) {
        let run_begin = self.pos;
        let mut last_was_underscore = false;
        let mut last_was_digit = false;

        loop {
            let byte = self.buffer.byte_at(self.pos);
            if is_digit(byte) {
                last_was_digit = true;
                last_was_underscore = false;
                self.pos += 1;
            } else if byte == b'_' {
                if last_was_underscore {
                    let run_end = {
                        let mut p = self.pos;
                        while self.buffer.byte_at(p) == b'_' {
                            p += 1;
                        }
                        p
                    };
                    self.report(
                        ErrorKind::NumberLiteralContainsConsecutiveUnderscores,
                        "number",
                        Span::new((self.pos - 1) as u32, run_end as u32),
                    );
                    self.pos = run_end;
                    last_was_underscore = true;
                    continue;
                }
                if !last_was_digit {
                    self.report(
                        ErrorKind::NumberLiteralContainsTrailingUnderscores,
                        "number",
                        Span::new(self.pos as u32, (self.pos + 1) as u32),
                    );
                }
                last_was_underscore = true;
                last_was_digit = false;
                self.pos += 1;
            } else {
                break;
            }
        }

        if last_was_underscore && self.pos > run_begin {
            self.report(
                ErrorKind::NumberLiteralContainsTrailingUnderscores,
                "number",
                Span::new((self.pos - 1) as u32, self.pos as u32),
            );
        }
    }

    fn scan_trailing_garbage(&mut self, begin: usize, mode: &'static str) {
        let garbage_begin = self.pos;
        // Modern octal declares no fraction of its own, so a `.` right after the digit run
        // (e.g. `0o7.5`) is garbage here rather than the start of a second number token.
        if mode == "octal" && self.buffer.byte_at(self.pos) == b'.' {
            self.pos += 1;
        }
        while is_identifier_part(self.buffer.byte_at(self.pos) as char)
            || (self.buffer.byte_at(self.pos) >= 0x80)
        {
            if self.buffer.byte_at(self.pos) >= 0x80 {
                match crate::utf8::decode(&self.buffer.raw()[self.pos..]) {
                    crate::utf8::Decoded::Char { ch, byte_len } if is_identifier_part(ch) => {
                        self.pos += byte_len as usize;
                    }
                    _ => break,
                }
            } else {
                self.pos += 1;
            }
        }
        if self.pos > garbage_begin {
            let kind = match mode {
                "binary" => ErrorKind::UnexpectedCharactersInBinaryNumber,
                "octal" => ErrorKind::UnexpectedCharactersInOctalNumber,
                "hex" => ErrorKind::UnexpectedCharactersInHexNumber,
                _ => ErrorKind::UnexpectedCharactersInNumber,
            };
            self.report(kind, "number", Span::new(garbage_begin as u32, self.pos as u32));
            let _ = begin;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::lexer::Lexer;
    use crate::source::SourceBuffer;
    use crate::token::TokenKind;

    fn lex_first(src: &str) -> (TokenKind, Vec<ErrorKind>) {
        let mut buffer = SourceBuffer::from_str(src);
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let kind = lexer.peek().kind();
        (kind, sink.into_iter().map(|d| d.kind()).collect())
    }

    #[test]
    fn empty_binary_digit_run() {
        let (kind, errors) = lex_first("0b");
        assert_eq!(kind, TokenKind::Number);
        assert_eq!(errors, vec![ErrorKind::NoDigitsInBinaryNumber]);
    }

    #[test]
    fn legacy_octal_demotes_to_decimal_on_eight_or_nine() {
        let (kind, errors) = lex_first("0123n");
        assert_eq!(kind, TokenKind::Number);
        assert_eq!(errors, vec![ErrorKind::OctalLiteralMayNotBeBigInt]);
    }

    #[test]
    fn legacy_octal_with_decimal_and_exponent_and_bigint() {
        let (kind, errors) = lex_first("01.2e+3n");
        assert_eq!(kind, TokenKind::Number);
        assert_eq!(
            errors,
            vec![
                ErrorKind::OctalLiteralMayNotHaveDecimal,
                ErrorKind::OctalLiteralMayNotHaveExponent,
                ErrorKind::OctalLiteralMayNotBeBigInt,
            ]
        );
    }

    #[test]
    fn legacy_octal_with_eight_reclassifies_silently() {
        let (kind, errors) = lex_first("089");
        assert_eq!(kind, TokenKind::Number);
        assert!(errors.is_empty());
    }

    #[test]
    fn modern_octal_rejects_a_trailing_decimal_point() {
        let (kind, errors) = lex_first("0o7.5");
        assert_eq!(kind, TokenKind::Number);
        assert_eq!(errors, vec![ErrorKind::UnexpectedCharactersInOctalNumber]);
    }

    #[test]
    fn adjacent_dots_split_into_two_numbers() {
        let mut buffer = SourceBuffer::from_str("1.2.3");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let first = lexer.peek();
        assert_eq!(first.kind(), TokenKind::Number);
        assert_eq!(lexer.source().slice(first.span()), "1.2");
        lexer.skip();
        let second = lexer.peek();
        assert_eq!(second.kind(), TokenKind::Number);
        assert_eq!(lexer.source().slice(second.span()), ".3");
    }

    #[test]
    fn digit_separators_reject_leading_trailing_and_consecutive() {
        let (_, errors) = lex_first("1__2");
        assert_eq!(errors, vec![ErrorKind::NumberLiteralContainsConsecutiveUnderscores]);

        let (_, errors) = lex_first("1_");
        assert_eq!(errors, vec![ErrorKind::NumberLiteralContainsTrailingUnderscores]);
    }
}
