//! Regular-expression literal scanning, entered only via [`crate::Lexer::reparse_as_regexp`].

use crate::char_class::is_identifier_part;
use crate::error::ErrorKind;
use crate::escape::decode_unicode_escape;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::utf8::{self, Decoded};

impl<'b, S: crate::error::DiagnosticSink> Lexer<'b, S> {
    /// Scans a regexp literal body and flags, starting at `self.pos` which must hold the opening
    /// `/`.
    pub(crate) fn scan_regexp(&mut self, begin: usize, has_leading_newline: bool) -> Token {
        self.pos = begin + 1;
        let mut in_character_class = false;

        loop {
            if self.pos >= self.buffer.len() {
                self.report(
                    ErrorKind::UnclosedRegexpLiteral,
                    "regexp",
                    Span::new(begin as u32, self.pos as u32),
                );
                return self.finish_regexp_flags(begin, has_leading_newline);
            }

            let byte = self.buffer.byte_at(self.pos);

            if byte == b'\\' {
                self.pos += 1;
                if self.buffer.byte_at(self.pos) >= 0x80 {
                    self.advance_one_char_or_invalid_run();
                } else {
                    self.pos += 1;
                }
                continue;
            }

            if byte == b'[' {
                in_character_class = true;
                self.pos += 1;
                continue;
            }
            if byte == b']' {
                in_character_class = false;
                self.pos += 1;
                continue;
            }
            if byte == b'/' && !in_character_class {
                self.pos += 1;
                return self.finish_regexp_flags(begin, has_leading_newline);
            }

            if byte >= 0x80 {
                self.advance_one_char_or_invalid_run();
                continue;
            }

            self.pos += 1;
        }
    }

    /// Consumes identifier-part bytes (and `\u` escapes) as regexp flags. No flag set or
    /// duplicate-flag validation happens at this layer; only escapes inside flags are checked.
    fn finish_regexp_flags(&mut self, begin: usize, has_leading_newline: bool) -> Token {
        loop {
            let byte = self.buffer.byte_at(self.pos);

            if byte == b'\\' {
                let escape_begin = self.pos;
                self.pos += 1;
                if self.buffer.byte_at(self.pos) == b'u' {
                    self.pos += 1;
                    let (_, next_pos) = decode_unicode_escape(self.buffer, self.sink, escape_begin, self.pos);
                    self.pos = next_pos;
                    self.report(
                        ErrorKind::RegexpLiteralFlagsCannotContainUnicodeEscapes,
                        "escape_sequence",
                        Span::new(escape_begin as u32, self.pos as u32),
                    );
                } else {
                    break;
                }
                continue;
            }

            if byte < 0x80 {
                if is_identifier_part(byte as char) {
                    self.pos += 1;
                    continue;
                }
                break;
            }

            match utf8::decode(&self.buffer.raw()[self.pos..]) {
                Decoded::Char { ch, byte_len } if is_identifier_part(ch) => {
                    self.pos += byte_len as usize;
                }
                _ => break,
            }
        }

        Token::new(TokenKind::Regexp, begin as u32, self.pos as u32, has_leading_newline)
    }
}
