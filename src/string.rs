//! Single- and double-quoted string literal scanning.

use crate::char_class::is_line_terminator;
use crate::error::ErrorKind;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::utf8::{self, Decoded};

impl<'b, S: crate::error::DiagnosticSink> Lexer<'b, S> {
    /// Scans a string literal starting at `self.pos`, which must hold `quote` (`'` or `"`).
    ///
    /// `\` escapes the next byte unconditionally; no escape is interpreted, only skipped over, so
    /// this never needs to know which escapes are legal.
    pub(crate) fn scan_string(&mut self, quote: u8, has_leading_newline: bool) -> Token {
        let begin = self.pos;
        self.pos += 1;

        loop {
            let byte = self.buffer.byte_at(self.pos);

            if byte == quote {
                self.pos += 1;
                break;
            }

            if self.pos >= self.buffer.len() {
                self.report(
                    ErrorKind::UnclosedStringLiteral,
                    "string",
                    Span::new(begin as u32, self.pos as u32),
                );
                break;
            }

            if byte == b'\\' {
                self.pos += 1;
                // The escaped byte is consumed unconditionally, including a raw line terminator
                // (line continuation) and the quote character itself.
                if is_line_terminator(self.buffer.byte_at(self.pos) as char) {
                    self.skip_line_terminator();
                } else if self.buffer.byte_at(self.pos) >= 0x80 {
                    self.advance_one_char_or_invalid_run();
                } else {
                    self.pos += 1;
                }
                continue;
            }

            if byte == b'\n' || byte == b'\r' {
                self.report(
                    ErrorKind::UnclosedStringLiteral,
                    "string",
                    Span::new(begin as u32, self.pos as u32),
                );
                // The terminator itself is left unconsumed, to be re-lexed as whitespace.
                break;
            }

            if byte >= 0x80 {
                self.advance_one_char_or_invalid_run();
                continue;
            }

            self.pos += 1;
        }

        Token::new(TokenKind::String, begin as u32, self.pos as u32, has_leading_newline)
    }

    /// Advances past LF, CR, or CRLF.
    fn skip_line_terminator(&mut self) {
        if self.buffer.byte_at(self.pos) == b'\r' {
            self.pos += 1;
            if self.buffer.byte_at(self.pos) == b'\n' {
                self.pos += 1;
            }
        } else {
            self.pos += 1;
        }
    }

    /// Advances past one well-formed multi-byte character, or a maximal run of invalid bytes
    /// (reporting [`ErrorKind::InvalidUtf8Sequence`] once for the whole run). Shared by string,
    /// template, and regexp body scanning, all of which pass non-ASCII bytes through untouched.
    pub(crate) fn advance_one_char_or_invalid_run(&mut self) {
        match utf8::decode(&self.buffer.raw()[self.pos..]) {
            Decoded::Char { byte_len, .. } => self.pos += byte_len as usize,
            Decoded::Invalid { byte_len } => {
                let run_begin = self.pos;
                self.pos += byte_len as usize;
                while self.pos < self.buffer.len() && self.buffer.byte_at(self.pos) >= 0x80 {
                    match utf8::decode(&self.buffer.raw()[self.pos..]) {
                        Decoded::Invalid { byte_len } => self.pos += byte_len as usize,
                        Decoded::Char { .. } => break,
                    }
                }
                self.report(
                    ErrorKind::InvalidUtf8Sequence,
                    "sequence",
                    Span::new(run_begin as u32, self.pos as u32),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::lexer::Lexer;
    use crate::source::SourceBuffer;
    use crate::token::TokenKind;

    fn lex_first(src: &str) -> (TokenKind, String, Vec<ErrorKind>) {
        let mut buffer = SourceBuffer::from_str(src);
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let token = lexer.peek();
        let text = lexer.source().slice(token.span()).to_string();
        (token.kind(), text, sink.into_iter().map(|d| d.kind()).collect())
    }

    #[test]
    fn simple_double_quoted_string() {
        let (kind, text, errors) = lex_first(r#""hello""#);
        assert_eq!(kind, TokenKind::String);
        assert_eq!(text, r#""hello""#);
        assert!(errors.is_empty());
    }

    #[test]
    fn escaped_quote_does_not_close_the_string() {
        let (kind, text, errors) = lex_first(r#""a\"b""#);
        assert_eq!(kind, TokenKind::String);
        assert_eq!(text, r#""a\"b""#);
        assert!(errors.is_empty());
    }

    #[test]
    fn unterminated_by_newline_leaves_newline_unconsumed() {
        let mut buffer = SourceBuffer::from_str("\"abc\ndef\"");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let token = lexer.peek();
        assert_eq!(token.kind(), TokenKind::String);
        assert_eq!(lexer.source().slice(token.span()), "\"abc");
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].kind(), ErrorKind::UnclosedStringLiteral);
    }

    #[test]
    fn unterminated_by_eof() {
        let (kind, text, errors) = lex_first(r#""abc"#);
        assert_eq!(kind, TokenKind::String);
        assert_eq!(text, r#""abc"#);
        assert_eq!(errors, vec![ErrorKind::UnclosedStringLiteral]);
    }

    #[test]
    fn line_continuation_escapes_the_newline() {
        let (kind, text, errors) = lex_first("\"a\\\nb\"");
        assert_eq!(kind, TokenKind::String);
        assert_eq!(text, "\"a\\\nb\"");
        assert!(errors.is_empty());
    }
}
