//! Template literal body scanning, shared between the initial `` ` `` and resumption after a
//! `${...}` substitution's closing `}` (see [`crate::Lexer::skip_in_template`]).

use crate::error::ErrorKind;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

impl<'b, S: crate::error::DiagnosticSink> Lexer<'b, S> {
    /// Scans a template literal (or its middle/tail) body starting right after the opening
    /// `` ` `` or resumption `}`, at `self.pos`.
    ///
    /// `token_begin` is the byte offset the *produced token* starts at: the opening `` ` `` for
    /// the initial scan, or the resume point just past the closing `}` for a continuation (see
    /// [`crate::Lexer::skip_in_template`]) — a continuation token never reaches back across the
    /// substitution it follows. `literal_begin` is always the byte offset of the enclosing
    /// literal's opening `` ` ``, used only to anchor the `UnclosedTemplate` error span, which
    /// must cover the whole literal regardless of which segment hit EOF.
    pub(crate) fn scan_template_body(
        &mut self,
        token_begin: usize,
        literal_begin: usize,
        has_leading_newline: bool,
    ) -> Token {
        loop {
            if self.pos >= self.buffer.len() {
                self.report(
                    ErrorKind::UnclosedTemplate,
                    "template",
                    Span::new(literal_begin as u32, self.pos as u32),
                );
                return Token::new(
                    TokenKind::CompleteTemplate,
                    token_begin as u32,
                    self.pos as u32,
                    has_leading_newline,
                );
            }

            let byte = self.buffer.byte_at(self.pos);

            if byte == b'`' {
                self.pos += 1;
                return Token::new(
                    TokenKind::CompleteTemplate,
                    token_begin as u32,
                    self.pos as u32,
                    has_leading_newline,
                );
            }

            if byte == b'$' && self.buffer.byte_at(self.pos + 1) == b'{' {
                self.pos += 2;
                return Token::new(
                    TokenKind::IncompleteTemplate,
                    token_begin as u32,
                    self.pos as u32,
                    has_leading_newline,
                );
            }

            if byte == b'\\' {
                self.pos += 1;
                if self.buffer.byte_at(self.pos) >= 0x80 {
                    self.advance_one_char_or_invalid_run();
                } else {
                    self.pos += 1;
                }
                continue;
            }

            if byte >= 0x80 {
                self.advance_one_char_or_invalid_run();
                continue;
            }

            // Line terminators (including the CR of a CRLF pair) do not end the literal; they are
            // ordinary body bytes here, unlike in a string literal.
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::lexer::Lexer;
    use crate::source::SourceBuffer;
    use crate::token::TokenKind;

    #[test]
    fn plain_template_with_no_substitution() {
        let mut buffer = SourceBuffer::from_str("`hello`");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let token = lexer.peek();
        assert_eq!(token.kind(), TokenKind::CompleteTemplate);
        assert_eq!(lexer.source().slice(token.span()), "`hello`");
        assert!(sink.is_empty());
    }

    #[test]
    fn template_with_substitution_round_trip() {
        let mut buffer = SourceBuffer::from_str("`a${b}c`");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);

        let head = lexer.peek();
        assert_eq!(head.kind(), TokenKind::IncompleteTemplate);
        assert_eq!(lexer.source().slice(head.span()), "`a${");
        lexer.skip();

        let ident = lexer.peek();
        assert_eq!(ident.kind(), TokenKind::Identifier);
        assert_eq!(lexer.source().slice(ident.span()), "b");
        lexer.skip();

        let close_brace = lexer.peek();
        assert_eq!(lexer.source().slice(close_brace.span()), "}");
        let template_begin = head.begin();
        let tail = lexer.skip_in_template(template_begin);
        assert_eq!(tail.kind(), TokenKind::CompleteTemplate);
        assert_eq!(lexer.source().slice(tail.span()), "c`");
    }

    #[test]
    fn unterminated_template_reports_and_still_yields_complete_template() {
        let mut buffer = SourceBuffer::from_str("`abc");
        let mut sink = Vec::new();
        let mut lexer = Lexer::new(&mut buffer, &mut sink);
        let token = lexer.peek();
        assert_eq!(token.kind(), TokenKind::CompleteTemplate);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].kind(), ErrorKind::UnclosedTemplate);
    }
}
